use axum::{extract::State, response::IntoResponse, response::Redirect};
use axum_extra::extract::CookieJar;
use nimbus_adapters::session::{create_removal_cookie, create_session_ended_cookie};

use crate::state::AppState;

/// Ends the session, if any. Needs no authentication.
#[tracing::instrument(name = "Logout", skip_all)]
pub async fn logout(State(state): State<AppState>, jar: CookieJar) -> impl IntoResponse {
    let jar = jar
        .add(create_removal_cookie(&state.session))
        .add(create_session_ended_cookie());

    (jar, Redirect::to("/login"))
}
