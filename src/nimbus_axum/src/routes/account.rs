use axum::{Json, extract::State, response::IntoResponse};
use axum_extra::extract::CookieJar;
use nimbus_adapters::session::create_removal_cookie;
use nimbus_application::DeleteAccountUseCase;

use super::Success;
use crate::{error::ApiError, session::ApiSessionAccount, state::AppState};

/// Removes the account with everything it owns, then ends the session.
#[tracing::instrument(name = "Delete account", skip_all)]
pub async fn delete_account(
    State(state): State<AppState>,
    ApiSessionAccount(account_id): ApiSessionAccount,
    jar: CookieJar,
) -> Result<impl IntoResponse, ApiError> {
    DeleteAccountUseCase::new(&*state.accounts)
        .execute(account_id)
        .await?;

    let jar = jar.add(create_removal_cookie(&state.session));
    Ok((jar, Json(Success::new())))
}
