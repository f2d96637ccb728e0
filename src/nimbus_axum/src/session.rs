use axum::{
    extract::FromRequestParts,
    http::request::Parts,
    response::{IntoResponse, Redirect, Response},
};
use axum_extra::extract::CookieJar;
use nimbus_adapters::session::authenticate;
use nimbus_core::AccountId;

use crate::{error::ApiError, state::AppState};

/// The signed-in account of an HTML page request. Anonymous requests are
/// sent to the login page.
#[derive(Debug, Clone, Copy)]
pub struct SessionAccount(pub AccountId);

/// The signed-in account of a JSON request. Anonymous requests get a 401.
#[derive(Debug, Clone, Copy)]
pub struct ApiSessionAccount(pub AccountId);

fn session_account(parts: &Parts, state: &AppState) -> Option<AccountId> {
    let jar = CookieJar::from_headers(&parts.headers);
    authenticate(&jar, &state.session)
        .inspect_err(|e| tracing::debug!(error = %e, "request without a valid session"))
        .ok()
}

impl FromRequestParts<AppState> for SessionAccount {
    type Rejection = Response;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        session_account(parts, state)
            .map(SessionAccount)
            .ok_or_else(|| Redirect::to("/login").into_response())
    }
}

impl FromRequestParts<AppState> for ApiSessionAccount {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        session_account(parts, state)
            .map(ApiSessionAccount)
            .ok_or(ApiError::NotAuthenticated)
    }
}
