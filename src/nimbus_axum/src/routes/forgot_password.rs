use axum::{
    Form,
    extract::{Query, State},
    response::{IntoResponse, Response},
};
use nimbus_application::RequestPasswordResetUseCase;
use secrecy::Secret;
use serde::Deserialize;

use crate::{
    error::PageError,
    notice::NoticeQuery,
    state::AppState,
    templates::{ForgotPasswordPage, render},
};

/// Shown whether or not the address belongs to an account.
pub const RESET_REQUESTED_MESSAGE: &str =
    "If the email exists, you will receive instructions shortly.";

#[derive(Debug, Deserialize)]
pub struct ForgotPasswordForm {
    #[serde(default)]
    pub email: String,
}

pub async fn forgot_password_page(Query(query): Query<NoticeQuery>) -> Result<Response, PageError> {
    let page = ForgotPasswordPage {
        success: None,
        error: query.error_message(),
    };
    Ok(render(&page)?.into_response())
}

#[tracing::instrument(name = "Forgot password", skip_all)]
pub async fn forgot_password(
    State(state): State<AppState>,
    Form(form): Form<ForgotPasswordForm>,
) -> Result<Response, PageError> {
    RequestPasswordResetUseCase::new(&*state.accounts, state.credentials(), state.notifier())
        .execute(Secret::new(form.email))
        .await
        .map_err(PageError::unexpected)?;

    let page = ForgotPasswordPage {
        success: Some(RESET_REQUESTED_MESSAGE),
        error: None,
    };
    Ok(render(&page)?.into_response())
}
