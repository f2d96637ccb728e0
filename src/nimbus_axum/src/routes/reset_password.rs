use axum::{
    Form,
    extract::{Path, State},
    response::{IntoResponse, Redirect, Response},
};
use nimbus_application::{ResetPasswordError, ResetPasswordUseCase};
use secrecy::Secret;
use serde::Deserialize;

use super::secret_or_empty;
use crate::{
    error::PageError,
    notice::Notice,
    state::AppState,
    templates::{ResetPasswordPage, render},
};

#[derive(Debug, Deserialize)]
pub struct ResetPasswordForm {
    pub password: Option<Secret<String>>,
    pub confirm_password: Option<Secret<String>>,
}

fn request_new_link(notice: Notice) -> Response {
    Redirect::to(&format!("/forgot-password?{}", notice.error())).into_response()
}

#[tracing::instrument(name = "Reset password page", skip_all)]
pub async fn reset_password_page(
    State(state): State<AppState>,
    Path(token): Path<String>,
) -> Result<Response, PageError> {
    match ResetPasswordUseCase::new(state.credentials())
        .check(token.clone())
        .await
    {
        Ok(_) => {
            let page = ResetPasswordPage {
                token: &token,
                error: None,
            };
            Ok(render(&page)?.into_response())
        }
        Err(ResetPasswordError::TokenExpired) => Ok(request_new_link(Notice::ResetTokenExpired)),
        Err(ResetPasswordError::InvalidToken) => Ok(request_new_link(Notice::ResetTokenInvalid)),
        Err(e) => Err(PageError::unexpected(e)),
    }
}

#[tracing::instrument(name = "Reset password", skip_all)]
pub async fn reset_password(
    State(state): State<AppState>,
    Path(token): Path<String>,
    Form(form): Form<ResetPasswordForm>,
) -> Result<Response, PageError> {
    let outcome = ResetPasswordUseCase::new(state.credentials())
        .execute(
            token.clone(),
            secret_or_empty(form.password),
            secret_or_empty(form.confirm_password),
        )
        .await;

    match outcome {
        Ok(_) => {
            Ok(Redirect::to(&format!("/login?{}", Notice::PasswordChanged.success())).into_response())
        }
        // The token stays usable; let the user try again.
        Err(e @ (ResetPasswordError::PasswordMismatch | ResetPasswordError::MissingPassword)) => {
            let message = e.to_string();
            let page = ResetPasswordPage {
                token: &token,
                error: Some(&message),
            };
            Ok(render(&page)?.into_response())
        }
        Err(ResetPasswordError::TokenExpired) => Ok(request_new_link(Notice::ResetTokenExpired)),
        Err(ResetPasswordError::InvalidToken) => Ok(request_new_link(Notice::ResetTokenInvalid)),
        Err(e) => Err(PageError::unexpected(e)),
    }
}
