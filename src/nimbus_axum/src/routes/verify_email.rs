use axum::{
    extract::{Path, State},
    response::Redirect,
};
use nimbus_application::{VerifyEmailError, VerifyEmailUseCase};

use crate::{error::PageError, notice::Notice, state::AppState};

#[tracing::instrument(name = "Verify email", skip_all)]
pub async fn verify_email(
    State(state): State<AppState>,
    Path(token): Path<String>,
) -> Result<Redirect, PageError> {
    let notice = match VerifyEmailUseCase::new(&*state.accounts).execute(token).await {
        Ok(_) => Notice::EmailVerified.success(),
        Err(VerifyEmailError::InvalidToken) => Notice::InvalidVerificationToken.error(),
        Err(e) => return Err(PageError::unexpected(e)),
    };

    Ok(Redirect::to(&format!("/login?{notice}")))
}
