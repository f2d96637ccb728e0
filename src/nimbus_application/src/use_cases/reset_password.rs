use chrono::Utc;
use nimbus_core::{AccountId, Password, ResetToken};
use secrecy::{ExposeSecret, Secret};

use crate::credentials::{CredentialService, CredentialServiceError, RejectionReason};

#[derive(Debug, thiserror::Error)]
pub enum ResetPasswordError {
    #[error("Token expired.")]
    TokenExpired,
    /// Forged, unknown or already used. Deliberately indistinguishable to the caller.
    #[error("Invalid token.")]
    InvalidToken,
    #[error("Passwords do not match.")]
    PasswordMismatch,
    #[error("Please fill in all fields.")]
    MissingPassword,
    #[error("Credential service error: {0}")]
    CredentialServiceError(CredentialServiceError),
}

impl From<CredentialServiceError> for ResetPasswordError {
    fn from(e: CredentialServiceError) -> Self {
        match e {
            CredentialServiceError::Rejected(RejectionReason::Expired) => Self::TokenExpired,
            CredentialServiceError::Rejected(reason) => {
                tracing::debug!(?reason, "reset token rejected");
                Self::InvalidToken
            }
            other => Self::CredentialServiceError(other),
        }
    }
}

/// Reset password use case - second phase of password recovery
pub struct ResetPasswordUseCase<'a> {
    credentials: CredentialService<'a>,
}

impl<'a> ResetPasswordUseCase<'a> {
    pub fn new(credentials: CredentialService<'a>) -> Self {
        Self { credentials }
    }

    /// Checks that `token` may still be used, without consuming it.
    #[tracing::instrument(name = "ResetPasswordUseCase::check", skip_all)]
    pub async fn check(&self, token: String) -> Result<AccountId, ResetPasswordError> {
        let token = ResetToken::parse(token).map_err(|_| ResetPasswordError::InvalidToken)?;
        Ok(self.credentials.verify_reset_token(&token, Utc::now()).await?)
    }

    /// Replaces the password and consumes the token. A mismatched confirmation
    /// leaves the token usable.
    #[tracing::instrument(name = "ResetPasswordUseCase::execute", skip_all)]
    pub async fn execute(
        &self,
        token: String,
        password: Secret<String>,
        confirmation: Secret<String>,
    ) -> Result<AccountId, ResetPasswordError> {
        let token = ResetToken::parse(token).map_err(|_| ResetPasswordError::InvalidToken)?;
        let now = Utc::now();
        let account_id = self.credentials.verify_reset_token(&token, now).await?;

        if password.expose_secret() != confirmation.expose_secret() {
            return Err(ResetPasswordError::PasswordMismatch);
        }
        let password =
            Password::try_from(password).map_err(|_| ResetPasswordError::MissingPassword)?;

        self.credentials
            .redeem_reset_token(&token, &password, now)
            .await?;
        tracing::info!(%account_id, "password reset");

        Ok(account_id)
    }
}
