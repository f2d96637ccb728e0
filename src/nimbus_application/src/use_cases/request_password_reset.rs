use chrono::Utc;
use nimbus_core::{AccountStore, AccountStoreError, Email};
use secrecy::Secret;

use crate::{
    credentials::{CredentialService, CredentialServiceError},
    notifications::Notifier,
};

#[derive(Debug, thiserror::Error)]
pub enum RequestPasswordResetError {
    #[error("Account store error: {0}")]
    AccountStoreError(#[from] AccountStoreError),
    #[error("Credential service error: {0}")]
    CredentialServiceError(#[from] CredentialServiceError),
}

/// Request password reset use case - mails a reset link when the account exists.
///
/// Succeeds identically whether or not the email belongs to an account.
pub struct RequestPasswordResetUseCase<'a, A>
where
    A: AccountStore + ?Sized,
{
    accounts: &'a A,
    credentials: CredentialService<'a>,
    notifier: Notifier<'a>,
}

impl<'a, A> RequestPasswordResetUseCase<'a, A>
where
    A: AccountStore + ?Sized,
{
    pub fn new(accounts: &'a A, credentials: CredentialService<'a>, notifier: Notifier<'a>) -> Self {
        Self {
            accounts,
            credentials,
            notifier,
        }
    }

    #[tracing::instrument(name = "RequestPasswordResetUseCase::execute", skip_all)]
    pub async fn execute(&self, email: Secret<String>) -> Result<(), RequestPasswordResetError> {
        let Ok(email) = Email::try_from(email) else {
            return Ok(());
        };
        let Some(account) = self.accounts.find_by_email(&email).await? else {
            tracing::debug!("password reset requested for unknown email");
            return Ok(());
        };

        let token = self
            .credentials
            .issue_reset_token(account.id, Utc::now())
            .await?;
        self.notifier.send_password_reset(&account.email, &token).await;

        Ok(())
    }
}
