use nimbus_core::{Account, AccountStore, AccountStoreError, CredentialError, Email, Password};
use secrecy::Secret;

use crate::credentials::CredentialService;

/// Error types specific to login use case
#[derive(Debug, thiserror::Error)]
pub enum LoginError {
    /// Unknown email, wrong password and unparseable input all look the same.
    #[error("Incorrect email or password.")]
    InvalidCredentials,
    #[error("Account store error: {0}")]
    AccountStoreError(#[from] AccountStoreError),
    #[error("Credential error: {0}")]
    CredentialError(#[from] CredentialError),
}

/// Login use case - checks credentials and returns the authenticated account
pub struct LoginUseCase<'a, A>
where
    A: AccountStore + ?Sized,
{
    accounts: &'a A,
    credentials: CredentialService<'a>,
}

impl<'a, A> LoginUseCase<'a, A>
where
    A: AccountStore + ?Sized,
{
    pub fn new(accounts: &'a A, credentials: CredentialService<'a>) -> Self {
        Self {
            accounts,
            credentials,
        }
    }

    #[tracing::instrument(name = "LoginUseCase::execute", skip_all)]
    pub async fn execute(
        &self,
        email: Secret<String>,
        password: Secret<String>,
    ) -> Result<Account, LoginError> {
        let email = Email::try_from(email).map_err(|_| LoginError::InvalidCredentials)?;
        let password = Password::try_from(password).map_err(|_| LoginError::InvalidCredentials)?;

        let account = self
            .accounts
            .find_by_email(&email)
            .await?
            .ok_or(LoginError::InvalidCredentials)?;

        if !self
            .credentials
            .verify_password(&password, &account.password_hash)
            .await?
        {
            return Err(LoginError::InvalidCredentials);
        }

        Ok(account)
    }
}
