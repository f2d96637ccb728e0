use nimbus_core::{AccountId, AccountStore, AccountStoreError, VerificationToken};

#[derive(Debug, thiserror::Error)]
pub enum VerifyEmailError {
    #[error("Invalid token.")]
    InvalidToken,
    #[error("Account store error: {0}")]
    AccountStoreError(#[from] AccountStoreError),
}

/// Verify email use case - consumes a verification token
pub struct VerifyEmailUseCase<'a, A>
where
    A: AccountStore + ?Sized,
{
    accounts: &'a A,
}

impl<'a, A> VerifyEmailUseCase<'a, A>
where
    A: AccountStore + ?Sized,
{
    pub fn new(accounts: &'a A) -> Self {
        Self { accounts }
    }

    #[tracing::instrument(name = "VerifyEmailUseCase::execute", skip_all)]
    pub async fn execute(&self, token: String) -> Result<AccountId, VerifyEmailError> {
        let token = VerificationToken::parse(token).map_err(|_| VerifyEmailError::InvalidToken)?;

        let account_id = self
            .accounts
            .verify_email(&token)
            .await?
            .ok_or(VerifyEmailError::InvalidToken)?;

        tracing::info!(%account_id, "email verified");
        Ok(account_id)
    }
}
