use nimbus_core::{AccountId, AccountStore, AccountStoreError};

/// Error types specific to delete account use case
#[derive(Debug, thiserror::Error)]
pub enum DeleteAccountError {
    #[error("Account store error: {0}")]
    AccountStoreError(#[from] AccountStoreError),
}

/// Delete account use case - removes the account and everything it owns
pub struct DeleteAccountUseCase<'a, A>
where
    A: AccountStore + ?Sized,
{
    accounts: &'a A,
}

impl<'a, A> DeleteAccountUseCase<'a, A>
where
    A: AccountStore + ?Sized,
{
    pub fn new(accounts: &'a A) -> Self {
        Self { accounts }
    }

    #[tracing::instrument(name = "DeleteAccountUseCase::execute", skip(self))]
    pub async fn execute(&self, account_id: AccountId) -> Result<(), DeleteAccountError> {
        self.accounts.delete_account(&account_id).await?;
        tracing::info!(%account_id, "account deleted");
        Ok(())
    }
}
