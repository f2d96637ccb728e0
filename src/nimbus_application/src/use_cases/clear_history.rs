use nimbus_core::{AccountId, HistoryStoreError, SearchHistoryStore};

#[derive(Debug, thiserror::Error)]
pub enum ClearHistoryError {
    #[error("History store error: {0}")]
    HistoryStoreError(#[from] HistoryStoreError),
}

/// Clear history use case - irreversibly deletes every search of the account
pub struct ClearHistoryUseCase<'a, H>
where
    H: SearchHistoryStore + ?Sized,
{
    history: &'a H,
}

impl<'a, H> ClearHistoryUseCase<'a, H>
where
    H: SearchHistoryStore + ?Sized,
{
    pub fn new(history: &'a H) -> Self {
        Self { history }
    }

    #[tracing::instrument(name = "ClearHistoryUseCase::execute", skip(self))]
    pub async fn execute(&self, account_id: AccountId) -> Result<u64, ClearHistoryError> {
        let removed = self.history.clear_history(&account_id).await?;
        tracing::debug!(removed, "search history cleared");
        Ok(removed)
    }
}
