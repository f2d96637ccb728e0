use nimbus_core::{
    Account, AccountId, AccountStore, AccountStoreError, FavoriteCity, FavoritesStore,
    FavoritesStoreError, HistoryStoreError, RecentSearch, SearchHistoryStore,
};

/// How many distinct recent cities the dashboard lists.
pub const RECENT_SEARCH_LIMIT: u32 = 10;

#[derive(Debug, thiserror::Error)]
pub enum DashboardError {
    #[error("Account not found")]
    AccountNotFound,
    #[error("Account store error: {0}")]
    AccountStoreError(#[from] AccountStoreError),
    #[error("History store error: {0}")]
    HistoryStoreError(#[from] HistoryStoreError),
    #[error("Favorites store error: {0}")]
    FavoritesStoreError(#[from] FavoritesStoreError),
}

/// What the dashboard shows before (and around) any search.
#[derive(Debug)]
pub struct DashboardView {
    pub account: Account,
    pub favorites: Vec<FavoriteCity>,
    pub recent_searches: Vec<RecentSearch>,
}

pub struct DashboardUseCase<'a, A, H, F>
where
    A: AccountStore + ?Sized,
    H: SearchHistoryStore + ?Sized,
    F: FavoritesStore + ?Sized,
{
    accounts: &'a A,
    history: &'a H,
    favorites: &'a F,
}

impl<'a, A, H, F> DashboardUseCase<'a, A, H, F>
where
    A: AccountStore + ?Sized,
    H: SearchHistoryStore + ?Sized,
    F: FavoritesStore + ?Sized,
{
    pub fn new(accounts: &'a A, history: &'a H, favorites: &'a F) -> Self {
        Self {
            accounts,
            history,
            favorites,
        }
    }

    #[tracing::instrument(name = "DashboardUseCase::execute", skip(self))]
    pub async fn execute(&self, account_id: AccountId) -> Result<DashboardView, DashboardError> {
        let account = self
            .accounts
            .find_by_id(&account_id)
            .await?
            .ok_or(DashboardError::AccountNotFound)?;

        Ok(DashboardView {
            favorites: self.favorites.list_favorites(&account_id).await?,
            recent_searches: self
                .history
                .recent_searches(&account_id, RECENT_SEARCH_LIMIT)
                .await?,
            account,
        })
    }
}
