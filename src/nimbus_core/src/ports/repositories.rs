use async_trait::async_trait;
use chrono::{DateTime, Utc};
use thiserror::Error;

use crate::domain::{
    account::{Account, AccountId, Language, Theme},
    email::Email,
    password::PasswordHash,
    saved_cities::{FavoriteCity, RecentSearch, SearchHistoryEntry},
    tokens::{ResetToken, ResetTokenRecord, VerificationToken},
};

// AccountStore port trait and errors
#[derive(Debug, Error)]
pub enum AccountStoreError {
    #[error("Email already registered")]
    EmailAlreadyRegistered,
    #[error("Account not found")]
    AccountNotFound,
    #[error("Unexpected error {0}")]
    UnexpectedError(String),
}

impl PartialEq for AccountStoreError {
    fn eq(&self, other: &Self) -> bool {
        matches!(
            (self, other),
            (Self::EmailAlreadyRegistered, Self::EmailAlreadyRegistered)
                | (Self::AccountNotFound, Self::AccountNotFound)
                | (Self::UnexpectedError(_), Self::UnexpectedError(_))
        )
    }
}

#[async_trait]
pub trait AccountStore: Send + Sync {
    /// Persists a new account. Fails with `EmailAlreadyRegistered` when the
    /// exact email is already present.
    async fn add_account(&self, account: &Account) -> Result<(), AccountStoreError>;
    async fn find_by_email(&self, email: &Email) -> Result<Option<Account>, AccountStoreError>;
    async fn find_by_id(&self, id: &AccountId) -> Result<Option<Account>, AccountStoreError>;
    /// Marks the account holding `token` as verified and clears the token in
    /// one statement. Returns `None` when no account holds the token.
    async fn verify_email(
        &self,
        token: &VerificationToken,
    ) -> Result<Option<AccountId>, AccountStoreError>;
    async fn update_theme(&self, id: &AccountId, theme: Theme) -> Result<(), AccountStoreError>;
    async fn update_language(
        &self,
        id: &AccountId,
        language: &Language,
    ) -> Result<(), AccountStoreError>;
    /// Removes the account and, by cascade, its history, favorites and reset tokens.
    async fn delete_account(&self, id: &AccountId) -> Result<(), AccountStoreError>;
}

// ResetTokenStore port trait and errors
#[derive(Debug, Error)]
pub enum ResetTokenStoreError {
    #[error("Reset token not found")]
    TokenNotFound,
    #[error("Reset token already used or expired")]
    TokenUnavailable,
    #[error("Unexpected error {0}")]
    UnexpectedError(String),
}

impl PartialEq for ResetTokenStoreError {
    fn eq(&self, other: &Self) -> bool {
        matches!(
            (self, other),
            (Self::TokenNotFound, Self::TokenNotFound)
                | (Self::TokenUnavailable, Self::TokenUnavailable)
                | (Self::UnexpectedError(_), Self::UnexpectedError(_))
        )
    }
}

#[async_trait]
pub trait ResetTokenStore: Send + Sync {
    async fn add_token(&self, record: &ResetTokenRecord) -> Result<(), ResetTokenStoreError>;
    async fn find_token(
        &self,
        token: &ResetToken,
    ) -> Result<Option<ResetTokenRecord>, ResetTokenStoreError>;
    /// Marks `token` used and overwrites the owning account's password hash,
    /// both or neither. Fails with `TokenUnavailable` if the token is already
    /// used or expired at `now`, so two concurrent redemptions cannot both win.
    async fn redeem(
        &self,
        token: &ResetToken,
        new_password_hash: &PasswordHash,
        now: DateTime<Utc>,
    ) -> Result<(), ResetTokenStoreError>;
}

// SearchHistoryStore port trait and errors
#[derive(Debug, Error)]
pub enum HistoryStoreError {
    #[error("Unexpected error {0}")]
    UnexpectedError(String),
}

#[async_trait]
pub trait SearchHistoryStore: Send + Sync {
    async fn record_search(&self, entry: &SearchHistoryEntry) -> Result<(), HistoryStoreError>;
    /// Distinct cities, most recently searched first.
    async fn recent_searches(
        &self,
        account_id: &AccountId,
        limit: u32,
    ) -> Result<Vec<RecentSearch>, HistoryStoreError>;
    /// Deletes every history row of the account, returning how many were removed.
    async fn clear_history(&self, account_id: &AccountId) -> Result<u64, HistoryStoreError>;
}

// FavoritesStore port trait and errors
#[derive(Debug, Error)]
pub enum FavoritesStoreError {
    #[error("Unexpected error {0}")]
    UnexpectedError(String),
}

#[async_trait]
pub trait FavoritesStore: Send + Sync {
    /// Removes the (account, city) favorite if present, inserts it otherwise.
    /// Returns whether the city is a favorite afterwards.
    async fn toggle_favorite(&self, favorite: &FavoriteCity) -> Result<bool, FavoritesStoreError>;
    /// Newest first.
    async fn list_favorites(
        &self,
        account_id: &AccountId,
    ) -> Result<Vec<FavoriteCity>, FavoritesStoreError>;
    async fn is_favorite(
        &self,
        account_id: &AccountId,
        city_name: &str,
    ) -> Result<bool, FavoritesStoreError>;
}
