pub mod database;
pub mod sqlite_account_store;
pub mod sqlite_favorites_store;
pub mod sqlite_reset_token_store;
pub mod sqlite_search_history_store;

pub use database::{connect_sqlite, run_migrations};
pub use sqlite_account_store::SqliteAccountStore;
pub use sqlite_favorites_store::SqliteFavoritesStore;
pub use sqlite_reset_token_store::SqliteResetTokenStore;
pub use sqlite_search_history_store::SqliteSearchHistoryStore;

use chrono::{DateTime, Utc};

pub(crate) fn from_unix_seconds(seconds: i64) -> Result<DateTime<Utc>, String> {
    DateTime::from_timestamp(seconds, 0).ok_or_else(|| format!("timestamp out of range: {seconds}"))
}
