use nimbus_core::{AccountId, HistoryStoreError, RecentSearch, SearchHistoryEntry, SearchHistoryStore};
use sqlx::SqlitePool;

pub struct SqliteSearchHistoryStore {
    pool: SqlitePool,
}

impl SqliteSearchHistoryStore {
    pub fn new(pool: SqlitePool) -> Self {
        SqliteSearchHistoryStore { pool }
    }
}

fn unexpected(e: sqlx::Error) -> HistoryStoreError {
    HistoryStoreError::UnexpectedError(e.to_string())
}

#[async_trait::async_trait]
impl SearchHistoryStore for SqliteSearchHistoryStore {
    #[tracing::instrument(name = "Recording search in SQLite", skip_all)]
    async fn record_search(&self, entry: &SearchHistoryEntry) -> Result<(), HistoryStoreError> {
        sqlx::query(
            r#"
                INSERT INTO search_history (account_id, city_name, latitude, longitude, searched_at)
                VALUES (?, ?, ?, ?, ?)
            "#,
        )
        .bind(entry.account_id.to_string())
        .bind(&entry.city_name)
        .bind(entry.latitude)
        .bind(entry.longitude)
        .bind(entry.searched_at.timestamp())
        .execute(&self.pool)
        .await
        .map_err(unexpected)?;

        Ok(())
    }

    #[tracing::instrument(name = "Retrieving recent searches from SQLite", skip_all)]
    async fn recent_searches(
        &self,
        account_id: &AccountId,
        limit: u32,
    ) -> Result<Vec<RecentSearch>, HistoryStoreError> {
        // Same-second searches fall back to insertion order.
        let rows: Vec<(String, Option<f64>, Option<f64>)> = sqlx::query_as(
            r#"
                SELECT city_name, latitude, longitude
                FROM search_history
                WHERE account_id = ?
                GROUP BY city_name, latitude, longitude
                ORDER BY MAX(searched_at) DESC, MAX(id) DESC
                LIMIT ?
            "#,
        )
        .bind(account_id.to_string())
        .bind(i64::from(limit))
        .fetch_all(&self.pool)
        .await
        .map_err(unexpected)?;

        Ok(rows
            .into_iter()
            .map(|(city_name, latitude, longitude)| RecentSearch {
                city_name,
                latitude,
                longitude,
            })
            .collect())
    }

    #[tracing::instrument(name = "Clearing search history in SQLite", skip_all)]
    async fn clear_history(&self, account_id: &AccountId) -> Result<u64, HistoryStoreError> {
        let result = sqlx::query("DELETE FROM search_history WHERE account_id = ?")
            .bind(account_id.to_string())
            .execute(&self.pool)
            .await
            .map_err(unexpected)?;

        Ok(result.rows_affected())
    }
}
