use std::time::Duration;

use nimbus_core::{AccountId, FavoriteCity, FavoritesStore, FavoritesStoreError};
use sqlx::SqlitePool;

use super::from_unix_seconds;

const TOGGLE_ATTEMPTS: u32 = 5;
const TOGGLE_BACKOFF: Duration = Duration::from_millis(10);

pub struct SqliteFavoritesStore {
    pool: SqlitePool,
}

impl SqliteFavoritesStore {
    pub fn new(pool: SqlitePool) -> Self {
        SqliteFavoritesStore { pool }
    }

    async fn try_toggle(&self, favorite: &FavoriteCity) -> Result<bool, sqlx::Error> {
        let mut tx = self.pool.begin().await?;

        let removed = sqlx::query("DELETE FROM favorite_cities WHERE account_id = ? AND city_name = ?")
            .bind(favorite.account_id.to_string())
            .bind(&favorite.city_name)
            .execute(&mut *tx)
            .await?;

        if removed.rows_affected() > 0 {
            tx.commit().await?;
            return Ok(false);
        }

        sqlx::query(
            r#"
                INSERT INTO favorite_cities (account_id, city_name, latitude, longitude, added_at)
                VALUES (?, ?, ?, ?, ?)
                ON CONFLICT (account_id, city_name) DO NOTHING
            "#,
        )
        .bind(favorite.account_id.to_string())
        .bind(&favorite.city_name)
        .bind(favorite.latitude)
        .bind(favorite.longitude)
        .bind(favorite.added_at.timestamp())
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;
        Ok(true)
    }
}

/// SQLITE_BUSY and SQLITE_LOCKED, including their extended codes.
fn is_contention(e: &sqlx::Error) -> bool {
    e.as_database_error()
        .and_then(|db_err| db_err.code())
        .and_then(|code| code.parse::<i32>().ok())
        .is_some_and(|code| matches!(code & 0xff, 5 | 6))
}

fn unexpected(e: sqlx::Error) -> FavoritesStoreError {
    FavoritesStoreError::UnexpectedError(e.to_string())
}

#[async_trait::async_trait]
impl FavoritesStore for SqliteFavoritesStore {
    #[tracing::instrument(name = "Toggling favorite in SQLite", skip_all)]
    async fn toggle_favorite(&self, favorite: &FavoriteCity) -> Result<bool, FavoritesStoreError> {
        let mut attempt = 1;
        loop {
            match self.try_toggle(favorite).await {
                Err(e) if is_contention(&e) && attempt < TOGGLE_ATTEMPTS => {
                    tracing::debug!(attempt, "favorite toggle contended, retrying");
                    tokio::time::sleep(TOGGLE_BACKOFF * attempt).await;
                    attempt += 1;
                }
                result => return result.map_err(unexpected),
            }
        }
    }

    #[tracing::instrument(name = "Listing favorites from SQLite", skip_all)]
    async fn list_favorites(
        &self,
        account_id: &AccountId,
    ) -> Result<Vec<FavoriteCity>, FavoritesStoreError> {
        let rows: Vec<(String, f64, f64, i64)> = sqlx::query_as(
            r#"
                SELECT city_name, latitude, longitude, added_at
                FROM favorite_cities
                WHERE account_id = ?
                ORDER BY added_at DESC, id DESC
            "#,
        )
        .bind(account_id.to_string())
        .fetch_all(&self.pool)
        .await
        .map_err(unexpected)?;

        rows.into_iter()
            .map(|(city_name, latitude, longitude, added_at)| {
                Ok(FavoriteCity {
                    account_id: *account_id,
                    city_name,
                    latitude,
                    longitude,
                    added_at: from_unix_seconds(added_at)
                        .map_err(FavoritesStoreError::UnexpectedError)?,
                })
            })
            .collect()
    }

    #[tracing::instrument(name = "Checking favorite in SQLite", skip_all)]
    async fn is_favorite(
        &self,
        account_id: &AccountId,
        city_name: &str,
    ) -> Result<bool, FavoritesStoreError> {
        let found: Option<i64> = sqlx::query_scalar(
            "SELECT 1 FROM favorite_cities WHERE account_id = ? AND city_name = ?",
        )
        .bind(account_id.to_string())
        .bind(city_name)
        .fetch_optional(&self.pool)
        .await
        .map_err(unexpected)?;

        Ok(found.is_some())
    }
}
