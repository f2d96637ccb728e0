use chrono::{DateTime, Utc};
use nimbus_core::{
    AccountId, PasswordHash, ResetToken, ResetTokenRecord, ResetTokenStore, ResetTokenStoreError,
};
use secrecy::ExposeSecret;
use sqlx::SqlitePool;

use super::from_unix_seconds;

pub struct SqliteResetTokenStore {
    pool: SqlitePool,
}

impl SqliteResetTokenStore {
    pub fn new(pool: SqlitePool) -> Self {
        SqliteResetTokenStore { pool }
    }
}

#[derive(sqlx::FromRow)]
struct ResetTokenRow {
    account_id: String,
    token: String,
    created_at: i64,
    expires_at: i64,
    used: bool,
}

impl TryFrom<ResetTokenRow> for ResetTokenRecord {
    type Error = ResetTokenStoreError;

    fn try_from(row: ResetTokenRow) -> Result<Self, Self::Error> {
        let corrupt = |e: String| ResetTokenStoreError::UnexpectedError(e);

        Ok(ResetTokenRecord {
            account_id: AccountId::parse(&row.account_id).map_err(|e| corrupt(e.to_string()))?,
            token: ResetToken::parse(row.token).map_err(|e| corrupt(e.to_string()))?,
            created_at: from_unix_seconds(row.created_at).map_err(corrupt)?,
            expires_at: from_unix_seconds(row.expires_at).map_err(corrupt)?,
            used: row.used,
        })
    }
}

fn unexpected(e: sqlx::Error) -> ResetTokenStoreError {
    ResetTokenStoreError::UnexpectedError(e.to_string())
}

#[async_trait::async_trait]
impl ResetTokenStore for SqliteResetTokenStore {
    #[tracing::instrument(name = "Storing reset token in SQLite", skip_all)]
    async fn add_token(&self, record: &ResetTokenRecord) -> Result<(), ResetTokenStoreError> {
        sqlx::query(
            r#"
                INSERT INTO password_reset_tokens (account_id, token, created_at, expires_at, used)
                VALUES (?, ?, ?, ?, ?)
            "#,
        )
        .bind(record.account_id.to_string())
        .bind(record.token.as_str())
        .bind(record.created_at.timestamp())
        .bind(record.expires_at.timestamp())
        .bind(record.used)
        .execute(&self.pool)
        .await
        .map_err(unexpected)?;

        Ok(())
    }

    #[tracing::instrument(name = "Retrieving reset token from SQLite", skip_all)]
    async fn find_token(
        &self,
        token: &ResetToken,
    ) -> Result<Option<ResetTokenRecord>, ResetTokenStoreError> {
        let row = sqlx::query_as::<_, ResetTokenRow>(
            r#"
                SELECT account_id, token, created_at, expires_at, used
                FROM password_reset_tokens
                WHERE token = ?
            "#,
        )
        .bind(token.as_str())
        .fetch_optional(&self.pool)
        .await
        .map_err(unexpected)?;

        row.map(ResetTokenRecord::try_from).transpose()
    }

    #[tracing::instrument(name = "Redeeming reset token in SQLite", skip_all)]
    async fn redeem(
        &self,
        token: &ResetToken,
        new_password_hash: &PasswordHash,
        now: DateTime<Utc>,
    ) -> Result<(), ResetTokenStoreError> {
        let mut tx = self.pool.begin().await.map_err(unexpected)?;

        // The guarded update is the single point where a token flips to used.
        let account_id: Option<String> = sqlx::query_scalar(
            r#"
                UPDATE password_reset_tokens
                SET used = 1
                WHERE token = ? AND used = 0 AND expires_at > ?
                RETURNING account_id
            "#,
        )
        .bind(token.as_str())
        .bind(now.timestamp())
        .fetch_optional(&mut *tx)
        .await
        .map_err(unexpected)?;

        let Some(account_id) = account_id else {
            let exists: Option<i64> =
                sqlx::query_scalar("SELECT 1 FROM password_reset_tokens WHERE token = ?")
                    .bind(token.as_str())
                    .fetch_optional(&mut *tx)
                    .await
                    .map_err(unexpected)?;
            return Err(match exists {
                Some(_) => ResetTokenStoreError::TokenUnavailable,
                None => ResetTokenStoreError::TokenNotFound,
            });
        };

        let updated = sqlx::query("UPDATE accounts SET password_hash = ? WHERE id = ?")
            .bind(new_password_hash.as_ref().expose_secret())
            .bind(&account_id)
            .execute(&mut *tx)
            .await
            .map_err(unexpected)?;

        if updated.rows_affected() == 0 {
            return Err(ResetTokenStoreError::UnexpectedError(format!(
                "reset token owner {account_id} has no account"
            )));
        }

        tx.commit().await.map_err(unexpected)?;
        Ok(())
    }
}
