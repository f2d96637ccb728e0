use nimbus_core::{
    Account, AccountId, AccountStore, AccountStoreError, DisplayName, Email, Language,
    PasswordHash, Theme, VerificationToken,
};
use secrecy::{ExposeSecret, Secret};
use sqlx::SqlitePool;

use super::from_unix_seconds;

const ACCOUNT_COLUMNS: &str = "id, display_name, email, password_hash, theme, language, \
     email_verified, email_verification_token, created_at";

pub struct SqliteAccountStore {
    pool: SqlitePool,
}

impl SqliteAccountStore {
    pub fn new(pool: SqlitePool) -> Self {
        SqliteAccountStore { pool }
    }
}

#[derive(sqlx::FromRow)]
struct AccountRow {
    id: String,
    display_name: String,
    email: String,
    password_hash: String,
    theme: String,
    language: String,
    email_verified: bool,
    email_verification_token: Option<String>,
    created_at: i64,
}

impl TryFrom<AccountRow> for Account {
    type Error = AccountStoreError;

    fn try_from(row: AccountRow) -> Result<Self, Self::Error> {
        let corrupt = |e: String| AccountStoreError::UnexpectedError(e);

        Ok(Account {
            id: AccountId::parse(&row.id).map_err(|e| corrupt(e.to_string()))?,
            display_name: DisplayName::try_from(row.display_name)
                .map_err(|e| corrupt(e.to_string()))?,
            email: Email::try_from(Secret::from(row.email))
                .map_err(|e| corrupt(e.to_string()))?,
            password_hash: PasswordHash::new(row.password_hash),
            theme: row.theme.parse::<Theme>().map_err(|e| corrupt(e.to_string()))?,
            language: Language::try_from(row.language).map_err(|e| corrupt(e.to_string()))?,
            email_verified: row.email_verified,
            verification_token: row
                .email_verification_token
                .map(VerificationToken::parse)
                .transpose()
                .map_err(|e| corrupt(e.to_string()))?,
            created_at: from_unix_seconds(row.created_at).map_err(corrupt)?,
        })
    }
}

fn unexpected(e: sqlx::Error) -> AccountStoreError {
    AccountStoreError::UnexpectedError(e.to_string())
}

fn require_row(rows_affected: u64) -> Result<(), AccountStoreError> {
    if rows_affected == 0 {
        return Err(AccountStoreError::AccountNotFound);
    }
    Ok(())
}

#[async_trait::async_trait]
impl AccountStore for SqliteAccountStore {
    #[tracing::instrument(name = "Adding account to SQLite", skip_all)]
    async fn add_account(&self, account: &Account) -> Result<(), AccountStoreError> {
        let query = sqlx::query(
            r#"
                INSERT INTO accounts (id, display_name, email, password_hash, theme, language,
                                      email_verified, email_verification_token, created_at)
                VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(account.id.to_string())
        .bind(account.display_name.as_str())
        .bind(account.email.as_str())
        .bind(account.password_hash.as_ref().expose_secret())
        .bind(account.theme.as_str())
        .bind(account.language.as_str())
        .bind(account.email_verified)
        .bind(account.verification_token.as_ref().map(|t| t.as_str()))
        .bind(account.created_at.timestamp());

        query.execute(&self.pool).await.map_err(|e| {
            if let Some(db_err) = e.as_database_error() {
                if db_err.is_unique_violation() {
                    return AccountStoreError::EmailAlreadyRegistered;
                }
            }
            unexpected(e)
        })?;

        Ok(())
    }

    #[tracing::instrument(name = "Retrieving account by email from SQLite", skip_all)]
    async fn find_by_email(&self, email: &Email) -> Result<Option<Account>, AccountStoreError> {
        let row = sqlx::query_as::<_, AccountRow>(&format!(
            "SELECT {ACCOUNT_COLUMNS} FROM accounts WHERE email = ?"
        ))
        .bind(email.as_str())
        .fetch_optional(&self.pool)
        .await
        .map_err(unexpected)?;

        row.map(Account::try_from).transpose()
    }

    #[tracing::instrument(name = "Retrieving account by id from SQLite", skip_all)]
    async fn find_by_id(&self, id: &AccountId) -> Result<Option<Account>, AccountStoreError> {
        let row = sqlx::query_as::<_, AccountRow>(&format!(
            "SELECT {ACCOUNT_COLUMNS} FROM accounts WHERE id = ?"
        ))
        .bind(id.to_string())
        .fetch_optional(&self.pool)
        .await
        .map_err(unexpected)?;

        row.map(Account::try_from).transpose()
    }

    #[tracing::instrument(name = "Verifying email in SQLite", skip_all)]
    async fn verify_email(
        &self,
        token: &VerificationToken,
    ) -> Result<Option<AccountId>, AccountStoreError> {
        let id: Option<String> = sqlx::query_scalar(
            r#"
                UPDATE accounts
                SET email_verified = 1, email_verification_token = NULL
                WHERE email_verification_token = ?
                RETURNING id
            "#,
        )
        .bind(token.as_str())
        .fetch_optional(&self.pool)
        .await
        .map_err(unexpected)?;

        id.map(|id| AccountId::parse(&id))
            .transpose()
            .map_err(|e| AccountStoreError::UnexpectedError(e.to_string()))
    }

    #[tracing::instrument(name = "Updating theme in SQLite", skip_all)]
    async fn update_theme(&self, id: &AccountId, theme: Theme) -> Result<(), AccountStoreError> {
        let result = sqlx::query("UPDATE accounts SET theme = ? WHERE id = ?")
            .bind(theme.as_str())
            .bind(id.to_string())
            .execute(&self.pool)
            .await
            .map_err(unexpected)?;

        require_row(result.rows_affected())
    }

    #[tracing::instrument(name = "Updating language in SQLite", skip_all)]
    async fn update_language(
        &self,
        id: &AccountId,
        language: &Language,
    ) -> Result<(), AccountStoreError> {
        let result = sqlx::query("UPDATE accounts SET language = ? WHERE id = ?")
            .bind(language.as_str())
            .bind(id.to_string())
            .execute(&self.pool)
            .await
            .map_err(unexpected)?;

        require_row(result.rows_affected())
    }

    #[tracing::instrument(name = "Deleting account from SQLite", skip_all)]
    async fn delete_account(&self, id: &AccountId) -> Result<(), AccountStoreError> {
        let result = sqlx::query("DELETE FROM accounts WHERE id = ?")
            .bind(id.to_string())
            .execute(&self.pool)
            .await
            .map_err(unexpected)?;

        require_row(result.rows_affected())
    }
}
