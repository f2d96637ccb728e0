use std::sync::Arc;

use nimbus_adapters::{
    Argon2PasswordHasher, JwtResetTokenSigner, OpenMeteoClient, PostmarkEmailClient, Settings,
    SqliteAccountStore, SqliteFavoritesStore, SqliteResetTokenStore, SqliteSearchHistoryStore,
    connect_sqlite, run_migrations,
};
use nimbus_axum::AppState;
use nimbus_core::{Email, EmailClient};
use secrecy::{ExposeSecret, Secret};
use sqlx::SqlitePool;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum StartupError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
    #[error("Migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),
    #[error("HTTP client error: {0}")]
    HttpClient(#[from] reqwest::Error),
    #[error("Invalid sender address: {0}")]
    InvalidSender(String),
}

/// Opens the configured database and brings its schema up to date.
pub async fn configure_sqlite(settings: &Settings) -> Result<SqlitePool, StartupError> {
    let pool = connect_sqlite(
        settings.database.url.expose_secret(),
        settings.database.max_connections,
    )
    .await?;
    run_migrations(&pool).await?;
    Ok(pool)
}

pub fn configure_postmark(settings: &Settings) -> Result<PostmarkEmailClient, StartupError> {
    let http_client = reqwest::Client::builder()
        .timeout(settings.email_client.timeout())
        .build()?;
    let sender = Email::try_from(Secret::new(settings.email_client.sender.clone()))
        .map_err(|e| StartupError::InvalidSender(e.to_string()))?;

    Ok(PostmarkEmailClient::new(
        settings.email_client.base_url.clone(),
        sender,
        settings.email_client.auth_token.clone(),
        http_client,
    ))
}

/// Wires every adapter into the state the handlers share.
pub fn build_state(
    settings: &Settings,
    pool: SqlitePool,
    email_client: Arc<dyn EmailClient>,
) -> Result<AppState, StartupError> {
    let weather_http_client = reqwest::Client::builder()
        .timeout(settings.weather.timeout())
        .build()?;

    Ok(AppState {
        accounts: Arc::new(SqliteAccountStore::new(pool.clone())),
        reset_tokens: Arc::new(SqliteResetTokenStore::new(pool.clone())),
        history: Arc::new(SqliteSearchHistoryStore::new(pool.clone())),
        favorites: Arc::new(SqliteFavoritesStore::new(pool)),
        hasher: Arc::new(Argon2PasswordHasher::new()),
        signer: Arc::new(JwtResetTokenSigner::new(settings.reset_token.secret.clone())),
        email_client,
        weather: Arc::new(OpenMeteoClient::new(
            settings.weather.geocoding_url.clone(),
            settings.weather.forecast_url.clone(),
            weather_http_client,
        )),
        session: Arc::new(settings.session_config()),
        base_url: Arc::from(settings.application.base_url.as_str()),
    })
}
