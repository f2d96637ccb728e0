use async_trait::async_trait;
use chrono::{DateTime, Utc};
use thiserror::Error;

use crate::domain::{
    account::{AccountId, Language},
    email::{Email, EmailMessage},
    forecast::{GeoLocation, RawForecast},
    password::{Password, PasswordHash},
    tokens::{ResetClaims, ResetToken},
};

/// Outbound transactional email.
#[async_trait]
pub trait EmailClient: Send + Sync {
    async fn send_email(&self, recipient: &Email, message: &EmailMessage) -> Result<(), String>;
}

#[derive(Debug, Error)]
pub enum CredentialError {
    #[error("Password hashing failed: {0}")]
    HashingFailed(String),
}

/// One-way salted password hashing.
#[async_trait]
pub trait PasswordHasher: Send + Sync {
    /// Hashes with a fresh salt: the same input yields a different hash on every call.
    async fn hash_password(&self, password: &Password) -> Result<PasswordHash, CredentialError>;
    /// `Ok(false)` on mismatch; comparison does not leak the mismatch position.
    async fn verify_password(
        &self,
        candidate: &Password,
        expected: &PasswordHash,
    ) -> Result<bool, CredentialError>;
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ResetTokenError {
    #[error("Reset token expired")]
    Expired,
    #[error("Invalid reset token")]
    Invalid,
    #[error("Failed to sign reset token: {0}")]
    SigningFailed(String),
}

/// Mints and checks the self-describing signed half of a password-reset token.
pub trait ResetTokenSigner: Send + Sync {
    fn sign(
        &self,
        account_id: &AccountId,
        expires_at: DateTime<Utc>,
    ) -> Result<ResetToken, ResetTokenError>;
    fn verify(&self, token: &ResetToken) -> Result<ResetClaims, ResetTokenError>;
}

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum WeatherError {
    #[error("City not found")]
    CityNotFound,
    #[error("Weather unavailable: {0}")]
    Unavailable(String),
}

/// Geocoding and forecast upstream.
#[async_trait]
pub trait WeatherGateway: Send + Sync {
    async fn geocode(&self, city: &str, language: &Language)
    -> Result<GeoLocation, WeatherError>;
    async fn fetch_forecast(
        &self,
        latitude: f64,
        longitude: f64,
    ) -> Result<RawForecast, WeatherError>;
}
