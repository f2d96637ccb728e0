use chrono::{DateTime, Duration, Utc};
use rand::{Rng, distr::Alphanumeric};
use secrecy::{ExposeSecret, Secret};
use thiserror::Error;

use crate::domain::account::AccountId;

/// Password-reset tokens are valid for one hour after issuance.
pub const RESET_TOKEN_TTL_SECONDS: i64 = 60 * 60;

const VERIFICATION_TOKEN_LENGTH: usize = 48;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum TokenError {
    #[error("Token is empty")]
    Empty,
}

/// Opaque, single-use email verification token.
#[derive(Debug, Clone)]
pub struct VerificationToken(Secret<String>);

impl VerificationToken {
    /// Draws a fresh token from the thread-local CSPRNG.
    pub fn generate() -> Self {
        let token: String = rand::rng()
            .sample_iter(&Alphanumeric)
            .take(VERIFICATION_TOKEN_LENGTH)
            .map(char::from)
            .collect();
        Self(Secret::new(token))
    }

    pub fn parse(value: String) -> Result<Self, TokenError> {
        if value.trim().is_empty() {
            return Err(TokenError::Empty);
        }
        Ok(Self(Secret::new(value)))
    }

    pub fn as_str(&self) -> &str {
        self.0.expose_secret()
    }
}

impl PartialEq for VerificationToken {
    fn eq(&self, other: &Self) -> bool {
        self.as_str() == other.as_str()
    }
}

/// Signed, self-describing password-reset token as it travels in the reset link.
#[derive(Debug, Clone)]
pub struct ResetToken(Secret<String>);

impl ResetToken {
    pub fn parse(value: String) -> Result<Self, TokenError> {
        if value.trim().is_empty() {
            return Err(TokenError::Empty);
        }
        Ok(Self(Secret::new(value)))
    }

    pub fn as_str(&self) -> &str {
        self.0.expose_secret()
    }
}

impl PartialEq for ResetToken {
    fn eq(&self, other: &Self) -> bool {
        self.as_str() == other.as_str()
    }
}

/// What a reset token's signature vouches for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResetClaims {
    pub account_id: AccountId,
    pub expires_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResetTokenState {
    Issued,
    Used,
    Expired,
}

/// Server-side record of an issued reset token.
#[derive(Debug, Clone)]
pub struct ResetTokenRecord {
    pub account_id: AccountId,
    pub token: ResetToken,
    pub created_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
    pub used: bool,
}

impl ResetTokenRecord {
    pub fn issue(account_id: AccountId, token: ResetToken, now: DateTime<Utc>) -> Self {
        Self {
            account_id,
            token,
            created_at: now,
            expires_at: now + Duration::seconds(RESET_TOKEN_TTL_SECONDS),
            used: false,
        }
    }

    /// Expiry is derived at check time, never stored as a state.
    pub fn state_at(&self, now: DateTime<Utc>) -> ResetTokenState {
        if self.used {
            ResetTokenState::Used
        } else if now >= self.expires_at {
            ResetTokenState::Expired
        } else {
            ResetTokenState::Issued
        }
    }
}
