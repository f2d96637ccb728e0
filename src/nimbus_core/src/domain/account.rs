use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;

use chrono::{DateTime, Utc};
use regex::Regex;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

use crate::domain::{email::Email, password::PasswordHash, tokens::VerificationToken};

#[derive(Debug, Error, PartialEq, Eq)]
pub enum AccountError {
    #[error("Name is required")]
    MissingDisplayName,
    #[error("Invalid account id")]
    InvalidAccountId,
    #[error("Invalid theme: {0}")]
    InvalidTheme(String),
    #[error("Invalid language: {0}")]
    InvalidLanguage(String),
}

/// Opaque account identity, generated once at registration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AccountId(Uuid);

impl AccountId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    pub fn parse(value: &str) -> Result<Self, AccountError> {
        Uuid::parse_str(value)
            .map(Self)
            .map_err(|_| AccountError::InvalidAccountId)
    }
}

impl Default for AccountId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for AccountId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DisplayName(String);

impl DisplayName {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for DisplayName {
    type Error = AccountError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return Err(AccountError::MissingDisplayName);
        }
        Ok(Self(trimmed.to_owned()))
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    Light,
    #[default]
    Dark,
}

impl Theme {
    pub fn as_str(&self) -> &'static str {
        match self {
            Theme::Light => "light",
            Theme::Dark => "dark",
        }
    }
}

impl FromStr for Theme {
    type Err = AccountError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "light" => Ok(Theme::Light),
            "dark" => Ok(Theme::Dark),
            other => Err(AccountError::InvalidTheme(other.to_owned())),
        }
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

static LOCALE_CODE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[a-z]{2,3}(-[A-Za-z]{2,4})?$").expect("locale code pattern is valid")
});

/// Locale code used for geocoding results and page copy, e.g. `pt` or `en-US`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Language(String);

impl Language {
    pub const DEFAULT: &'static str = "pt";

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for Language {
    fn default() -> Self {
        Self(Self::DEFAULT.to_owned())
    }
}

impl TryFrom<String> for Language {
    type Error = AccountError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        if LOCALE_CODE.is_match(&value) {
            Ok(Self(value))
        } else {
            Err(AccountError::InvalidLanguage(value))
        }
    }
}

impl From<Language> for String {
    fn from(value: Language) -> Self {
        value.0
    }
}

/// A registered user together with credentials and preferences.
///
/// `verification_token` is `Some` only while `email_verified` is false.
#[derive(Debug, Clone)]
pub struct Account {
    pub id: AccountId,
    pub display_name: DisplayName,
    pub email: Email,
    pub password_hash: PasswordHash,
    pub theme: Theme,
    pub language: Language,
    pub email_verified: bool,
    pub verification_token: Option<VerificationToken>,
    pub created_at: DateTime<Utc>,
}

impl Account {
    /// A freshly registered, unverified account with default preferences.
    pub fn register(
        display_name: DisplayName,
        email: Email,
        password_hash: PasswordHash,
        verification_token: VerificationToken,
        now: DateTime<Utc>,
    ) -> Self {
        Self {
            id: AccountId::new(),
            display_name,
            email,
            password_hash,
            theme: Theme::default(),
            language: Language::default(),
            email_verified: false,
            verification_token: Some(verification_token),
            created_at: now,
        }
    }
}
