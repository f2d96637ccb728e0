use axum_extra::extract::{
    CookieJar,
    cookie::{Cookie, SameSite},
};
use chrono::Utc;
use jsonwebtoken::{DecodingKey, EncodingKey, Validation, decode, encode};
use nimbus_core::{AccountId, Email};
use secrecy::{ExposeSecret, Secret};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::config::constants::defaults::{SESSION_ENDED_COOKIE_NAME, SESSION_ENDED_TTL_IN_SECONDS};

#[derive(Clone)]
pub struct SessionConfig {
    pub cookie_name: String,
    pub secret: Secret<String>,
    /// Lifetime of a session token minted without "remember me".
    pub ttl_in_seconds: i64,
    pub remember_me_ttl_in_seconds: i64,
    pub last_email_cookie_name: String,
    pub last_email_ttl_in_seconds: i64,
    pub secure: bool,
    pub same_site: SameSite,
}

impl SessionConfig {
    pub fn as_bytes(&self) -> &[u8] {
        self.secret.expose_secret().as_bytes()
    }
}

#[derive(Debug, Error)]
pub enum SessionError {
    #[error("Missing session")]
    MissingToken,
    #[error("Invalid session")]
    InvalidToken,
    #[error("Token error: {0}")]
    TokenError(jsonwebtoken::errors::Error),
    #[error("Unexpected error")]
    UnexpectedError(String),
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Claims {
    pub sub: String,
    pub exp: usize,
}

pub fn extract_token<'a>(jar: &'a CookieJar, cookie_name: &str) -> Result<&'a str, SessionError> {
    match jar.get(cookie_name) {
        Some(cookie) if !cookie.value().is_empty() => Ok(cookie.value()),
        _ => Err(SessionError::MissingToken),
    }
}

/// Session cookie for a freshly authenticated account.
///
/// With `remember_me` the cookie outlives the browser for the extended
/// lifetime; otherwise it has no `Max-Age` and ends with the browser session.
pub fn generate_session_cookie(
    account_id: &AccountId,
    remember_me: bool,
    config: &SessionConfig,
) -> Result<Cookie<'static>, SessionError> {
    let ttl = if remember_me {
        config.remember_me_ttl_in_seconds
    } else {
        config.ttl_in_seconds
    };
    let token = generate_session_token(account_id, ttl, config.as_bytes())?;

    let mut cookie = create_session_cookie(token, config);
    if remember_me {
        cookie.set_max_age(time::Duration::seconds(ttl));
    }
    Ok(cookie)
}

// Create cookie and set the value to the passed-in token string
pub fn create_session_cookie(token: String, config: &SessionConfig) -> Cookie<'static> {
    Cookie::build((config.cookie_name.clone(), token))
        .path("/")
        .http_only(true)
        .secure(config.secure)
        .same_site(config.same_site)
        .build()
}

pub fn create_removal_cookie(config: &SessionConfig) -> Cookie<'static> {
    let mut cookie = create_session_cookie(String::new(), config);
    cookie.make_removal();
    cookie
}

/// Remembers the last email used to log in. Carries no authentication weight.
pub fn create_last_email_cookie(email: &Email, config: &SessionConfig) -> Cookie<'static> {
    Cookie::build((config.last_email_cookie_name.clone(), email.as_str().to_owned()))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .max_age(time::Duration::seconds(config.last_email_ttl_in_seconds))
        .build()
}

pub fn create_session_ended_cookie() -> Cookie<'static> {
    Cookie::build((SESSION_ENDED_COOKIE_NAME, "true"))
        .path("/")
        .same_site(SameSite::Lax)
        .max_age(time::Duration::seconds(SESSION_ENDED_TTL_IN_SECONDS))
        .build()
}

pub fn generate_session_token(
    account_id: &AccountId,
    token_ttl_seconds: i64,
    secret: &[u8],
) -> Result<String, SessionError> {
    let delta = chrono::Duration::try_seconds(token_ttl_seconds).ok_or(
        SessionError::UnexpectedError("Failed to create session duration".to_string()),
    )?;

    let exp = Utc::now()
        .checked_add_signed(delta)
        .ok_or(SessionError::UnexpectedError(
            "Duration out of range".to_string(),
        ))?
        .timestamp();

    let exp: usize = exp
        .try_into()
        .map_err(|_| SessionError::UnexpectedError("Failed to cast i64 to usize".to_string()))?;

    let claims = Claims {
        sub: account_id.to_string(),
        exp,
    };

    encode(
        &jsonwebtoken::Header::default(),
        &claims,
        &EncodingKey::from_secret(secret),
    )
    .map_err(SessionError::TokenError)
}

/// Decodes the session token and returns the account it is bound to.
pub fn validate_session_token(token: &str, config: &SessionConfig) -> Result<AccountId, SessionError> {
    let claims = decode::<Claims>(
        token,
        &DecodingKey::from_secret(config.as_bytes()),
        &Validation::default(),
    )
    .map(|data| data.claims)
    .map_err(SessionError::TokenError)?;

    AccountId::parse(&claims.sub).map_err(|_| SessionError::InvalidToken)
}

pub fn authenticate(jar: &CookieJar, config: &SessionConfig) -> Result<AccountId, SessionError> {
    let token = extract_token(jar, &config.cookie_name)?;
    validate_session_token(token, config)
}
