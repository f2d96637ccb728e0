use chrono::{DateTime, Utc};
use jsonwebtoken::{
    Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode, errors::ErrorKind,
};
use nimbus_core::{AccountId, ResetClaims, ResetToken, ResetTokenError, ResetTokenSigner};
use secrecy::{ExposeSecret, Secret};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Serialize, Deserialize)]
struct Claims {
    sub: String,
    exp: usize,
    /// Makes two tokens issued in the same second for the same account distinct.
    jti: String,
}

/// HS256 signer for password-reset links, keyed separately from sessions.
#[derive(Clone)]
pub struct JwtResetTokenSigner {
    secret: Secret<String>,
}

impl JwtResetTokenSigner {
    pub fn new(secret: Secret<String>) -> Self {
        Self { secret }
    }

    fn validation() -> Validation {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = 0;
        validation
    }
}

impl ResetTokenSigner for JwtResetTokenSigner {
    fn sign(
        &self,
        account_id: &AccountId,
        expires_at: DateTime<Utc>,
    ) -> Result<ResetToken, ResetTokenError> {
        let exp: usize = expires_at
            .timestamp()
            .try_into()
            .map_err(|_| ResetTokenError::SigningFailed("expiry before epoch".to_owned()))?;
        let claims = Claims {
            sub: account_id.to_string(),
            exp,
            jti: Uuid::new_v4().to_string(),
        };

        let token = encode(
            &Header::new(Algorithm::HS256),
            &claims,
            &EncodingKey::from_secret(self.secret.expose_secret().as_bytes()),
        )
        .map_err(|e| ResetTokenError::SigningFailed(e.to_string()))?;

        ResetToken::parse(token).map_err(|e| ResetTokenError::SigningFailed(e.to_string()))
    }

    fn verify(&self, token: &ResetToken) -> Result<ResetClaims, ResetTokenError> {
        let claims = decode::<Claims>(
            token.as_str(),
            &DecodingKey::from_secret(self.secret.expose_secret().as_bytes()),
            &Self::validation(),
        )
        .map(|data| data.claims)
        .map_err(|e| match e.kind() {
            ErrorKind::ExpiredSignature => ResetTokenError::Expired,
            _ => ResetTokenError::Invalid,
        })?;

        let account_id = AccountId::parse(&claims.sub).map_err(|_| ResetTokenError::Invalid)?;
        let expires_at = i64::try_from(claims.exp)
            .ok()
            .and_then(|exp| DateTime::from_timestamp(exp, 0))
            .ok_or(ResetTokenError::Invalid)?;

        Ok(ResetClaims {
            account_id,
            expires_at,
        })
    }
}
