use argon2::{
    Algorithm, Argon2, Params, PasswordVerifier, Version,
    password_hash::{self, PasswordHasher as _, SaltString, rand_core},
};
use nimbus_core::{CredentialError, Password, PasswordHash, PasswordHasher};
use secrecy::{ExposeSecret, Secret};

/// Argon2id with a fresh random salt per hash. Hashing runs on the blocking pool.
#[derive(Debug, Clone, Default)]
pub struct Argon2PasswordHasher;

impl Argon2PasswordHasher {
    pub fn new() -> Self {
        Self
    }
}

fn argon2() -> Result<Argon2<'static>, String> {
    Ok(Argon2::new(
        Algorithm::Argon2id,
        Version::V0x13,
        Params::new(15000, 2, 1, None).map_err(|e| e.to_string())?,
    ))
}

#[async_trait::async_trait]
impl PasswordHasher for Argon2PasswordHasher {
    async fn hash_password(&self, password: &Password) -> Result<PasswordHash, CredentialError> {
        compute_password_hash(password.clone())
            .await
            .map(|hash| PasswordHash::new(hash.expose_secret().to_owned()))
            .map_err(CredentialError::HashingFailed)
    }

    async fn verify_password(
        &self,
        candidate: &Password,
        expected: &PasswordHash,
    ) -> Result<bool, CredentialError> {
        verify_password_hash(expected.as_ref().clone(), candidate.clone())
            .await
            .map_err(CredentialError::HashingFailed)
    }
}

#[tracing::instrument(name = "Verify password hash", skip_all)]
async fn verify_password_hash(
    expected_password_hash: Secret<String>,
    password_candidate: Password,
) -> Result<bool, String> {
    let current_span: tracing::Span = tracing::Span::current();
    tokio::task::spawn_blocking(move || {
        current_span.in_scope(|| {
            let expected_password_hash =
                password_hash::PasswordHash::new(expected_password_hash.expose_secret())
                    .map_err(|e| e.to_string())?;

            // The verifier compares digests in constant time.
            match argon2()?.verify_password(
                password_candidate.as_ref().expose_secret().as_bytes(),
                &expected_password_hash,
            ) {
                Ok(()) => Ok(true),
                Err(password_hash::Error::Password) => Ok(false),
                Err(e) => Err(e.to_string()),
            }
        })
    })
    .await
    .map_err(|e| e.to_string())?
}

#[tracing::instrument(name = "Computing password hash", skip_all)]
async fn compute_password_hash(password: Password) -> Result<Secret<String>, String> {
    let current_span: tracing::Span = tracing::Span::current();

    tokio::task::spawn_blocking(move || {
        current_span.in_scope(move || {
            let salt: SaltString = SaltString::generate(rand_core::OsRng);
            argon2()?
                .hash_password(password.as_ref().expose_secret().as_bytes(), &salt)
                .map(|h| Secret::from(h.to_string()))
                .map_err(|e| e.to_string())
        })
    })
    .await
    .map_err(|e| e.to_string())?
}
