//! Password hashing and token issuance.
//!
//! A reset token is checked twice: its signature and embedded expiry through
//! the [`ResetTokenSigner`], then its server-side record through the
//! [`ResetTokenStore`]. The signature alone cannot be revoked, so a token the
//! store marks used (or expired) is rejected even when it still verifies.

use chrono::{DateTime, Duration, Utc};
use nimbus_core::{
    AccountId, CredentialError, Password, PasswordHash, PasswordHasher,
    RESET_TOKEN_TTL_SECONDS, ResetToken, ResetTokenError, ResetTokenRecord, ResetTokenSigner,
    ResetTokenState, ResetTokenStore, ResetTokenStoreError, VerificationToken,
};

/// Why a reset token was refused. Never shown to the user verbatim.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RejectionReason {
    InvalidSignature,
    Expired,
    Used,
    Unknown,
}

#[derive(Debug, thiserror::Error)]
pub enum CredentialServiceError {
    #[error("Reset token rejected: {0:?}")]
    Rejected(RejectionReason),
    #[error("Credential error: {0}")]
    CredentialError(#[from] CredentialError),
    #[error("Signing error: {0}")]
    SigningError(ResetTokenError),
    #[error("Reset token store error: {0}")]
    ResetTokenStoreError(#[from] ResetTokenStoreError),
}

#[derive(Clone, Copy)]
pub struct CredentialService<'a> {
    hasher: &'a dyn PasswordHasher,
    signer: &'a dyn ResetTokenSigner,
    reset_tokens: &'a dyn ResetTokenStore,
}

impl<'a> CredentialService<'a> {
    pub fn new(
        hasher: &'a dyn PasswordHasher,
        signer: &'a dyn ResetTokenSigner,
        reset_tokens: &'a dyn ResetTokenStore,
    ) -> Self {
        Self {
            hasher,
            signer,
            reset_tokens,
        }
    }

    #[tracing::instrument(name = "CredentialService::hash_password", skip_all)]
    pub async fn hash_password(&self, password: &Password) -> Result<PasswordHash, CredentialError> {
        self.hasher.hash_password(password).await
    }

    #[tracing::instrument(name = "CredentialService::verify_password", skip_all)]
    pub async fn verify_password(
        &self,
        candidate: &Password,
        expected: &PasswordHash,
    ) -> Result<bool, CredentialError> {
        self.hasher.verify_password(candidate, expected).await
    }

    pub fn issue_verification_token(&self) -> VerificationToken {
        VerificationToken::generate()
    }

    /// Signs a token for `account_id` expiring one hour from `now` and records it.
    #[tracing::instrument(name = "CredentialService::issue_reset_token", skip(self))]
    pub async fn issue_reset_token(
        &self,
        account_id: AccountId,
        now: DateTime<Utc>,
    ) -> Result<ResetToken, CredentialServiceError> {
        let expires_at = now + Duration::seconds(RESET_TOKEN_TTL_SECONDS);
        let token = self
            .signer
            .sign(&account_id, expires_at)
            .map_err(CredentialServiceError::SigningError)?;

        let record = ResetTokenRecord::issue(account_id, token.clone(), now);
        self.reset_tokens.add_token(&record).await?;

        Ok(token)
    }

    /// Hashes `new_password` and consumes `token` together with the password
    /// change. A token already redeemed or expired surfaces as `Used`/`Expired`.
    #[tracing::instrument(name = "CredentialService::redeem_reset_token", skip_all)]
    pub async fn redeem_reset_token(
        &self,
        token: &ResetToken,
        new_password: &Password,
        now: DateTime<Utc>,
    ) -> Result<(), CredentialServiceError> {
        let new_hash = self.hasher.hash_password(new_password).await?;

        match self.reset_tokens.redeem(token, &new_hash, now).await {
            Ok(()) => Ok(()),
            Err(ResetTokenStoreError::TokenUnavailable) => {
                let reason = match self.reset_tokens.find_token(token).await? {
                    Some(record) if record.state_at(now) == ResetTokenState::Expired => {
                        RejectionReason::Expired
                    }
                    Some(_) => RejectionReason::Used,
                    None => RejectionReason::Unknown,
                };
                Err(CredentialServiceError::Rejected(reason))
            }
            Err(ResetTokenStoreError::TokenNotFound) => {
                Err(CredentialServiceError::Rejected(RejectionReason::Unknown))
            }
            Err(e) => Err(e.into()),
        }
    }

    /// Returns the account the token was issued for, or why it is refused.
    #[tracing::instrument(name = "CredentialService::verify_reset_token", skip_all)]
    pub async fn verify_reset_token(
        &self,
        token: &ResetToken,
        now: DateTime<Utc>,
    ) -> Result<AccountId, CredentialServiceError> {
        let claims = self.signer.verify(token).map_err(|e| match e {
            ResetTokenError::Expired => CredentialServiceError::Rejected(RejectionReason::Expired),
            _ => CredentialServiceError::Rejected(RejectionReason::InvalidSignature),
        })?;

        if claims.expires_at <= now {
            return Err(CredentialServiceError::Rejected(RejectionReason::Expired));
        }

        let record = self
            .reset_tokens
            .find_token(token)
            .await?
            .ok_or(CredentialServiceError::Rejected(RejectionReason::Unknown))?;

        if record.account_id != claims.account_id {
            return Err(CredentialServiceError::Rejected(
                RejectionReason::InvalidSignature,
            ));
        }

        match record.state_at(now) {
            ResetTokenState::Issued => Ok(claims.account_id),
            ResetTokenState::Used => Err(CredentialServiceError::Rejected(RejectionReason::Used)),
            ResetTokenState::Expired => {
                Err(CredentialServiceError::Rejected(RejectionReason::Expired))
            }
        }
    }
}
