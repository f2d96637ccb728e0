use chrono::Utc;
use nimbus_core::{
    Account, AccountStore, AccountStoreError, CredentialError, DisplayName, Email, EmailError,
    Password,
};
use secrecy::{ExposeSecret, Secret};

use crate::{credentials::CredentialService, notifications::Notifier};

/// Raw registration form input.
#[derive(Debug)]
pub struct Registration {
    pub display_name: String,
    pub email: Secret<String>,
    pub password: Secret<String>,
}

#[derive(Debug, thiserror::Error)]
pub enum RegisterError {
    #[error("Please fill in all fields.")]
    MissingFields,
    #[error("Invalid email.")]
    InvalidEmail,
    #[error("An account with this email already exists.")]
    EmailAlreadyRegistered,
    #[error("Account store error: {0}")]
    AccountStoreError(AccountStoreError),
    #[error("Credential error: {0}")]
    CredentialError(#[from] CredentialError),
}

impl From<AccountStoreError> for RegisterError {
    fn from(e: AccountStoreError) -> Self {
        match e {
            AccountStoreError::EmailAlreadyRegistered => Self::EmailAlreadyRegistered,
            other => Self::AccountStoreError(other),
        }
    }
}

/// Register use case - creates an unverified account and mails its verification link
pub struct RegisterUseCase<'a, A>
where
    A: AccountStore + ?Sized,
{
    accounts: &'a A,
    credentials: CredentialService<'a>,
    notifier: Notifier<'a>,
}

impl<'a, A> RegisterUseCase<'a, A>
where
    A: AccountStore + ?Sized,
{
    pub fn new(accounts: &'a A, credentials: CredentialService<'a>, notifier: Notifier<'a>) -> Self {
        Self {
            accounts,
            credentials,
            notifier,
        }
    }

    #[tracing::instrument(name = "RegisterUseCase::execute", skip_all)]
    pub async fn execute(&self, registration: Registration) -> Result<Account, RegisterError> {
        if registration.display_name.trim().is_empty()
            || registration.email.expose_secret().trim().is_empty()
            || registration.password.expose_secret().is_empty()
        {
            return Err(RegisterError::MissingFields);
        }

        let display_name =
            DisplayName::try_from(registration.display_name).map_err(|_| RegisterError::MissingFields)?;
        let email = Email::try_from(registration.email).map_err(|e| match e {
            EmailError::Missing => RegisterError::MissingFields,
            EmailError::Malformed => RegisterError::InvalidEmail,
        })?;
        let password =
            Password::try_from(registration.password).map_err(|_| RegisterError::MissingFields)?;

        if self.accounts.find_by_email(&email).await?.is_some() {
            return Err(RegisterError::EmailAlreadyRegistered);
        }

        let password_hash = self.credentials.hash_password(&password).await?;
        let verification_token = self.credentials.issue_verification_token();
        let account = Account::register(
            display_name,
            email,
            password_hash,
            verification_token.clone(),
            Utc::now(),
        );

        // The unique index still guards against a concurrent registration slipping past the lookup.
        self.accounts.add_account(&account).await?;
        tracing::info!(account_id = %account.id, "account registered");

        self.notifier
            .send_verification(&account.email, account.display_name.as_str(), &verification_token)
            .await;

        Ok(account)
    }
}
