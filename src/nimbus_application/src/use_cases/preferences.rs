use nimbus_core::{AccountError, AccountId, AccountStore, AccountStoreError, Language, Theme};

#[derive(Debug, thiserror::Error)]
pub enum UpdatePreferencesError {
    #[error("{0}")]
    InvalidPreference(#[from] AccountError),
    #[error("Account store error: {0}")]
    AccountStoreError(#[from] AccountStoreError),
}

/// Update preferences use case - theme and language of the signed-in account
pub struct UpdatePreferencesUseCase<'a, A>
where
    A: AccountStore + ?Sized,
{
    accounts: &'a A,
}

impl<'a, A> UpdatePreferencesUseCase<'a, A>
where
    A: AccountStore + ?Sized,
{
    pub fn new(accounts: &'a A) -> Self {
        Self { accounts }
    }

    /// An omitted theme resets to the default.
    #[tracing::instrument(name = "UpdatePreferencesUseCase::update_theme", skip(self))]
    pub async fn update_theme(
        &self,
        account_id: AccountId,
        theme: Option<String>,
    ) -> Result<Theme, UpdatePreferencesError> {
        let theme = match theme {
            Some(value) => value.parse::<Theme>()?,
            None => Theme::default(),
        };
        self.accounts.update_theme(&account_id, theme).await?;
        Ok(theme)
    }

    /// An omitted language resets to the default.
    #[tracing::instrument(name = "UpdatePreferencesUseCase::update_language", skip(self))]
    pub async fn update_language(
        &self,
        account_id: AccountId,
        language: Option<String>,
    ) -> Result<Language, UpdatePreferencesError> {
        let language = match language {
            Some(value) => Language::try_from(value)?,
            None => Language::default(),
        };
        self.accounts.update_language(&account_id, &language).await?;
        Ok(language)
    }
}
