use std::sync::Arc;

use nimbus_adapters::SessionConfig;
use nimbus_application::{CredentialService, Notifier};
use nimbus_core::{
    AccountStore, EmailClient, FavoritesStore, PasswordHasher, ResetTokenSigner, ResetTokenStore,
    SearchHistoryStore, WeatherGateway,
};

/// Everything a handler may need. Cloned per request; all fields are shared.
#[derive(Clone)]
pub struct AppState {
    pub accounts: Arc<dyn AccountStore>,
    pub reset_tokens: Arc<dyn ResetTokenStore>,
    pub history: Arc<dyn SearchHistoryStore>,
    pub favorites: Arc<dyn FavoritesStore>,
    pub hasher: Arc<dyn PasswordHasher>,
    pub signer: Arc<dyn ResetTokenSigner>,
    pub email_client: Arc<dyn EmailClient>,
    pub weather: Arc<dyn WeatherGateway>,
    pub session: Arc<SessionConfig>,
    /// Absolute origin for links in outgoing email.
    pub base_url: Arc<str>,
}

impl AppState {
    pub fn credentials(&self) -> CredentialService<'_> {
        CredentialService::new(&*self.hasher, &*self.signer, &*self.reset_tokens)
    }

    pub fn notifier(&self) -> Notifier<'_> {
        Notifier::new(&*self.email_client, &self.base_url)
    }
}
