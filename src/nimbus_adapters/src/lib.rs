pub mod config;
pub mod crypto;
pub mod email;
pub mod persistence;
pub mod session;
pub mod weather;

pub use config::{AllowedOrigins, Settings};
pub use crypto::{Argon2PasswordHasher, JwtResetTokenSigner};
pub use email::{MockEmailClient, PostmarkEmailClient};
pub use persistence::{
    SqliteAccountStore, SqliteFavoritesStore, SqliteResetTokenStore, SqliteSearchHistoryStore,
    connect_sqlite, run_migrations,
};
pub use session::{SessionConfig, SessionError};
pub use weather::OpenMeteoClient;
