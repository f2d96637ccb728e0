use std::time::Duration;

use axum_extra::extract::cookie::SameSite;
use config::{Config, ConfigError, Environment, File};
use http::HeaderValue;
use secrecy::Secret;
use serde::Deserialize;

use crate::config::constants::{defaults, env};
use crate::session::SessionConfig;

#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub application: ApplicationSettings,
    pub database: DatabaseSettings,
    pub session: SessionSettings,
    pub reset_token: ResetTokenSettings,
    pub weather: WeatherSettings,
    pub email_client: EmailClientSettings,
    #[serde(default)]
    pub allowed_origins: Option<AllowedOrigins>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ApplicationSettings {
    pub host: String,
    pub port: u16,
    /// Absolute origin used to build links in outgoing email.
    pub base_url: String,
    pub assets_dir: String,
}

impl ApplicationSettings {
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseSettings {
    pub url: Secret<String>,
    pub max_connections: u32,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SessionSettings {
    pub cookie_name: String,
    pub secret: Secret<String>,
    pub ttl_in_seconds: i64,
    pub remember_me_ttl_in_seconds: i64,
    pub last_email_cookie_name: String,
    pub last_email_ttl_in_seconds: i64,
    /// Off only for plain-http local runs and tests.
    pub secure_cookies: bool,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ResetTokenSettings {
    pub secret: Secret<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct WeatherSettings {
    pub geocoding_url: String,
    pub forecast_url: String,
    pub timeout_in_millis: u64,
}

impl WeatherSettings {
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_in_millis)
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct EmailClientSettings {
    pub base_url: String,
    pub sender: String,
    pub auth_token: Secret<String>,
    pub timeout_in_millis: u64,
}

impl EmailClientSettings {
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_in_millis)
    }
}

/// Origins permitted to make credentialed cross-origin requests.
///
/// Accepts either a list or a single comma-separated string, so it can be set
/// from one environment variable.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(from = "OriginsRepr")]
pub struct AllowedOrigins(Vec<String>);

#[derive(Deserialize)]
#[serde(untagged)]
enum OriginsRepr {
    List(Vec<String>),
    Joined(String),
}

impl From<OriginsRepr> for AllowedOrigins {
    fn from(repr: OriginsRepr) -> Self {
        let origins = match repr {
            OriginsRepr::List(list) => list,
            OriginsRepr::Joined(joined) => joined.split(',').map(str::to_owned).collect(),
        };
        Self(
            origins
                .into_iter()
                .map(|o| o.trim().trim_end_matches('/').to_owned())
                .filter(|o| !o.is_empty())
                .collect(),
        )
    }
}

impl AllowedOrigins {
    pub fn new(origins: Vec<String>) -> Self {
        OriginsRepr::List(origins).into()
    }

    pub fn contains(&self, origin: &HeaderValue) -> bool {
        origin
            .to_str()
            .map(|origin| self.0.iter().any(|allowed| allowed == origin))
            .unwrap_or(false)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl Settings {
    /// Layers defaults, `config/base.json`, `config/{APP_ENVIRONMENT}.json`
    /// and `NIMBUS__*` environment variables, later sources winning.
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        let environment =
            std::env::var(env::APP_ENVIRONMENT_ENV_VAR).unwrap_or_else(|_| "local".to_owned());

        Self::builder_with_defaults()?
            .add_source(File::with_name(&format!("{}/base", env::CONFIG_DIR)).required(false))
            .add_source(
                File::with_name(&format!("{}/{environment}", env::CONFIG_DIR)).required(false),
            )
            .add_source(
                Environment::with_prefix(env::ENV_PREFIX)
                    .prefix_separator(env::ENV_SEPARATOR)
                    .separator(env::ENV_SEPARATOR)
                    .try_parsing(true),
            )
            .build()?
            .try_deserialize()
    }

    /// Defaults plus explicit key/value overrides, ignoring files and the
    /// environment. Keys are dotted paths such as `session.secret`.
    pub fn from_overrides<'a, I>(overrides: I) -> Result<Self, ConfigError>
    where
        I: IntoIterator<Item = (&'a str, String)>,
    {
        overrides
            .into_iter()
            .try_fold(Self::builder_with_defaults()?, |builder, (key, value)| {
                builder.set_override(key, value)
            })?
            .build()?
            .try_deserialize()
    }

    fn builder_with_defaults() -> Result<config::ConfigBuilder<config::builder::DefaultState>, ConfigError> {
        Config::builder()
            .set_default("application.host", defaults::HOST)?
            .set_default("application.port", i64::from(defaults::PORT))?
            .set_default("application.base_url", defaults::BASE_URL)?
            .set_default("application.assets_dir", defaults::ASSETS_DIR)?
            .set_default("database.url", defaults::DATABASE_URL)?
            .set_default(
                "database.max_connections",
                i64::from(defaults::DATABASE_MAX_CONNECTIONS),
            )?
            .set_default("session.cookie_name", defaults::SESSION_COOKIE_NAME)?
            .set_default("session.ttl_in_seconds", defaults::SESSION_TTL_IN_SECONDS)?
            .set_default(
                "session.remember_me_ttl_in_seconds",
                defaults::REMEMBER_ME_TTL_IN_SECONDS,
            )?
            .set_default("session.last_email_cookie_name", defaults::LAST_EMAIL_COOKIE_NAME)?
            .set_default(
                "session.last_email_ttl_in_seconds",
                defaults::LAST_EMAIL_TTL_IN_SECONDS,
            )?
            .set_default("session.secure_cookies", true)?
            .set_default("weather.geocoding_url", defaults::GEOCODING_URL)?
            .set_default("weather.forecast_url", defaults::FORECAST_URL)?
            .set_default(
                "weather.timeout_in_millis",
                defaults::WEATHER_TIMEOUT_IN_MILLIS as i64,
            )?
            .set_default("email_client.base_url", defaults::EMAIL_BASE_URL)?
            .set_default("email_client.sender", defaults::EMAIL_SENDER)?
            .set_default(
                "email_client.timeout_in_millis",
                defaults::EMAIL_TIMEOUT_IN_MILLIS as i64,
            )
    }

    pub fn session_config(&self) -> SessionConfig {
        SessionConfig {
            cookie_name: self.session.cookie_name.clone(),
            secret: self.session.secret.clone(),
            ttl_in_seconds: self.session.ttl_in_seconds,
            remember_me_ttl_in_seconds: self.session.remember_me_ttl_in_seconds,
            last_email_cookie_name: self.session.last_email_cookie_name.clone(),
            last_email_ttl_in_seconds: self.session.last_email_ttl_in_seconds,
            secure: self.session.secure_cookies,
            same_site: SameSite::Lax,
        }
    }
}
