pub mod env {
    pub const APP_ENVIRONMENT_ENV_VAR: &str = "APP_ENVIRONMENT";
    /// Prefix of every overriding variable, e.g. `NIMBUS__SESSION__SECRET`.
    pub const ENV_PREFIX: &str = "NIMBUS";
    pub const ENV_SEPARATOR: &str = "__";
    pub const CONFIG_DIR: &str = "config";
}

pub mod defaults {
    pub const HOST: &str = "0.0.0.0";
    pub const PORT: u16 = 5000;
    pub const BASE_URL: &str = "http://localhost:5000";
    pub const ASSETS_DIR: &str = "assets";

    pub const DATABASE_URL: &str = "sqlite://weather_app.db?mode=rwc";
    pub const DATABASE_MAX_CONNECTIONS: u32 = 5;

    pub const SESSION_COOKIE_NAME: &str = "nimbus_session";
    pub const SESSION_TTL_IN_SECONDS: i64 = 24 * 60 * 60;
    pub const REMEMBER_ME_TTL_IN_SECONDS: i64 = 7 * 24 * 60 * 60;
    pub const LAST_EMAIL_COOKIE_NAME: &str = "last_user";
    pub const LAST_EMAIL_TTL_IN_SECONDS: i64 = 30 * 24 * 60 * 60;
    pub const SESSION_ENDED_COOKIE_NAME: &str = "session_ended";
    pub const SESSION_ENDED_TTL_IN_SECONDS: i64 = 60;

    pub const GEOCODING_URL: &str = "https://geocoding-api.open-meteo.com/v1/search";
    pub const FORECAST_URL: &str = "https://api.open-meteo.com/v1/forecast";
    pub const WEATHER_TIMEOUT_IN_MILLIS: u64 = 5_000;

    pub const EMAIL_BASE_URL: &str = "https://api.postmarkapp.com/";
    pub const EMAIL_SENDER: &str = "no-reply@weather-app.local";
    pub const EMAIL_TIMEOUT_IN_MILLIS: u64 = 10_000;
}

pub mod test {
    pub const APP_ADDRESS: &str = "127.0.0.1:0";
    pub const DATABASE_URL: &str = "sqlite::memory:";

    pub mod email_client {
        use std::time::Duration;

        pub const SENDER: &str = "test@email.com";
        pub const TIMEOUT: Duration = Duration::from_millis(200);
    }
}
