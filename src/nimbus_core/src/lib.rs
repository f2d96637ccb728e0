pub mod domain;
pub mod ports;

// Re-export commonly used types for convenience
pub use domain::{
    account::{Account, AccountError, AccountId, DisplayName, Language, Theme},
    email::{Email, EmailError, EmailMessage},
    forecast::{
        CurrentConditions, DailyForecast, FORECAST_DAYS, ForecastFormatError, GeoLocation,
        HOURLY_SAMPLES, RawCurrentWeather, RawDaily, RawForecast, RawHourly, WeatherReport,
        format_current, format_forecast, weather_icon,
    },
    password::{Password, PasswordError, PasswordHash},
    saved_cities::{FavoriteCity, RecentSearch, SearchHistoryEntry},
    tokens::{
        RESET_TOKEN_TTL_SECONDS, ResetClaims, ResetToken, ResetTokenRecord, ResetTokenState,
        TokenError, VerificationToken,
    },
};

pub use ports::{
    repositories::{
        AccountStore, AccountStoreError, FavoritesStore, FavoritesStoreError, HistoryStoreError,
        ResetTokenStore, ResetTokenStoreError, SearchHistoryStore,
    },
    services::{
        CredentialError, EmailClient, PasswordHasher, ResetTokenError, ResetTokenSigner,
        WeatherError, WeatherGateway,
    },
};
