//! # Nimbus - personal weather web app
//!
//! Facade crate re-exporting the public API of every workspace member.
//!
//! ## Structure
//!
//! - **Core domain types**: `Email`, `Password`, `Account`, `WeatherReport`, etc.
//! - **Ports**: `AccountStore`, `ResetTokenStore`, `SearchHistoryStore`, `FavoritesStore`,
//!   `WeatherGateway`, `EmailClient`
//! - **Use cases**: `RegisterUseCase`, `LoginUseCase`, `SearchWeatherUseCase`, etc.
//! - **Adapters**: SQLite stores, Open-Meteo client, Postmark email, configuration
//! - **Service**: `WeatherAppService`, the router and standalone server

// ============================================================================
// Core Domain Types
// ============================================================================

pub mod core {
    pub use nimbus_core::*;
}

pub use nimbus_core::{
    Account, AccountId, Email, FavoriteCity, Language, Password, RecentSearch, Theme,
    WeatherReport,
};

// ============================================================================
// Ports
// ============================================================================

pub mod ports {
    pub use nimbus_core::{
        AccountStore, AccountStoreError, EmailClient, FavoritesStore, FavoritesStoreError,
        HistoryStoreError, PasswordHasher, ResetTokenSigner, ResetTokenStore,
        ResetTokenStoreError, SearchHistoryStore, WeatherError, WeatherGateway,
    };
}

pub use ports::{AccountStore, EmailClient, FavoritesStore, ResetTokenStore, SearchHistoryStore, WeatherGateway};

// ============================================================================
// Use Cases (Application Layer)
// ============================================================================

pub mod use_cases {
    pub use nimbus_application::*;
}

pub use nimbus_application::{
    ClearHistoryUseCase, DashboardUseCase, DeleteAccountUseCase, LoginUseCase,
    RegisterUseCase, RequestPasswordResetUseCase, ResetPasswordUseCase, SearchWeatherUseCase,
    ToggleFavoriteUseCase, UpdatePreferencesUseCase, VerifyEmailUseCase,
};

// ============================================================================
// Adapters (Infrastructure)
// ============================================================================

pub mod adapters {
    pub mod persistence {
        pub use nimbus_adapters::persistence::*;
    }

    pub mod email {
        pub use nimbus_adapters::email::*;
    }

    pub mod session {
        pub use nimbus_adapters::session::*;
    }

    pub mod weather {
        pub use nimbus_adapters::weather::*;
    }

    pub mod config {
        pub use nimbus_adapters::config::*;
    }
}

pub use nimbus_adapters::{
    MockEmailClient, OpenMeteoClient, PostmarkEmailClient, Settings, SqliteAccountStore,
    SqliteFavoritesStore, SqliteResetTokenStore, SqliteSearchHistoryStore,
};

// ============================================================================
// HTTP layer and service
// ============================================================================

pub mod http_layer {
    pub use nimbus_axum::*;
}

pub use nimbus_axum::AppState;
pub use nimbus_service::{WeatherAppService, build_state, configure_postmark, configure_sqlite};

// ============================================================================
// Re-export common external dependencies
// ============================================================================

pub use async_trait::async_trait;

pub use secrecy::{ExposeSecret, Secret};

pub use http;
