pub mod clear_history;
pub mod dashboard;
pub mod delete_account;
pub mod favorites;
pub mod login;
pub mod preferences;
pub mod register;
pub mod request_password_reset;
pub mod reset_password;
pub mod search_weather;
pub mod verify_email;
pub mod weather_lookup;

pub use clear_history::{ClearHistoryError, ClearHistoryUseCase};
pub use dashboard::{DashboardError, DashboardUseCase, DashboardView, RECENT_SEARCH_LIMIT};
pub use delete_account::{DeleteAccountError, DeleteAccountUseCase};
pub use favorites::{ToggleFavoriteError, ToggleFavoriteUseCase, ToggleOutcome};
pub use login::{LoginError, LoginUseCase};
pub use preferences::{UpdatePreferencesError, UpdatePreferencesUseCase};
pub use register::{RegisterError, RegisterUseCase, Registration};
pub use request_password_reset::{RequestPasswordResetError, RequestPasswordResetUseCase};
pub use reset_password::{ResetPasswordError, ResetPasswordUseCase};
pub use search_weather::SearchWeatherUseCase;
pub use verify_email::{VerifyEmailError, VerifyEmailUseCase};
pub use weather_lookup::{WeatherLookupError, WeatherLookupUseCase};
