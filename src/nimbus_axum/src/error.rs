use std::fmt::Display;

use axum::{
    Json,
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{Html, IntoResponse, Response},
};
use nimbus_application::{
    ClearHistoryError, DeleteAccountError, ToggleFavoriteError, UpdatePreferencesError,
    WeatherLookupError,
};
use nimbus_core::AccountStoreError;
use serde::Serialize;
use thiserror::Error;

use crate::templates::ErrorPage;

#[derive(Serialize)]
pub struct ApiFailure {
    pub success: bool,
    pub message: String,
}

#[derive(Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

/// Failures of the JSON endpoints.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Not authenticated")]
    NotAuthenticated,

    #[error("{0}")]
    InvalidInput(String),

    #[error("City not found.")]
    CityNotFound,

    #[error("Could not get the weather.")]
    WeatherUnavailable(String),

    #[error("Unexpected error: {0}")]
    UnexpectedError(String),
}

impl ApiError {
    pub fn unexpected(error: impl Display) -> Self {
        ApiError::UnexpectedError(error.to_string())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let failure = |status: StatusCode, message: String| {
            (
                status,
                Json(ApiFailure {
                    success: false,
                    message,
                }),
            )
                .into_response()
        };

        match self {
            ApiError::NotAuthenticated => failure(StatusCode::UNAUTHORIZED, self.to_string()),
            ApiError::InvalidInput(message) => failure(StatusCode::BAD_REQUEST, message),
            ApiError::CityNotFound => (
                StatusCode::NOT_FOUND,
                Json(ErrorResponse {
                    error: self.to_string(),
                }),
            )
                .into_response(),
            ApiError::WeatherUnavailable(ref cause) => {
                tracing::warn!(%cause, "weather upstream unavailable");
                (
                    StatusCode::SERVICE_UNAVAILABLE,
                    Json(ErrorResponse {
                        error: self.to_string(),
                    }),
                )
                    .into_response()
            }
            ApiError::UnexpectedError(cause) => {
                tracing::error!(%cause, "request failed");
                failure(
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal server error".to_owned(),
                )
            }
        }
    }
}

impl From<AccountStoreError> for ApiError {
    fn from(error: AccountStoreError) -> Self {
        match error {
            // The session outlived its account.
            AccountStoreError::AccountNotFound => ApiError::NotAuthenticated,
            other => ApiError::unexpected(other),
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::InvalidInput(rejection.body_text())
    }
}

impl From<ToggleFavoriteError> for ApiError {
    fn from(error: ToggleFavoriteError) -> Self {
        match error {
            ToggleFavoriteError::MissingCity | ToggleFavoriteError::InvalidCoordinates => {
                ApiError::InvalidInput(error.to_string())
            }
            ToggleFavoriteError::FavoritesStoreError(e) => ApiError::unexpected(e),
        }
    }
}

impl From<ClearHistoryError> for ApiError {
    fn from(error: ClearHistoryError) -> Self {
        match error {
            ClearHistoryError::HistoryStoreError(e) => ApiError::unexpected(e),
        }
    }
}

impl From<UpdatePreferencesError> for ApiError {
    fn from(error: UpdatePreferencesError) -> Self {
        match error {
            UpdatePreferencesError::InvalidPreference(e) => ApiError::InvalidInput(e.to_string()),
            UpdatePreferencesError::AccountStoreError(e) => e.into(),
        }
    }
}

impl From<DeleteAccountError> for ApiError {
    fn from(error: DeleteAccountError) -> Self {
        match error {
            DeleteAccountError::AccountStoreError(e) => e.into(),
        }
    }
}

impl From<WeatherLookupError> for ApiError {
    fn from(error: WeatherLookupError) -> Self {
        match error {
            WeatherLookupError::EmptyCity | WeatherLookupError::CityNotFound => {
                ApiError::CityNotFound
            }
            WeatherLookupError::Unavailable(cause) => ApiError::WeatherUnavailable(cause),
            WeatherLookupError::FavoritesStoreError(e) => ApiError::unexpected(e),
        }
    }
}

/// Failures of the HTML pages that cannot be shown inline on a form.
#[derive(Debug, Error)]
pub enum PageError {
    #[error("Template error: {0}")]
    TemplateError(#[from] askama::Error),

    #[error("Unexpected error: {0}")]
    UnexpectedError(String),
}

impl PageError {
    pub fn unexpected(error: impl Display) -> Self {
        PageError::UnexpectedError(error.to_string())
    }
}

impl IntoResponse for PageError {
    fn into_response(self) -> Response {
        tracing::error!(error = %self, "page request failed");

        let page = askama::Template::render(&ErrorPage {
            message: "Something went wrong. Please try again.",
        })
        .unwrap_or_else(|_| "Internal server error".to_owned());

        (StatusCode::INTERNAL_SERVER_ERROR, Html(page)).into_response()
    }
}
