use axum::{Json, extract::State};
use nimbus_application::UpdatePreferencesUseCase;
use serde::Deserialize;

use super::Success;
use crate::{error::ApiError, extract::ApiJson, session::ApiSessionAccount, state::AppState};

#[derive(Debug, Deserialize)]
pub struct ThemeRequest {
    pub theme: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct LanguageRequest {
    pub language: Option<String>,
}

#[tracing::instrument(name = "Update theme", skip_all)]
pub async fn update_theme(
    State(state): State<AppState>,
    ApiSessionAccount(account_id): ApiSessionAccount,
    ApiJson(request): ApiJson<ThemeRequest>,
) -> Result<Json<Success>, ApiError> {
    UpdatePreferencesUseCase::new(&*state.accounts)
        .update_theme(account_id, request.theme)
        .await?;

    Ok(Json(Success::new()))
}

#[tracing::instrument(name = "Update language", skip_all)]
pub async fn update_language(
    State(state): State<AppState>,
    ApiSessionAccount(account_id): ApiSessionAccount,
    ApiJson(request): ApiJson<LanguageRequest>,
) -> Result<Json<Success>, ApiError> {
    UpdatePreferencesUseCase::new(&*state.accounts)
        .update_language(account_id, request.language)
        .await?;

    Ok(Json(Success::new()))
}
