use axum::{Json, extract::State};
use nimbus_application::ToggleFavoriteUseCase;
use serde::{Deserialize, Serialize};

use crate::{error::ApiError, extract::ApiJson, session::ApiSessionAccount, state::AppState};

#[derive(Debug, Deserialize)]
pub struct FavoriteRequest {
    pub city_name: Option<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
}

#[derive(Debug, Serialize)]
pub struct FavoriteResponse {
    pub success: bool,
    pub message: &'static str,
    pub is_favorite: bool,
}

#[tracing::instrument(name = "Toggle favorite", skip_all)]
pub async fn toggle_favorite(
    State(state): State<AppState>,
    ApiSessionAccount(account_id): ApiSessionAccount,
    ApiJson(request): ApiJson<FavoriteRequest>,
) -> Result<Json<FavoriteResponse>, ApiError> {
    let outcome = ToggleFavoriteUseCase::new(&*state.favorites)
        .execute(
            account_id,
            request.city_name,
            request.latitude,
            request.longitude,
        )
        .await?;

    Ok(Json(FavoriteResponse {
        success: true,
        message: outcome.message(),
        is_favorite: outcome.is_favorite(),
    }))
}
