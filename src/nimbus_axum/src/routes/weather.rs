use axum::{
    Json,
    extract::{Path, State},
};
use nimbus_application::WeatherLookupUseCase;
use nimbus_core::WeatherReport;

use crate::{error::ApiError, state::AppState};

/// Same report shape as the dashboard. Anonymous callers never see a favorite flag.
#[tracing::instrument(name = "Weather lookup", skip(state))]
pub async fn weather(
    State(state): State<AppState>,
    Path(city): Path<String>,
) -> Result<Json<WeatherReport>, ApiError> {
    let report = WeatherLookupUseCase::new(&*state.weather)
        .execute(&city)
        .await?;

    Ok(Json(report))
}
