use axum::{Json, extract::State};
use nimbus_application::ClearHistoryUseCase;

use super::Success;
use crate::{error::ApiError, session::ApiSessionAccount, state::AppState};

#[tracing::instrument(name = "Clear history", skip_all)]
pub async fn clear_history(
    State(state): State<AppState>,
    ApiSessionAccount(account_id): ApiSessionAccount,
) -> Result<Json<Success>, ApiError> {
    let removed = ClearHistoryUseCase::new(&*state.history)
        .execute(account_id)
        .await?;
    tracing::debug!(removed, "history cleared");

    Ok(Json(Success::new()))
}
