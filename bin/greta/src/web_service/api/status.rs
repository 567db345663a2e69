use axum::extract::State;
use axum::response::IntoResponse;
use axum::Json;

use crate::web_service::ServiceError;
use crate::AppState;

pub async fn status(State(state): State<AppState>) -> Result<impl IntoResponse, ServiceError> {
    let snapshot = state.session.snapshot().await?;

    Ok(Json(snapshot))
}
