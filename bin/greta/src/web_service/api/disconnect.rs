use axum::extract::State;
use axum::response::IntoResponse;
use axum::Json;
use log::info;
use serde_json::json;

use crate::web_service::ServiceError;
use crate::AppState;

pub async fn disconnect(State(state): State<AppState>) -> Result<impl IntoResponse, ServiceError> {
    info!("disconnect requested");

    state.session.disconnect().await?;

    Ok(Json(json!({"message": "отключено"})))
}
