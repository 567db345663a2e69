use axum::extract::State;
use axum::http::HeaderMap;
use axum::response::{IntoResponse, Response};
use axum::Json;
use log::info;
use serde_json::json;

use crate::web_service::auth::validate_authorization;
use crate::web_service::{request_id, ServiceError};
use crate::AppState;

pub async fn unlink(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Response, ServiceError> {
    let user_id = match validate_authorization(&headers, &state.tokens, "unlink").await {
        Ok(user_id) => user_id,
        Err(err) => return Ok(err.into_response()),
    };

    let request_id = request_id(&headers);
    info!("{request_id}/unlink: user {user_id}");

    state.registry.remove(&user_id).await;

    Ok(Json(json!({
        "request_id": request_id,
        "status": "ok",
    }))
    .into_response())
}
