use axum::{
    extract::State,
    http::HeaderMap,
    response::{IntoResponse, Response},
    Json,
};
use log::info;
use serde_json::json;

use super::{extract_token_from_headers, validate_authorization};
use crate::web_service::ServiceError;
use crate::AppState;

pub async fn revoke(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Response, ServiceError> {
    let user_id = match validate_authorization(&headers, &state.tokens, "revoke").await {
        Ok(user_id) => user_id,
        Err(err) => return Ok(err.into_response()),
    };

    if let Some(token) = extract_token_from_headers(&headers) {
        state.tokens.revoke(token).await;
    }

    info!("revoked token of user {user_id}");

    Ok(Json(json!({"message": "токен отозван"})).into_response())
}
