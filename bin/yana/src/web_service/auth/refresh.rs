use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use chrono::Duration;
use log::error;
use serde::Deserialize;
use serde_json::json;

use crate::web_service::ServiceError;
use crate::AppState;

#[derive(Debug, Deserialize)]
pub struct RefreshRequest {
    refresh_token: Option<String>,
}

pub async fn refresh(
    State(state): State<AppState>,
    Json(request): Json<RefreshRequest>,
) -> Result<Response, ServiceError> {
    let Some(refresh_token) = request.refresh_token else {
        return Ok((
            StatusCode::BAD_REQUEST,
            Json(json!({"error": "refresh token не предоставлен"})),
        )
            .into_response());
    };

    let tokens = match state.yandex.refresh(&refresh_token).await {
        Ok(tokens) => tokens,
        Err(err) => {
            error!("token refresh failed: {err}");

            return Ok((
                StatusCode::BAD_REQUEST,
                Json(json!({"error": "ошибка обновления токена"})),
            )
                .into_response());
        }
    };

    let user = state.yandex.user_info(&tokens.access_token).await?;

    let access_token = state
        .tokens
        .issue(
            tokens.access_token,
            user.id,
            Duration::seconds(tokens.expires_in),
        )
        .await;

    Ok(Json(json!({
        "access_token": access_token,
        "token_type": "Bearer",
        "expires_in": tokens.expires_in,
    }))
    .into_response())
}
