use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use chrono::Duration;
use log::{error, info};
use serde::Deserialize;
use serde_json::json;

use crate::web_service::ServiceError;
use crate::AppState;

#[derive(Debug, Deserialize)]
pub struct CallbackParams {
    code: Option<String>,
}

pub async fn callback(
    State(state): State<AppState>,
    Query(params): Query<CallbackParams>,
) -> Result<Response, ServiceError> {
    let Some(code) = params.code else {
        return Ok((
            StatusCode::BAD_REQUEST,
            Json(json!({"error": "код авторизации не получен"})),
        )
            .into_response());
    };

    let tokens = match state.yandex.exchange_code(&code).await {
        Ok(tokens) => tokens,
        Err(err) => {
            error!("code exchange failed: {err}");

            return Ok((
                StatusCode::BAD_REQUEST,
                Json(json!({"error": "ошибка получения токена"})),
            )
                .into_response());
        }
    };

    let user = state.yandex.user_info(&tokens.access_token).await?;

    let access_token = state
        .tokens
        .issue(
            tokens.access_token,
            user.id.clone(),
            Duration::seconds(tokens.expires_in),
        )
        .await;

    info!("user {} authorized", user.id);

    Ok(Json(json!({
        "access_token": access_token,
        "token_type": "Bearer",
        "expires_in": tokens.expires_in,
        "user": {"id": user.id, "name": user.name()},
    }))
    .into_response())
}
