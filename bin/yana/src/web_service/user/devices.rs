use axum::extract::State;
use axum::http::HeaderMap;
use axum::response::{IntoResponse, Response};
use axum::Json;
use log::{error, info};
use serde_json::json;

use crate::registry::devices_from_scan;
use crate::web_service::auth::validate_authorization;
use crate::web_service::{request_id, ServiceError};
use crate::AppState;

pub async fn devices(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Response, ServiceError> {
    let user_id = match validate_authorization(&headers, &state.tokens, "devices").await {
        Ok(user_id) => user_id,
        Err(err) => return Ok(err.into_response()),
    };

    let request_id = request_id(&headers);
    info!("{request_id}/devices");

    let devices = match state.registry.cached(&user_id).await {
        Some(devices) => devices,
        None => {
            info!("{request_id}: no devices for user {user_id}, starting discovery");

            let endpoints = match state.relay.scan().await {
                Ok(endpoints) => endpoints,
                Err(err) => {
                    // A failed scan is a "nothing found" outcome, the
                    // registry fills in the default device below.
                    error!("{request_id}: discovery failed: {err}");
                    vec![]
                }
            };

            let devices = devices_from_scan(&user_id, endpoints);
            state.registry.store(&user_id, devices.clone()).await;
            devices
        }
    };

    info!("{request_id}: returning {} device(s)", devices.len());

    let devices: Vec<_> = devices.iter().map(|entry| &entry.device).collect();

    Ok(Json(json!({
        "request_id": request_id,
        "payload": {
            "user_id": user_id,
            "devices": devices,
        }
    }))
    .into_response())
}
