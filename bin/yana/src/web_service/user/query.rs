use axum::body::Bytes;
use axum::extract::State;
use axum::http::{HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Json;
use log::{error, info};
use quasar::{StateDevice, StateRequest, StateResponse};

use crate::web_service::auth::validate_authorization;
use crate::web_service::{internal_error, request_id, ServiceError};
use crate::{state_capabilities, state_properties, AppState};

pub async fn query(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<Response, ServiceError> {
    let user_id = match validate_authorization(&headers, &state.tokens, "devices_query").await {
        Ok(user_id) => user_id,
        Err(err) => return Ok(err.into_response()),
    };

    let request_id = request_id(&headers);

    let request: StateRequest = match serde_json::from_slice(&body) {
        Ok(request) => request,
        Err(err) => {
            error!("{request_id}: unable to parse query: {err}");
            return Ok((StatusCode::BAD_REQUEST, err.to_string()).into_response());
        }
    };

    info!(
        "{request_id}/query: {:?}",
        request.devices.iter().map(|d| d.id).collect::<Vec<_>>()
    );

    let status = match state.relay.status().await {
        Ok(status) => status,
        Err(err) => {
            error!("{request_id}: status fetch failed: {err}");
            return Ok(internal_error(&request_id));
        }
    };

    let mut devices = Vec::with_capacity(request.devices.len());

    for device in request.devices {
        if state.registry.contains(&user_id, device.id).await {
            devices.push(StateDevice::new(
                device.id.to_string(),
                state_capabilities(&status.device_status),
                state_properties(&status.device_status),
            ));
        } else {
            devices.push(StateDevice::not_found(device.id.to_string()));
        }
    }

    Ok(Json(StateResponse::new(request_id, devices)).into_response())
}
