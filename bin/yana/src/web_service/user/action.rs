use axum::extract::State;
use axum::http::HeaderMap;
use axum::response::{IntoResponse, Response};
use axum::Json;
use log::{error, info};
use quasar::{
    ActionErrorCode, ActionRequest, ActionResponse, ActionResponseDevice, ActionResult,
    StateCapability,
};

use crate::web_service::auth::validate_authorization;
use crate::web_service::{request_id, ServiceError};
use crate::{prepare_command, prepare_response_capability, AppState, Error};

pub async fn action(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(request): Json<ActionRequest>,
) -> Result<Response, ServiceError> {
    let user_id = match validate_authorization(&headers, &state.tokens, "devices_action").await {
        Ok(user_id) => user_id,
        Err(err) => return Ok(err.into_response()),
    };

    let request_id = request_id(&headers);

    let mut response_devices = Vec::with_capacity(request.payload.devices.len());

    for device in request.payload.devices {
        info!("{request_id}/action: {}", device.id);

        let known = state.registry.contains(&user_id, &device.id).await;

        // A discovered unit gets the session retargeted first; the default
        // device goes to whatever greta is already pointed at.
        let mut reachable = known;
        if let Some(endpoint) = state.registry.endpoint_for(&user_id, &device.id).await {
            if let Err(err) = state.relay.connect(&endpoint).await {
                error!("{request_id}: connect to {} failed: {err}", endpoint.ip);
                reachable = false;
            }
        }

        let mut capabilities = Vec::with_capacity(device.capabilities.len());

        for capability in &device.capabilities {
            let result = if !known {
                ActionResult::error(
                    ActionErrorCode::InternalError,
                    "устройство не найдено".to_string(),
                )
            } else if !reachable {
                ActionResult::error(
                    ActionErrorCode::DeviceUnreachable,
                    "кондиционер недоступен".to_string(),
                )
            } else {
                execute(&state, capability).await
            };

            capabilities.push(prepare_response_capability(capability, result));
        }

        response_devices.push(ActionResponseDevice::new(device.id, capabilities));
    }

    Ok(Json(ActionResponse::new(request_id, response_devices)).into_response())
}

async fn execute(state: &AppState, capability: &StateCapability) -> ActionResult {
    let (property, value) = match prepare_command(capability) {
        Ok(command) => command,
        Err(Error::OutOfRange(_)) => {
            return ActionResult::error(
                ActionErrorCode::InvalidValue,
                "температура должна быть от 16 до 30 градусов".to_string(),
            );
        }
        Err(err) => {
            return ActionResult::error(ActionErrorCode::InvalidAction, err.to_string());
        }
    };

    match state.relay.command(property, &value).await {
        Ok(()) => ActionResult::ok(),
        Err(Error::Upstream(status)) => {
            error!("command {property} failed upstream: {status}");

            ActionResult::error(
                ActionErrorCode::DeviceUnreachable,
                format!("hvac service returned {status}"),
            )
        }
        Err(err) => {
            error!("command {property} failed: {err}");

            ActionResult::error(ActionErrorCode::InternalError, err.to_string())
        }
    }
}
