use std::str::FromStr;

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use gree::Property;
use log::info;
use serde::Deserialize;
use serde_json::{json, Value};

use crate::web_service::ServiceError;
use crate::{AppState, Error};

#[derive(Debug, Deserialize)]
pub struct CommandRequest {
    property: String,
    value: Value,
}

pub async fn command(
    State(state): State<AppState>,
    Json(request): Json<CommandRequest>,
) -> Result<Response, ServiceError> {
    let property = match Property::from_str(&request.property) {
        Ok(property) => property,
        Err(_) => {
            return Ok((
                StatusCode::BAD_REQUEST,
                Json(json!({
                    "error": format!("неизвестное свойство: {}", request.property)
                })),
            )
                .into_response());
        }
    };

    info!("command {property} = {}", request.value);

    match state.session.dispatch(property, request.value.clone()).await {
        Ok(()) => Ok(Json(json!({
            "success": true,
            "message": format!("команда {property} = {} выполнена", request.value),
        }))
        .into_response()),
        Err(Error::VendorUnreachable) => Ok((
            StatusCode::BAD_GATEWAY,
            Json(json!({"error": "не удалось подключиться к кондиционеру"})),
        )
            .into_response()),
        Err(Error::Gree(gree::Error::Rejected(property, value))) => Ok((
            StatusCode::BAD_REQUEST,
            Json(json!({
                "error": format!("кондиционер отклонил {property} = {value}")
            })),
        )
            .into_response()),
        Err(err) => Err(err.into()),
    }
}
