use axum::extract::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use gree::{Subnet, SCAN_WINDOW};
use log::info;
use serde::Deserialize;
use serde_json::json;

use crate::web_service::ServiceError;

#[derive(Debug, Default, Deserialize)]
pub struct ScanRequest {
    subnet: Option<String>,
}

pub async fn scan(body: Option<Json<ScanRequest>>) -> Result<Response, ServiceError> {
    let request = body.map(|Json(request)| request).unwrap_or_default();

    let subnet = match request.subnet {
        Some(subnet) => match subnet.parse::<Subnet>() {
            Ok(subnet) => subnet,
            Err(err) => {
                return Ok((
                    StatusCode::BAD_REQUEST,
                    format!("bad subnet {subnet:?}: {err}"),
                )
                    .into_response());
            }
        },
        None => {
            let subnet = Subnet::detect().await.unwrap_or_default();
            info!("derived subnet {subnet}0/24");
            subnet
        }
    };

    let devices = gree::scan(subnet, SCAN_WINDOW)
        .await
        .map_err(crate::Error::from)?;

    let message = if devices.is_empty() {
        "кондиционеры не найдены"
    } else {
        "кондиционеры найдены"
    };

    Ok(Json(json!({
        "success": true,
        "devices": devices,
        "message": message,
    }))
    .into_response())
}
