use axum::extract::State;
use axum::response::IntoResponse;
use axum::Json;
use gree::Config;
use log::{error, info};
use serde::Deserialize;
use serde_json::json;

use crate::web_service::ServiceError;
use crate::AppState;

#[derive(Debug, Deserialize)]
pub struct ConnectRequest {
    host: Option<String>,
}

pub async fn connect(
    State(state): State<AppState>,
    Json(request): Json<ConnectRequest>,
) -> Result<impl IntoResponse, ServiceError> {
    let host = request.host.map(|host| Config::from_host(&host));

    let result = match &host {
        Some(config) => {
            info!("connect requested for {config}");
            state.session.replace(config.clone()).await
        }
        None => {
            info!("connect requested for the configured unit");
            state.session.connect().await
        }
    };

    // The original service answers before the handshake settles; a failed
    // attempt is reported on the realtime channel, not here.
    if let Err(err) = result {
        error!("connect failed: {err}");
    }

    Ok(Json(json!({
        "message": "подключение инициировано",
        "host": host.map(|config| config.to_string()),
    })))
}
