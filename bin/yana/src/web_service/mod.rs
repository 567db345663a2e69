mod auth {
    mod authorize;
    mod callback;
    mod refresh;
    mod revoke;
    mod validate_authorization;
    mod yandex;

    pub use authorize::authorize;
    pub use callback::callback;
    pub use refresh::refresh;
    pub use revoke::revoke;
    pub use validate_authorization::{extract_token_from_headers, validate_authorization};
    pub use yandex::{OauthConfig, YandexOauth};
}

mod user {
    mod action;
    mod devices;
    mod health;
    mod pong;
    mod query;
    mod unlink;

    pub use action::action;
    pub use devices::devices;
    pub use health::health;
    pub use pong::pong;
    pub use query::query;
    pub use unlink::unlink;
}

mod webhook;

pub use auth::{OauthConfig, YandexOauth};

use axum::body::Body;
use axum::http::{HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, head, post};
use axum::{Json, Router};
use log::error;
use serde_json::json;

use crate::{AppState, Error};

pub struct ServiceError(Error, uuid::Uuid);

impl IntoResponse for ServiceError {
    fn into_response(self) -> Response<Body> {
        error!("ServiceError[{}]: {}", self.1, self.0);

        (StatusCode::INTERNAL_SERVER_ERROR, self.0.to_string()).into_response()
    }
}

impl From<Error> for ServiceError {
    fn from(value: Error) -> Self {
        ServiceError(value, uuid::Uuid::new_v4())
    }
}

impl From<serde_json::Error> for ServiceError {
    fn from(value: serde_json::Error) -> Self {
        ServiceError(Error::Json(value), uuid::Uuid::new_v4())
    }
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(user::health))
        .route("/v1.0/", head(user::pong).get(user::pong))
        .route("/v1.0/user/devices", get(user::devices))
        .route("/v1.0/user/devices/query", post(user::query))
        .route("/v1.0/user/devices/action", post(user::action))
        .route("/v1.0/user/unlink", post(user::unlink))
        .route("/oauth/authorize", get(auth::authorize))
        .route("/oauth/callback", get(auth::callback))
        .route("/oauth/refresh", post(auth::refresh))
        .route("/oauth/revoke", post(auth::revoke))
        .route("/yandex-webhook", post(webhook::webhook))
        .with_state(state)
}

fn request_id(headers: &HeaderMap) -> String {
    headers
        .get("X-Request-Id")
        .and_then(|value| value.to_str().ok())
        .unwrap_or("unknown")
        .to_string()
}

/// Platform-shaped 500, the envelope the smart home surface expects.
fn internal_error(request_id: &str) -> Response {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(json!({
            "request_id": request_id,
            "error_code": "INTERNAL_ERROR",
            "error_message": "внутренняя ошибка сервера",
        })),
    )
        .into_response()
}
