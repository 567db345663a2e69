mod api {
    mod command;
    mod connect;
    mod disconnect;
    mod scan;
    mod status;

    pub use command::command;
    pub use connect::connect;
    pub use disconnect::disconnect;
    pub use scan::scan;
    pub use status::status;
}

mod socket;

use axum::body::Body;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::Router;
use log::error;

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
        .route("/api/status", get(api::status))
        .route("/api/connect", post(api::connect))
        .route("/api/disconnect", post(api::disconnect))
        .route("/api/scan-hvac", post(api::scan))
        .route("/api/command", post(api::command))
        .route("/ws", get(socket::socket))
        .with_state(state)
}
