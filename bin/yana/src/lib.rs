mod capability;
mod intent;
mod registry;
mod relay;
mod token_store;
mod web_service;

mod error;
pub use error::Error;

pub use capability::{
    prepare_command, prepare_response_capability, state_capabilities, state_properties,
    TEMPERATURE_MAX, TEMPERATURE_MIN,
};
pub use intent::Intent;
pub use registry::{RegisteredDevice, Registry};
pub use relay::{RelayClient, StatusResponse};
pub use token_store::TokenStore;
pub use web_service::{router, OauthConfig, YandexOauth};

pub type Result<T> = std::result::Result<T, Error>;

use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub relay: Arc<RelayClient>,
    pub registry: Arc<Registry>,
    pub tokens: Arc<TokenStore>,
    pub yandex: Arc<YandexOauth>,
}
