mod session;
mod web_service;

mod error;
pub use error::Error;

pub use session::{
    session, ConnectionStatus, Push, SessionHandle, SessionManager, Snapshot, GRACE_DELAY,
};
pub use web_service::router;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Clone)]
pub struct AppState {
    pub session: SessionHandle,
    pub push: tokio::sync::broadcast::Sender<Push>,
}
