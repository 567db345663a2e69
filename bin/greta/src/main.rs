use greta::{router, session, AppState, Result};

use gree::{Config, StubClient};
use log::info;
use tokio::net::TcpListener;
use tokio::signal::unix::{signal, SignalKind};
use tokio::sync::broadcast;
use tokio::task;

const VERSION: &str = env!("CARGO_PKG_VERSION");

#[tokio::main]
async fn main() -> Result<()> {
    pretty_env_logger::init_timed();

    info!("greta version {VERSION}");

    let host = std::env::var("HVAC_HOST").unwrap_or_else(|_| String::from("192.168.31.8"));
    let config = Config::from_host(&host);
    info!("configured unit: {config}");

    let (push, _) = broadcast::channel(16);
    let (manager, handle) = session(config, StubClient::new, push.clone());
    task::spawn(manager.run());

    let state = AppState {
        session: handle,
        push,
    };

    let port: u16 = std::env::var("LISTEN_PORT")
        .ok()
        .and_then(|port| port.parse().ok())
        .unwrap_or(3001);

    let listener = TcpListener::bind(("0.0.0.0", port)).await?;
    info!("listening http://0.0.0.0:{port}");

    tokio::select! {
        result = async { axum::serve(listener, router(state)).await } => { result?; },
        _ = async {
            let mut sig = signal(SignalKind::terminate()).expect("SIGTERM handler");
            sig.recv().await
        } => { info!("got SIGTERM, exiting...") },
    };

    Ok(())
}
