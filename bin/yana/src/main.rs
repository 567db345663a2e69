use yana::{router, AppState, OauthConfig, Registry, RelayClient, Result, TokenStore, YandexOauth};

use std::sync::Arc;

use log::info;
use tokio::net::TcpListener;
use tokio::signal::unix::{signal, SignalKind};

const VERSION: &str = env!("CARGO_PKG_VERSION");

#[tokio::main]
async fn main() -> Result<()> {
    pretty_env_logger::init_timed();

    info!("yana version {VERSION}");

    let greta_url =
        std::env::var("GRETA_URL").unwrap_or_else(|_| String::from("http://localhost:3001"));
    info!("hvac service: {greta_url}");

    let state = AppState {
        relay: Arc::new(RelayClient::new(&greta_url)?),
        registry: Arc::new(Registry::new()),
        tokens: Arc::new(TokenStore::new()),
        yandex: Arc::new(YandexOauth::new(OauthConfig::from_env())?),
    };

    let port: u16 = std::env::var("LISTEN_PORT")
        .ok()
        .and_then(|port| port.parse().ok())
        .unwrap_or(3002);

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
