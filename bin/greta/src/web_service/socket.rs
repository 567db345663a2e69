use std::str::FromStr;

use axum::extract::ws::{Message, WebSocket, WebSocketUpgrade};
use axum::extract::State;
use axum::response::Response;
use futures_util::stream::SplitSink;
use futures_util::{SinkExt, StreamExt};
use gree::Property;
use log::{debug, error, info, warn};
use serde::Deserialize;
use serde_json::Value;
use tokio::sync::broadcast::error::RecvError;

use crate::{AppState, ConnectionStatus, Push};

/// Client-to-server events of the realtime channel.
#[derive(Debug, Deserialize)]
#[serde(tag = "event", content = "payload", rename_all = "snake_case")]
enum ClientMessage {
    SetProperty { property: String, value: Value },
    ReconnectHvac,
}

pub async fn socket(ws: WebSocketUpgrade, State(state): State<AppState>) -> Response {
    ws.on_upgrade(move |socket| handle(socket, state))
}

async fn handle(socket: WebSocket, state: AppState) {
    info!("ui client connected");

    let mut updates = state.push.subscribe();
    let (mut sink, mut stream) = socket.split();

    // New clients get the current picture before any live updates.
    if let Ok(snapshot) = state.session.snapshot().await {
        let status = if snapshot.hvac_connected {
            ConnectionStatus::Connected
        } else {
            ConnectionStatus::Disconnected
        };

        let _ = send(&mut sink, &Push::DeviceUpdate(snapshot.device_status)).await;
        let _ = send(&mut sink, &Push::ConnectionStatus(status)).await;
    }

    loop {
        tokio::select! {
            update = updates.recv() => match update {
                Ok(push) => {
                    if send(&mut sink, &push).await.is_err() {
                        break;
                    }
                }
                Err(RecvError::Lagged(skipped)) => {
                    warn!("ui client lagged, {skipped} update(s) dropped");
                }
                Err(RecvError::Closed) => break,
            },
            message = stream.next() => match message {
                Some(Ok(Message::Text(text))) => {
                    handle_client_message(&text, &state, &mut sink).await;
                }
                Some(Ok(Message::Close(_))) | None => break,
                Some(Ok(_)) => (),
                Some(Err(err)) => {
                    debug!("ui client read failed: {err}");
                    break;
                }
            },
        }
    }

    info!("ui client disconnected");
}

async fn handle_client_message(
    text: &str,
    state: &AppState,
    sink: &mut SplitSink<WebSocket, Message>,
) {
    let message: ClientMessage = match serde_json::from_str(text) {
        Ok(message) => message,
        Err(err) => {
            error!("unable to parse ui message: {err}");
            error!("{text}");
            return;
        }
    };

    match message {
        ClientMessage::SetProperty { property, value } => {
            let property = match Property::from_str(&property) {
                Ok(property) => property,
                Err(_) => {
                    let push = Push::Error {
                        message: format!("неизвестное свойство: {property}"),
                    };
                    let _ = send(sink, &push).await;
                    return;
                }
            };

            info!("ui set {property} = {value}");

            if let Err(err) = state.session.dispatch(property, value).await {
                error!("ui set {property} failed: {err}");

                // Failures go to the requesting client only, updates to all.
                let push = Push::Error {
                    message: format!("ошибка установки {property}"),
                };
                let _ = send(sink, &push).await;
            }
        }
        ClientMessage::ReconnectHvac => {
            info!("ui requested reconnect");

            if let Err(err) = state.session.reconnect().await {
                error!("reconnect failed: {err}");
            }
        }
    }
}

async fn send(
    sink: &mut SplitSink<WebSocket, Message>,
    push: &Push,
) -> Result<(), axum::Error> {
    let text = match serde_json::to_string(push) {
        Ok(text) => text,
        Err(err) => {
            error!("unable to serialize push: {err}");
            return Ok(());
        }
    };

    sink.send(Message::Text(text.into())).await
}
