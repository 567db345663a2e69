use std::time::Duration;

use gree::{Client, Config, DeviceStatus, Event, Property};
use log::{debug, error, info, warn};
use serde::Serialize;
use serde_json::Value;
use tokio::sync::{broadcast, mpsc, oneshot};
use tokio::{task, time};

use crate::{Error, Result};

/// How long an implicit connect attempt gets before a command is retried.
pub const GRACE_DELAY: Duration = Duration::from_secs(3);

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
enum ConnectionState {
    Disconnected,
    Connecting,
    Connected,
}

/// Pure transition function over vendor events. Commands never touch the
/// state directly, they go through the manager which feeds events here.
fn reduce(state: ConnectionState, event: &Event) -> ConnectionState {
    match event {
        Event::Connected => ConnectionState::Connected,
        Event::Disconnected | Event::NoResponse => ConnectionState::Disconnected,
        Event::Update(_) | Event::Failure(_) => state,
    }
}

/// Connection state as reported on the realtime channel.
#[derive(Copy, Clone, Debug, Serialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ConnectionStatus {
    Connected,
    Disconnected,
    Error,
}

/// Server-to-client events of the realtime channel.
#[derive(Clone, Debug, Serialize, PartialEq)]
#[serde(tag = "event", content = "payload", rename_all = "snake_case")]
pub enum Push {
    DeviceUpdate(DeviceStatus),
    ConnectionStatus(ConnectionStatus),
    Error { message: String },
}

/// Response body of `GET /api/status`.
#[derive(Clone, Debug, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Snapshot {
    pub device_status: DeviceStatus,
    pub hvac_connected: bool,
    pub device_id: Option<String>,
}

enum Command {
    Connect(oneshot::Sender<Result<()>>),
    Reconnect(oneshot::Sender<Result<()>>),
    Replace(Config, oneshot::Sender<Result<()>>),
    Disconnect(oneshot::Sender<()>),
    SetProperty(Property, Value, oneshot::Sender<Result<()>>),
    Snapshot(oneshot::Sender<Snapshot>),
    Vendor(u64, Event),
}

/// Handle given to the web layer. Cheap to clone; every operation is a
/// message to the one manager task that owns the client.
#[derive(Clone)]
pub struct SessionHandle {
    tx: mpsc::Sender<Command>,
    grace: Duration,
}

impl SessionHandle {
    pub async fn connect(&self) -> Result<()> {
        self.request(Command::Connect).await?
    }

    pub async fn reconnect(&self) -> Result<()> {
        self.request(Command::Reconnect).await?
    }

    /// Retargets the session. The previous connection is always torn down,
    /// even when the endpoint is unchanged.
    pub async fn replace(&self, config: Config) -> Result<()> {
        self.request(|reply| Command::Replace(config, reply)).await?
    }

    pub async fn disconnect(&self) -> Result<()> {
        self.request(Command::Disconnect).await
    }

    pub async fn set_property(&self, property: Property, value: Value) -> Result<()> {
        self.request(|reply| Command::SetProperty(property, value, reply))
            .await?
    }

    pub async fn snapshot(&self) -> Result<Snapshot> {
        self.request(Command::Snapshot).await
    }

    /// Command entry point with the implicit-connect policy: a command
    /// against a dead session triggers one connect attempt, waits out the
    /// grace delay and retries exactly once.
    pub async fn dispatch(&self, property: Property, value: Value) -> Result<()> {
        match self.set_property(property, value.clone()).await {
            Err(Error::NotConnected) => {
                if let Err(err) = self.connect().await {
                    warn!("implicit connect failed: {err}");
                }

                time::sleep(self.grace).await;

                match self.set_property(property, value).await {
                    Err(Error::NotConnected) => Err(Error::VendorUnreachable),
                    result => result,
                }
            }
            result => result,
        }
    }

    #[cfg(test)]
    fn with_grace(mut self, grace: Duration) -> SessionHandle {
        self.grace = grace;
        self
    }

    async fn request<T, F>(&self, command: F) -> Result<T>
    where
        F: FnOnce(oneshot::Sender<T>) -> Command,
    {
        let (reply, response) = oneshot::channel();

        self.tx
            .send(command(reply))
            .await
            .map_err(|_| Error::SessionClosed)?;

        response.await.map_err(|_| Error::SessionClosed)
    }
}

/// Owns the single vendor client. At most one exists per process and
/// `Command::Replace` is the only way to change its target.
pub struct SessionManager<C: Client + 'static> {
    factory: Box<dyn Fn(Config) -> (C, mpsc::UnboundedReceiver<Event>) + Send>,
    config: Config,
    client: Option<C>,
    generation: u64,
    state: ConnectionState,
    status: DeviceStatus,
    tx: mpsc::Sender<Command>,
    rx: mpsc::Receiver<Command>,
    push: broadcast::Sender<Push>,
}

pub fn session<C, F>(
    config: Config,
    factory: F,
    push: broadcast::Sender<Push>,
) -> (SessionManager<C>, SessionHandle)
where
    C: Client + 'static,
    F: Fn(Config) -> (C, mpsc::UnboundedReceiver<Event>) + Send + 'static,
{
    let (tx, rx) = mpsc::channel(8);

    let manager = SessionManager {
        factory: Box::new(factory),
        config,
        client: None,
        generation: 0,
        state: ConnectionState::Disconnected,
        status: DeviceStatus::default(),
        tx: tx.clone(),
        rx,
        push,
    };

    let handle = SessionHandle {
        tx,
        grace: GRACE_DELAY,
    };

    (manager, handle)
}

impl<C: Client + 'static> SessionManager<C> {
    pub async fn run(mut self) {
        while let Some(command) = self.rx.recv().await {
            self.handle_command(command).await;
        }
    }

    async fn handle_command(&mut self, command: Command) {
        match command {
            Command::Connect(reply) => {
                let _ = reply.send(self.connect().await);
            }
            Command::Reconnect(reply) => {
                self.teardown().await;
                let _ = reply.send(self.connect().await);
            }
            Command::Replace(config, reply) => {
                info!("retargeting session to {config}");

                self.teardown().await;
                self.config = config;
                let _ = reply.send(self.connect().await);
            }
            Command::Disconnect(reply) => {
                self.teardown().await;
                self.broadcast(Push::ConnectionStatus(ConnectionStatus::Disconnected));
                let _ = reply.send(());
            }
            Command::SetProperty(property, value, reply) => {
                let _ = reply.send(self.set_property(property, value).await);
            }
            Command::Snapshot(reply) => {
                let _ = reply.send(self.snapshot());
            }
            Command::Vendor(generation, event) => self.handle_event(generation, event),
        }
    }

    async fn connect(&mut self) -> Result<()> {
        if self.state == ConnectionState::Connected {
            return Ok(());
        }

        if self.client.is_none() {
            let (client, events) = (self.factory)(self.config.clone());

            self.generation += 1;
            self.client = Some(client);

            spawn_forwarder(self.generation, events, self.tx.clone());
        }

        info!("connecting to {}", self.config);
        self.state = ConnectionState::Connecting;

        let result = match self.client.as_mut() {
            Some(client) => client.connect().await,
            None => Err(gree::Error::NotConnected),
        };

        match result {
            Ok(()) => {
                info!("connected to {}", self.config);

                self.state = ConnectionState::Connected;
                self.broadcast(Push::ConnectionStatus(ConnectionStatus::Connected));

                Ok(())
            }
            Err(err) => {
                error!("connection to {} failed: {err}", self.config);

                self.state = ConnectionState::Disconnected;
                self.broadcast(Push::ConnectionStatus(ConnectionStatus::Error));

                Err(err.into())
            }
        }
    }

    async fn teardown(&mut self) {
        if let Some(mut client) = self.client.take() {
            client.disconnect().await;
        }

        self.state = ConnectionState::Disconnected;
    }

    async fn set_property(&mut self, property: Property, value: Value) -> Result<()> {
        if self.state != ConnectionState::Connected {
            return Err(Error::NotConnected);
        }

        let Some(client) = self.client.as_mut() else {
            return Err(Error::NotConnected);
        };

        info!("set {property} = {value}");

        client.set_property(property, value).await?;

        Ok(())
    }

    fn snapshot(&self) -> Snapshot {
        let device_id = self.client.as_ref().and_then(|client| client.device_id());

        Snapshot {
            device_status: self.status.clone(),
            hvac_connected: self.state == ConnectionState::Connected && device_id.is_some(),
            device_id,
        }
    }

    fn handle_event(&mut self, generation: u64, event: Event) {
        if generation != self.generation {
            debug!("dropping event from a replaced client: {event:?}");
            return;
        }

        match &event {
            Event::Connected => {
                self.broadcast(Push::ConnectionStatus(ConnectionStatus::Connected));
            }
            Event::Disconnected => {
                info!("unit reported disconnect");
                self.broadcast(Push::ConnectionStatus(ConnectionStatus::Disconnected));
            }
            Event::Update(status) => {
                debug!("status update: {status:?}");

                self.status = status.clone();
                self.broadcast(Push::DeviceUpdate(status.clone()));
            }
            Event::Failure(message) => {
                error!("unit error: {message}");

                self.broadcast(Push::ConnectionStatus(ConnectionStatus::Error));
                self.broadcast(Push::Error {
                    message: message.clone(),
                });
            }
            Event::NoResponse => {
                warn!("unit stopped responding");
                self.broadcast(Push::ConnectionStatus(ConnectionStatus::Error));
            }
        }

        self.state = reduce(self.state, &event);
    }

    fn broadcast(&self, push: Push) {
        // No subscribers is fine, e.g. before the first ui client arrives.
        let _ = self.push.send(push);
    }
}

fn spawn_forwarder(
    generation: u64,
    mut events: mpsc::UnboundedReceiver<Event>,
    tx: mpsc::Sender<Command>,
) {
    task::spawn(async move {
        while let Some(event) = events.recv().await {
            if tx.send(Command::Vendor(generation, event)).await.is_err() {
                return;
            }
        }

        // The client dropped its event channel without a proper goodbye.
        let _ = tx.send(Command::Vendor(generation, Event::Disconnected)).await;
    });
}
