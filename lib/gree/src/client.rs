use std::fmt;

use async_trait::async_trait;
use serde_json::Value;

use crate::{DeviceStatus, Property, Result};

#[cfg(test)]
use mockall::automock;

/// Target endpoint of a unit.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Config {
    pub host: String,
    pub port: u16,
}

impl Config {
    pub const DEFAULT_PORT: u16 = 7000;

    pub fn new<H: Into<String>>(host: H, port: u16) -> Config {
        Config {
            host: host.into(),
            port,
        }
    }

    /// Parses `host[:port]`, falling back to the default port on a
    /// missing or unparseable port part.
    pub fn from_host(host: &str) -> Config {
        match host.split_once(':') {
            Some((host, port)) => Config {
                host: host.to_string(),
                port: port.parse().unwrap_or(Self::DEFAULT_PORT),
            },
            None => Config {
                host: host.to_string(),
                port: Self::DEFAULT_PORT,
            },
        }
    }
}

impl fmt::Display for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.host, self.port)
    }
}

/// Events the vendor client reports while a connection is alive.
#[derive(Clone, Debug, PartialEq)]
pub enum Event {
    Connected,
    Disconnected,
    Update(DeviceStatus),
    Failure(String),
    NoResponse,
}

/// The vendor client seam. The proprietary wire protocol lives behind this
/// trait; the bridge only ever talks to these five operations plus the
/// event channel handed out at construction time.
#[cfg_attr(test, automock)]
#[async_trait]
pub trait Client: Send {
    async fn connect(&mut self) -> Result<()>;

    async fn disconnect(&mut self);

    async fn set_property(&mut self, property: Property, value: Value) -> Result<()>;

    /// Identifier the unit reported during the handshake.
    /// `None` until a connection has been established.
    fn device_id(&self) -> Option<String>;
}

/// In-memory simulated unit. Acknowledges connects, applies property
/// writes to its own snapshot and reports them back as update events.
#[cfg(feature = "stub")]
pub struct StubClient {
    config: Config,
    device_id: Option<String>,
    status: DeviceStatus,
    events: tokio::sync::mpsc::UnboundedSender<Event>,
}

#[cfg(feature = "stub")]
impl StubClient {
    pub fn new(config: Config) -> (StubClient, tokio::sync::mpsc::UnboundedReceiver<Event>) {
        let (tx, rx) = tokio::sync::mpsc::unbounded_channel();

        let client = StubClient {
            config,
            device_id: None,
            status: DeviceStatus::default(),
            events: tx,
        };

        (client, rx)
    }

    fn emit(&self, event: Event) {
        let _ = self.events.send(event);
    }
}

#[cfg(feature = "stub")]
#[async_trait]
impl Client for StubClient {
    async fn connect(&mut self) -> Result<()> {
        log::info!("stub unit at {} connected", self.config);

        self.device_id = Some(format!("stub-{}", self.config.host));
        self.emit(Event::Connected);
        self.emit(Event::Update(self.status.clone()));

        Ok(())
    }

    async fn disconnect(&mut self) {
        log::info!("stub unit at {} disconnected", self.config);

        self.device_id = None;
        self.emit(Event::Disconnected);
    }

    async fn set_property(&mut self, property: Property, value: Value) -> Result<()> {
        if self.device_id.is_none() {
            return Err(crate::Error::NotConnected);
        }

        log::info!("stub set {property} = {value}");

        self.status.set(property, &value)?;
        self.emit(Event::Update(self.status.clone()));

        Ok(())
    }

    fn device_id(&self) -> Option<String> {
        self.device_id.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_from_host() {
        assert_eq!(
            Config::from_host("192.168.31.8"),
            Config::new("192.168.31.8", 7000)
        );
        assert_eq!(
            Config::from_host("192.168.31.8:7002"),
            Config::new("192.168.31.8", 7002)
        );
        assert_eq!(
            Config::from_host("192.168.31.8:garbage"),
            Config::new("192.168.31.8", 7000)
        );
    }

    #[tokio::test]
    async fn test_mock_client_rejects_value() {
        let mut client = MockClient::new();

        client
            .expect_set_property()
            .returning(|property, value| Err(crate::Error::Rejected(property, value)));

        let result = client
            .set_property(Property::Mode, serde_json::json!("defrost"))
            .await;

        assert!(matches!(
            result,
            Err(crate::Error::Rejected(Property::Mode, _))
        ));
    }
}

#[cfg(all(test, feature = "stub"))]
mod stub_tests {
    use super::*;
    use crate::{Error, Switch};
    use serde_json::json;

    #[tokio::test]
    async fn test_stub_reports_updates() {
        let (mut client, mut events) = StubClient::new(Config::from_host("10.0.0.2"));

        assert!(client.device_id().is_none());
        assert!(matches!(
            client.set_property(Property::Power, json!("on")).await,
            Err(Error::NotConnected)
        ));

        client.connect().await.unwrap();
        assert_eq!(events.recv().await, Some(Event::Connected));
        assert!(matches!(events.recv().await, Some(Event::Update(_))));

        client
            .set_property(Property::Power, json!("on"))
            .await
            .unwrap();

        match events.recv().await {
            Some(Event::Update(status)) => assert_eq!(status.power, Switch::On),
            other => panic!("expected update event, got {other:?}"),
        }
    }
}
