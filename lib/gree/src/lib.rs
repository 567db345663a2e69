mod client;
mod property;
mod scan;

mod error;
pub use error::Error;

pub use client::{Client, Config, Event};
pub use property::{DeviceStatus, FanSpeed, Mode, Property, Swing, Switch};
pub use scan::{scan, DeviceEndpoint, Subnet, SCAN_WINDOW};

#[cfg(feature = "stub")]
pub use client::StubClient;

pub type Result<T> = std::result::Result<T, Error>;
