use std::collections::HashSet;
use std::net::{Ipv4Addr, SocketAddr};
use std::time::{SystemTime, UNIX_EPOCH};

use log::{debug, info, trace};
use serde::{Deserialize, Serialize};
use tokio::net::UdpSocket;
use tokio::time::{self, Duration, Instant};

use crate::Result;

/// Listen window for a scan pass. Fixed wall clock, the only
/// cancellation mechanism a scan has.
pub const SCAN_WINDOW: Duration = Duration::from_secs(20);

const PROBE_PORTS: [u16; 6] = [7000, 7001, 7002, 54321, 54322, 54323];

const PROBE_PAYLOADS: [&str; 7] = [
    r#"{"t": "scan"}"#,
    r#"{"t": "pack"}"#,
    r#"{"t": "bind"}"#,
    r#"{"t": "control"}"#,
    r#"{"pack": "scan"}"#,
    r#"{"cmd": "scan"}"#,
    r#"{"action": "discover"}"#,
];

const RESPONSE_KEYWORDS: [&str; 9] = [
    "mac",
    "device",
    "gree",
    "xiaomi",
    "mi",
    "ac",
    "hvac",
    "temperature",
    "power",
];

const MESSAGE_SNIPPET_LEN: usize = 100;

/// A /24 prefix, e.g. `192.168.31.`
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Subnet([u8; 3]);

impl Subnet {
    pub fn host(&self, host: u8) -> Ipv4Addr {
        let [a, b, c] = self.0;
        Ipv4Addr::new(a, b, c, host)
    }

    /// Derives the local /24 from the address the host would use to reach
    /// the outside world. No datagram is actually sent.
    pub async fn detect() -> Option<Subnet> {
        let socket = UdpSocket::bind("0.0.0.0:0").await.ok()?;
        socket.connect("8.8.8.8:53").await.ok()?;

        match socket.local_addr().ok()? {
            SocketAddr::V4(addr) => {
                let [a, b, c, _] = addr.ip().octets();
                Some(Subnet([a, b, c]))
            }
            SocketAddr::V6(_) => None,
        }
    }
}

impl Default for Subnet {
    fn default() -> Self {
        Subnet([192, 168, 31])
    }
}

impl std::str::FromStr for Subnet {
    type Err = std::net::AddrParseError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let prefix = s.strip_suffix('.').unwrap_or(s);
        let ip: Ipv4Addr = format!("{prefix}.0").parse()?;
        let [a, b, c, _] = ip.octets();
        Ok(Subnet([a, b, c]))
    }
}

impl std::fmt::Display for Subnet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let [a, b, c] = self.0;
        write!(f, "{a}.{b}.{c}.")
    }
}

/// A unit that answered a probe. Rediscovered on every scan, never stored
/// across restarts.
#[derive(Clone, Debug, Deserialize, Serialize, PartialEq)]
pub struct DeviceEndpoint {
    pub ip: Ipv4Addr,
    pub port: u16,
    pub timestamp: i64,
    pub message: String,
}

/// Sweeps hosts .1-.254 of the subnet with probe datagrams across the
/// known port list, then collects whatever answers within the window.
/// Individual send failures are logged and skipped; an empty result is a
/// normal outcome.
pub async fn scan(subnet: Subnet, window: Duration) -> Result<Vec<DeviceEndpoint>> {
    let socket = UdpSocket::bind("0.0.0.0:0").await?;

    info!("scanning {subnet}0/24");

    for host in 1..=254 {
        let ip = subnet.host(host);

        for payload in PROBE_PAYLOADS {
            for port in PROBE_PORTS {
                if let Err(err) = socket.send_to(payload.as_bytes(), (ip, port)).await {
                    debug!("probe to {ip}:{port} failed: {err}");
                }
            }
        }
    }

    collect(&socket, window).await
}

async fn collect(socket: &UdpSocket, window: Duration) -> Result<Vec<DeviceEndpoint>> {
    let mut found = Vec::new();
    let mut seen = HashSet::new();

    let deadline = Instant::now() + window;
    let mut buffer = [0; 1024];

    loop {
        let remaining = deadline.saturating_duration_since(Instant::now());
        if remaining.is_zero() {
            break;
        }

        let (size, addr) = match time::timeout(remaining, socket.recv_from(&mut buffer)).await {
            Ok(Ok(received)) => received,
            Ok(Err(err)) => {
                debug!("recv failed: {err}");
                continue;
            }
            Err(_) => break,
        };

        let addr = match addr {
            SocketAddr::V4(addr) => addr,
            SocketAddr::V6(_) => continue,
        };

        let message = String::from_utf8_lossy(&buffer[..size]);

        if !looks_like_device(&message) {
            trace!("ignored response from {addr}");
            continue;
        }

        if !seen.insert(*addr.ip()) {
            continue;
        }

        info!("found device at {addr}");

        found.push(DeviceEndpoint {
            ip: *addr.ip(),
            port: addr.port(),
            timestamp: unix_millis(),
            message: snippet(&message),
        });
    }

    info!("scan finished, {} device(s) found", found.len());

    Ok(found)
}

fn looks_like_device(message: &str) -> bool {
    RESPONSE_KEYWORDS
        .iter()
        .any(|keyword| message.contains(keyword))
}

fn snippet(message: &str) -> String {
    message.chars().take(MESSAGE_SNIPPET_LEN).collect()
}

fn unix_millis() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|elapsed| elapsed.as_millis() as i64)
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_subnet_parsing() {
        let subnet: Subnet = "10.0.0.".parse().unwrap();
        assert_eq!(subnet, Subnet([10, 0, 0]));
        assert_eq!(subnet.to_string(), "10.0.0.");

        let subnet: Subnet = "192.168.1.".parse().unwrap();
        assert_eq!(subnet.host(1), Ipv4Addr::new(192, 168, 1, 1));
        assert_eq!(subnet.host(254), Ipv4Addr::new(192, 168, 1, 254));

        assert!("not-a-subnet".parse::<Subnet>().is_err());
    }

    #[test]
    fn test_default_subnet() {
        assert_eq!(Subnet::default().to_string(), "192.168.31.");
    }

    #[test]
    fn test_response_classification() {
        assert!(looks_like_device(r#"{"mac": "aa:bb:cc"}"#));
        assert!(looks_like_device("gree ac unit"));
        assert!(looks_like_device(r#"{"temperature": 21}"#));
        assert!(!looks_like_device(r#"{"status": "ok"}"#));
        assert!(!looks_like_device(""));
    }

    #[test]
    fn test_snippet_truncation() {
        let long = "x".repeat(500);
        assert_eq!(snippet(&long).len(), MESSAGE_SNIPPET_LEN);
        assert_eq!(snippet("short"), "short");
    }
}
