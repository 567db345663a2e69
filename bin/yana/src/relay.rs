use chipp_http::{HttpClient, HttpMethod, NoInterceptor};
use gree::{DeviceEndpoint, DeviceStatus, Property};
use log::trace;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::{Error, Result};

/// HTTP client for the hvac relay service. Upstream failures keep their
/// status code so callers can pass it through.
pub struct RelayClient {
    client: HttpClient<NoInterceptor>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusResponse {
    pub device_status: DeviceStatus,
    pub hvac_connected: bool,
    pub device_id: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ScanResponse {
    devices: Vec<DeviceEndpoint>,
}

impl RelayClient {
    pub fn new(base_url: &str) -> Result<RelayClient> {
        let client = HttpClient::new(base_url)?;

        Ok(RelayClient { client })
    }

    pub async fn status(&self) -> Result<StatusResponse> {
        let request = self.client.new_request(["api", "status"]);

        let response = self
            .client
            .perform_request(request, |_, response| {
                Ok((response.status_code as u16, response.body))
            })
            .await?;

        decode(response)
    }

    pub async fn scan(&self) -> Result<Vec<DeviceEndpoint>> {
        let mut request = self.client.new_request(["api", "scan-hvac"]);
        request.set_method(HttpMethod::Post);

        let response = self
            .client
            .perform_request(request, |_, response| {
                Ok((response.status_code as u16, response.body))
            })
            .await?;

        let response: ScanResponse = decode(response)?;

        Ok(response.devices)
    }

    pub async fn connect(&self, endpoint: &DeviceEndpoint) -> Result<()> {
        #[derive(Serialize)]
        struct Body {
            host: String,
        }

        let mut request = self.client.new_request(["api", "connect"]);
        request.set_method(HttpMethod::Post);
        request.set_json_body(&Body {
            host: format!("{}:{}", endpoint.ip, endpoint.port),
        });

        trace!("connect {}:{}", endpoint.ip, endpoint.port);

        let response = self
            .client
            .perform_request(request, |_, response| {
                Ok((response.status_code as u16, response.body))
            })
            .await?;

        decode::<Value>(response)?;

        Ok(())
    }

    pub async fn command(&self, property: Property, value: &Value) -> Result<()> {
        #[derive(Serialize)]
        struct Body<'a> {
            property: Property,
            value: &'a Value,
        }

        let mut request = self.client.new_request(["api", "command"]);
        request.set_method(HttpMethod::Post);
        request.set_json_body(&Body { property, value });

        trace!("command {property} = {value}");

        let response = self
            .client
            .perform_request(request, |_, response| {
                Ok((response.status_code as u16, response.body))
            })
            .await?;

        decode::<Value>(response)?;

        Ok(())
    }
}

fn decode<T: serde::de::DeserializeOwned>((status_code, body): (u16, Vec<u8>)) -> Result<T> {
    if status_code != 200 {
        return Err(Error::Upstream(status_code));
    }

    Ok(serde_json::from_slice(&body)?)
}
