use super::{Capability, Property};
use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct Response {
    request_id: String,
    payload: ResponsePayload,
}

impl Response {
    pub fn new(request_id: String, devices: Vec<ResponseDevice>) -> Response {
        Response {
            request_id,
            payload: ResponsePayload { devices },
        }
    }
}

#[derive(Debug, Serialize)]
struct ResponsePayload {
    devices: Vec<ResponseDevice>,
}

#[derive(Debug, Serialize)]
pub struct ResponseDevice {
    id: String,

    #[serde(skip_serializing_if = "Vec::is_empty")]
    capabilities: Vec<Capability>,

    #[serde(skip_serializing_if = "Vec::is_empty")]
    properties: Vec<Property>,

    #[serde(skip_serializing_if = "Option::is_none")]
    error_code: Option<&'static str>,

    #[serde(skip_serializing_if = "Option::is_none")]
    error_message: Option<String>,
}

impl ResponseDevice {
    pub fn new(
        id: String,
        capabilities: Vec<Capability>,
        properties: Vec<Property>,
    ) -> ResponseDevice {
        ResponseDevice {
            id,
            capabilities,
            properties,
            error_code: None,
            error_message: None,
        }
    }

    pub fn not_found(id: String) -> ResponseDevice {
        ResponseDevice {
            id,
            capabilities: vec![],
            properties: vec![],
            error_code: Some("DEVICE_NOT_FOUND"),
            error_message: Some("устройство не найдено".to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{json, to_value};

    #[test]
    fn test_response() {
        assert_eq!(
            to_value(Response::new(
                "req-1".to_string(),
                vec![ResponseDevice::new(
                    "gree-ac-user-1".to_string(),
                    vec![Capability::on_off(true)],
                    vec![Property::temperature(21.0)],
                )],
            ))
            .unwrap(),
            json!({
                "request_id": "req-1",
                "payload": {
                    "devices": [{
                        "id": "gree-ac-user-1",
                        "capabilities": [{
                            "type": "devices.capabilities.on_off",
                            "state": {"instance": "on", "value": true}
                        }],
                        "properties": [{
                            "type": "devices.properties.float",
                            "state": {"instance": "temperature", "value": 21.0}
                        }]
                    }]
                }
            })
        );
    }

    #[test]
    fn test_not_found_device() {
        assert_eq!(
            to_value(ResponseDevice::not_found("ghost".to_string())).unwrap(),
            json!({
                "id": "ghost",
                "error_code": "DEVICE_NOT_FOUND",
                "error_message": "устройство не найдено"
            })
        );
    }
}
