use crate::StateCapability;

use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct Request {
    pub payload: Payload,
}

#[derive(Debug, Deserialize, PartialEq)]
pub struct Payload {
    pub devices: Vec<RequestDevice>,
}

#[derive(Debug, Deserialize, PartialEq)]
pub struct RequestDevice {
    pub id: String,
    pub capabilities: Vec<StateCapability>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Mode, ModeFunction};
    use serde_json::{from_value, json};

    #[test]
    fn test_request_parsing() {
        let request: Request = from_value(json!({
            "payload": {
                "devices": [{
                    "id": "gree-ac-user-1",
                    "custom_data": {},
                    "capabilities": [{
                        "type": "devices.capabilities.on_off",
                        "state": {"instance": "on", "value": true}
                    }, {
                        "type": "devices.capabilities.mode",
                        "state": {"instance": "thermostat", "value": "heat"}
                    }]
                }]
            }
        }))
        .unwrap();

        let devices = request.payload.devices;

        assert_eq!(devices.len(), 1);
        assert_eq!(devices[0].id, "gree-ac-user-1");
        assert_eq!(
            devices[0].capabilities,
            vec![
                StateCapability::on_off(true),
                StateCapability::mode(ModeFunction::Thermostat, Mode::Heat),
            ]
        );
    }
}
