mod capability;
mod property;

pub use capability::Capability;
pub use property::{Property, TemperatureUnit};

use serde::Serialize;

#[derive(Clone, Debug, Serialize)]
pub struct Device {
    pub id: String,
    pub name: String,
    pub room: String,

    #[serde(rename = "type")]
    pub device_type: DeviceType,

    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub capabilities: Vec<Capability>,

    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub properties: Vec<Property>,
}

#[derive(Copy, Clone, Debug, Serialize, PartialEq)]
pub enum DeviceType {
    #[serde(rename = "devices.types.thermostat.ac")]
    ThermostatAc,
}

#[cfg(test)]
mod tests {
    use super::*;

    use serde_json::{json, to_value};

    #[test]
    fn test_device_type() {
        assert_eq!(
            to_value(DeviceType::ThermostatAc).unwrap(),
            json!("devices.types.thermostat.ac")
        );
    }

    #[test]
    fn test_device() {
        assert_eq!(
            to_value(Device {
                id: "gree-ac-user-1".to_string(),
                name: "Кондиционер Gree".to_string(),
                room: "Гостиная".to_string(),
                device_type: DeviceType::ThermostatAc,
                capabilities: vec![Capability::on_off(false).retrievable()],
                properties: vec![],
            })
            .unwrap(),
            json!({
                "id": "gree-ac-user-1",
                "name": "Кондиционер Gree",
                "room": "Гостиная",
                "type": "devices.types.thermostat.ac",
                "capabilities": [{
                    "type": "devices.capabilities.on_off",
                    "retrievable": true,
                    "reportable": false,
                    "parameters": {"split": false}
                }]
            })
        );
    }
}
