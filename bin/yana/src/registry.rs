use std::collections::HashMap;

use gree::DeviceEndpoint;
use log::info;
use quasar::{
    Device, DeviceCapability, DeviceProperty, DeviceType, Mode, ModeFunction, Range, RangeFunction,
    TemperatureUnit, ToggleFunction,
};
use tokio::sync::Mutex;

/// A platform device plus the endpoint it was discovered at. The synthetic
/// default device has no endpoint.
#[derive(Clone)]
pub struct RegisteredDevice {
    pub device: Device,
    pub endpoint: Option<DeviceEndpoint>,
}

/// Per-user device lists, populated lazily on the first discovery request
/// and lost on restart.
#[derive(Default)]
pub struct Registry {
    devices: Mutex<HashMap<String, Vec<RegisteredDevice>>>,
}

impl Registry {
    pub fn new() -> Registry {
        Registry::default()
    }

    pub async fn cached(&self, user_id: &str) -> Option<Vec<RegisteredDevice>> {
        let devices = self.devices.lock().await;

        devices.get(user_id).filter(|list| !list.is_empty()).cloned()
    }

    pub async fn store(&self, user_id: &str, list: Vec<RegisteredDevice>) {
        let mut devices = self.devices.lock().await;

        devices.insert(user_id.to_string(), list);
    }

    pub async fn remove(&self, user_id: &str) {
        let mut devices = self.devices.lock().await;

        devices.remove(user_id);
        info!("dropped devices of user {user_id}");
    }

    pub async fn contains(&self, user_id: &str, device_id: &str) -> bool {
        let devices = self.devices.lock().await;

        devices
            .get(user_id)
            .map(|list| list.iter().any(|entry| entry.device.id == device_id))
            .unwrap_or(false)
    }

    pub async fn endpoint_for(&self, user_id: &str, device_id: &str) -> Option<DeviceEndpoint> {
        let devices = self.devices.lock().await;

        devices
            .get(user_id)?
            .iter()
            .find(|entry| entry.device.id == device_id)?
            .endpoint
            .clone()
    }
}

/// Builds the user's device list from a scan result. An empty scan still
/// yields one synthetic default device, so the platform always has
/// something to display.
pub fn devices_from_scan(user_id: &str, endpoints: Vec<DeviceEndpoint>) -> Vec<RegisteredDevice> {
    if endpoints.is_empty() {
        info!("no units found, registering the default device for {user_id}");

        return vec![RegisteredDevice {
            device: ac_device(
                format!("gree-ac-{user_id}-1"),
                "Кондиционер Gree".to_string(),
                "Гостиная".to_string(),
            ),
            endpoint: None,
        }];
    }

    endpoints
        .into_iter()
        .enumerate()
        .map(|(index, endpoint)| {
            let number = index + 1;

            let room = if index == 0 {
                "Гостиная".to_string()
            } else {
                format!("Комната {number}")
            };

            RegisteredDevice {
                device: ac_device(
                    format!("gree-ac-{user_id}-{number}"),
                    format!("Кондиционер Gree {number}"),
                    room,
                ),
                endpoint: Some(endpoint),
            }
        })
        .collect()
}

fn ac_device(id: String, name: String, room: String) -> Device {
    Device {
        id,
        name,
        room,
        device_type: DeviceType::ThermostatAc,
        capabilities: vec![
            DeviceCapability::on_off(false).retrievable(),
            DeviceCapability::range(
                RangeFunction::Temperature,
                TemperatureUnit::Celsius,
                Range {
                    min: crate::TEMPERATURE_MIN,
                    max: crate::TEMPERATURE_MAX,
                    precision: 1.0,
                },
            )
            .retrievable(),
            DeviceCapability::mode(ModeFunction::Thermostat, Mode::thermostat_modes().to_vec())
                .retrievable(),
            DeviceCapability::mode(ModeFunction::FanSpeed, Mode::fan_speed_modes().to_vec())
                .retrievable(),
            DeviceCapability::toggle(ToggleFunction::Lights).retrievable(),
            DeviceCapability::toggle(ToggleFunction::Swing).retrievable(),
        ],
        properties: vec![DeviceProperty::temperature().retrievable()],
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::net::Ipv4Addr;

    fn endpoint(ip: [u8; 4]) -> DeviceEndpoint {
        DeviceEndpoint {
            ip: Ipv4Addr::from(ip),
            port: 7000,
            timestamp: 0,
            message: String::new(),
        }
    }

    #[test]
    fn test_empty_scan_yields_default_device() {
        let devices = devices_from_scan("chipp", vec![]);

        assert_eq!(devices.len(), 1);
        assert_eq!(devices[0].device.id, "gree-ac-chipp-1");
        assert_eq!(devices[0].device.name, "Кондиционер Gree");
        assert!(devices[0].endpoint.is_none());
    }

    #[test]
    fn test_devices_follow_scan_results() {
        let devices = devices_from_scan(
            "chipp",
            vec![endpoint([192, 168, 31, 8]), endpoint([192, 168, 31, 9])],
        );

        assert_eq!(devices.len(), 2);
        assert_eq!(devices[0].device.id, "gree-ac-chipp-1");
        assert_eq!(devices[0].device.room, "Гостиная");
        assert_eq!(devices[1].device.id, "gree-ac-chipp-2");
        assert_eq!(devices[1].device.room, "Комната 2");
        assert_eq!(
            devices[1].endpoint.as_ref().map(|e| e.ip),
            Some(Ipv4Addr::new(192, 168, 31, 9))
        );
    }

    #[tokio::test]
    async fn test_registry_caches_per_user() {
        let registry = Registry::new();

        assert!(registry.cached("chipp").await.is_none());

        registry
            .store("chipp", devices_from_scan("chipp", vec![endpoint([10, 0, 0, 2])]))
            .await;

        let cached = registry.cached("chipp").await.unwrap();
        assert_eq!(cached.len(), 1);
        assert!(registry.contains("chipp", "gree-ac-chipp-1").await);
        assert!(!registry.contains("other", "gree-ac-chipp-1").await);

        assert_eq!(
            registry
                .endpoint_for("chipp", "gree-ac-chipp-1")
                .await
                .map(|e| e.ip),
            Some(Ipv4Addr::new(10, 0, 0, 2))
        );

        registry.remove("chipp").await;
        assert!(registry.cached("chipp").await.is_none());
    }
}
