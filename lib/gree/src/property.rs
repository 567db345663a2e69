use std::fmt;

use serde::{de::value, de::IntoDeserializer, Deserialize, Serialize};
use serde_json::Value;

use crate::{Error, Result};

/// Flat property vocabulary of the unit. Wire names are camelCase,
/// matching what the vendor client exchanges with the hardware.
#[derive(Copy, Clone, Debug, Deserialize, Serialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "camelCase")]
pub enum Property {
    Power,
    Mode,
    Temperature,
    CurrentTemperature,
    FanSpeed,
    SwingHor,
    SwingVert,
    Lights,
    Health,
    Sleep,
    Turbo,
    Quiet,
    Blow,
    Air,
    PowerSave,
}

impl std::str::FromStr for Property {
    type Err = value::Error;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Self::deserialize(s.into_deserializer())
    }
}

impl fmt::Display for Property {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.serialize(f)
    }
}

#[derive(Copy, Clone, Debug, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Switch {
    On,
    Off,
}

impl Switch {
    pub fn is_on(&self) -> bool {
        matches!(self, Switch::On)
    }
}

impl From<bool> for Switch {
    fn from(value: bool) -> Self {
        if value {
            Switch::On
        } else {
            Switch::Off
        }
    }
}

#[derive(Copy, Clone, Debug, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum Mode {
    Auto,
    Cool,
    Heat,
    Dry,
    FanOnly,
}

#[derive(Copy, Clone, Debug, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum FanSpeed {
    Auto,
    Low,
    Medium,
    High,
}

#[derive(Copy, Clone, Debug, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum Swing {
    Default,
    Full,
}

/// Last known snapshot of the unit. One instance per process, overwritten
/// by vendor update events, read by every status consumer.
#[derive(Clone, Debug, Deserialize, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct DeviceStatus {
    pub power: Switch,
    pub mode: Mode,
    pub temperature: u8,
    pub current_temperature: f32,
    pub fan_speed: FanSpeed,
    pub swing_hor: Swing,
    pub swing_vert: Swing,
    pub lights: Switch,
    pub health: Switch,
    pub sleep: Switch,
    pub turbo: Switch,
    pub quiet: Switch,
    pub blow: Switch,
    pub air: Switch,
    pub power_save: Switch,
}

impl Default for DeviceStatus {
    fn default() -> Self {
        DeviceStatus {
            power: Switch::Off,
            mode: Mode::Cool,
            temperature: 25,
            current_temperature: 0.0,
            fan_speed: FanSpeed::Auto,
            swing_hor: Swing::Default,
            swing_vert: Swing::Default,
            lights: Switch::Off,
            health: Switch::Off,
            sleep: Switch::Off,
            turbo: Switch::Off,
            quiet: Switch::Off,
            blow: Switch::Off,
            air: Switch::Off,
            power_save: Switch::Off,
        }
    }
}

impl DeviceStatus {
    /// Applies one property update. Values come in as loose JSON
    /// (numbers for temperatures, strings for everything else).
    pub fn set(&mut self, property: Property, value: &Value) -> Result<()> {
        match property {
            Property::Power => self.power = parse(property, value)?,
            Property::Mode => self.mode = parse(property, value)?,
            Property::Temperature => {
                self.temperature = value
                    .as_u64()
                    .and_then(|v| u8::try_from(v).ok())
                    .ok_or_else(|| Error::Rejected(property, value.clone()))?;
            }
            Property::CurrentTemperature => {
                self.current_temperature = value
                    .as_f64()
                    .map(|v| v as f32)
                    .ok_or_else(|| Error::Rejected(property, value.clone()))?;
            }
            Property::FanSpeed => self.fan_speed = parse(property, value)?,
            Property::SwingHor => self.swing_hor = parse(property, value)?,
            Property::SwingVert => self.swing_vert = parse(property, value)?,
            Property::Lights => self.lights = parse(property, value)?,
            Property::Health => self.health = parse(property, value)?,
            Property::Sleep => self.sleep = parse(property, value)?,
            Property::Turbo => self.turbo = parse(property, value)?,
            Property::Quiet => self.quiet = parse(property, value)?,
            Property::Blow => self.blow = parse(property, value)?,
            Property::Air => self.air = parse(property, value)?,
            Property::PowerSave => self.power_save = parse(property, value)?,
        }

        Ok(())
    }
}

fn parse<T: serde::de::DeserializeOwned>(property: Property, value: &Value) -> Result<T> {
    serde_json::from_value(value.clone()).map_err(|_| Error::Rejected(property, value.clone()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{json, to_value};

    #[test]
    fn test_wire_names() {
        assert_eq!(
            to_value(DeviceStatus::default()).unwrap(),
            json!({
                "power": "off",
                "mode": "cool",
                "temperature": 25,
                "currentTemperature": 0.0,
                "fanSpeed": "auto",
                "swingHor": "default",
                "swingVert": "default",
                "lights": "off",
                "health": "off",
                "sleep": "off",
                "turbo": "off",
                "quiet": "off",
                "blow": "off",
                "air": "off",
                "powerSave": "off"
            })
        );
    }

    #[test]
    fn test_property_from_str() {
        use std::str::FromStr;

        assert_eq!(Property::from_str("power").unwrap(), Property::Power);
        assert_eq!(Property::from_str("fanSpeed").unwrap(), Property::FanSpeed);
        assert_eq!(Property::from_str("swingVert").unwrap(), Property::SwingVert);
        assert!(Property::from_str("compressor").is_err());
    }

    #[test]
    fn test_set_applies_values() {
        let mut status = DeviceStatus::default();

        status.set(Property::Power, &json!("on")).unwrap();
        status.set(Property::Mode, &json!("heat")).unwrap();
        status.set(Property::Temperature, &json!(22)).unwrap();
        status.set(Property::SwingVert, &json!("full")).unwrap();

        assert_eq!(status.power, Switch::On);
        assert_eq!(status.mode, Mode::Heat);
        assert_eq!(status.temperature, 22);
        assert_eq!(status.swing_vert, Swing::Full);
    }

    #[test]
    fn test_set_rejects_unknown_values() {
        let mut status = DeviceStatus::default();

        assert!(matches!(
            status.set(Property::Mode, &json!("defrost")),
            Err(Error::Rejected(Property::Mode, _))
        ));
        assert!(matches!(
            status.set(Property::Temperature, &json!("warm")),
            Err(Error::Rejected(Property::Temperature, _))
        ));

        assert_eq!(status, DeviceStatus::default());
    }
}
