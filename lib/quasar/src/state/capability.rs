use std::str::FromStr;

use serde::de;
use serde::ser::SerializeStruct;
use serde::{Deserialize, Serialize};

use crate::{Mode, ModeFunction, RangeFunction, ToggleFunction};

/// Capability state, used both in query responses and in action requests.
#[derive(Debug, Clone, PartialEq)]
pub enum Capability {
    OnOff {
        value: bool,
    },
    Mode {
        function: ModeFunction,
        mode: Mode,
    },
    Toggle {
        function: ToggleFunction,
        value: bool,
    },
    Range {
        function: RangeFunction,
        value: f32,
        relative: bool,
    },
}

impl Capability {
    pub fn on_off(value: bool) -> Capability {
        Capability::OnOff { value }
    }

    pub fn mode(function: ModeFunction, mode: Mode) -> Capability {
        Capability::Mode { function, mode }
    }

    pub fn toggle(function: ToggleFunction, value: bool) -> Capability {
        Capability::Toggle { function, value }
    }

    pub fn range(function: RangeFunction, value: f32) -> Capability {
        Capability::Range {
            function,
            value,
            relative: false,
        }
    }
}

#[derive(Deserialize, Serialize)]
struct State<S, U> {
    instance: S,
    value: U,

    #[serde(skip_serializing)]
    #[serde(default)]
    relative: bool,
}

impl<S, U> State<S, U> {
    fn new(instance: S, value: U) -> State<S, U> {
        State {
            instance,
            value,
            relative: false,
        }
    }
}

impl serde::ser::Serialize for Capability {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        let mut capability = serializer.serialize_struct("Capability", 2)?;

        match self {
            Capability::OnOff { value } => {
                capability.serialize_field("type", "devices.capabilities.on_off")?;
                capability.serialize_field("state", &State::new("on", value))?;
            }
            Capability::Mode { function, mode } => {
                capability.serialize_field("type", "devices.capabilities.mode")?;
                capability.serialize_field("state", &State::new(function, mode))?;
            }
            Capability::Toggle { function, value } => {
                capability.serialize_field("type", "devices.capabilities.toggle")?;
                capability.serialize_field("state", &State::new(function, value))?;
            }
            Capability::Range {
                function,
                value,
                relative: _,
            } => {
                capability.serialize_field("type", "devices.capabilities.range")?;
                capability.serialize_field("state", &State::new(function, value))?;
            }
        }

        capability.end()
    }
}

impl<'de> de::Deserialize<'de> for Capability {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: de::Deserializer<'de>,
    {
        deserializer.deserialize_struct("Capability", FIELDS, CapabilityVisitor)
    }
}

struct CapabilityVisitor;

#[derive(Deserialize)]
#[serde(field_identifier, rename_all = "lowercase")]
enum CapabilityField {
    Type,
    State,
}
const FIELDS: &[&str] = &["type", "state"];

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum Value {
    String(String),
    Bool(bool),
    Float(f32),
}

impl<'de> de::Visitor<'de> for CapabilityVisitor {
    type Value = Capability;

    fn visit_map<A>(self, mut map: A) -> Result<Self::Value, A::Error>
    where
        A: de::MapAccess<'de>,
    {
        let mut cap_type: Option<String> = None;
        let mut state: Option<State<String, Value>> = None;

        while let Some(key) = map.next_key()? {
            match key {
                CapabilityField::Type => cap_type = Some(map.next_value()?),
                CapabilityField::State => state = Some(map.next_value()?),
            }
        }

        let cap_type = cap_type.ok_or_else(|| de::Error::missing_field("type"))?;
        let state = state.ok_or_else(|| de::Error::missing_field("state"))?;

        match cap_type.as_str() {
            "devices.capabilities.on_off" => match state.value {
                Value::Bool(value) => Ok(Capability::OnOff { value }),
                other => Err(de::Error::custom(format!(
                    "on_off expects a boolean state, got {other:?}"
                ))),
            },
            "devices.capabilities.mode" => match state.value {
                Value::String(value) => {
                    let function =
                        ModeFunction::from_str(&state.instance).map_err(de::Error::custom)?;
                    let mode = Mode::from_str(&value).map_err(de::Error::custom)?;

                    Ok(Capability::Mode { function, mode })
                }
                other => Err(de::Error::custom(format!(
                    "mode expects a string state, got {other:?}"
                ))),
            },
            "devices.capabilities.toggle" => match state.value {
                Value::Bool(value) => {
                    let function =
                        ToggleFunction::from_str(&state.instance).map_err(de::Error::custom)?;

                    Ok(Capability::Toggle { function, value })
                }
                other => Err(de::Error::custom(format!(
                    "toggle expects a boolean state, got {other:?}"
                ))),
            },
            "devices.capabilities.range" => match state.value {
                Value::Float(value) => {
                    let function =
                        RangeFunction::from_str(&state.instance).map_err(de::Error::custom)?;

                    Ok(Capability::Range {
                        function,
                        value,
                        relative: state.relative,
                    })
                }
                other => Err(de::Error::custom(format!(
                    "range expects a numeric state, got {other:?}"
                ))),
            },
            _ => Err(de::Error::unknown_variant(
                &cap_type,
                &[
                    "devices.capabilities.on_off",
                    "devices.capabilities.mode",
                    "devices.capabilities.toggle",
                    "devices.capabilities.range",
                ],
            )),
        }
    }

    fn expecting(&self, formatter: &mut std::fmt::Formatter) -> std::fmt::Result {
        formatter.write_str("a capability state object")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{from_value, json, to_value};

    #[test]
    fn test_on_off() {
        assert_eq!(
            to_value(Capability::on_off(false)).unwrap(),
            json!({
                "type": "devices.capabilities.on_off",
                "state": {"instance": "on", "value": false}
            })
        );

        assert_eq!(
            from_value::<Capability>(json!({
                "type": "devices.capabilities.on_off",
                "state": {"instance": "on", "value": true}
            }))
            .unwrap(),
            Capability::OnOff { value: true }
        );
    }

    #[test]
    fn test_mode() {
        assert_eq!(
            to_value(Capability::mode(ModeFunction::Thermostat, Mode::Cool)).unwrap(),
            json!({
                "type": "devices.capabilities.mode",
                "state": {"instance": "thermostat", "value": "cool"}
            })
        );

        assert_eq!(
            from_value::<Capability>(json!({
                "type": "devices.capabilities.mode",
                "state": {"instance": "fan_speed", "value": "high"}
            }))
            .unwrap(),
            Capability::Mode {
                function: ModeFunction::FanSpeed,
                mode: Mode::High
            }
        );
    }

    #[test]
    fn test_toggle() {
        assert_eq!(
            to_value(Capability::toggle(ToggleFunction::Lights, true)).unwrap(),
            json!({
                "type": "devices.capabilities.toggle",
                "state": {"instance": "lights", "value": true}
            })
        );

        assert_eq!(
            from_value::<Capability>(json!({
                "type": "devices.capabilities.toggle",
                "state": {"instance": "swing", "value": false}
            }))
            .unwrap(),
            Capability::Toggle {
                function: ToggleFunction::Swing,
                value: false
            }
        );
    }

    #[test]
    fn test_range() {
        assert_eq!(
            to_value(Capability::range(RangeFunction::Temperature, 22.0)).unwrap(),
            json!({
                "type": "devices.capabilities.range",
                "state": {"instance": "temperature", "value": 22.0}
            })
        );

        assert_eq!(
            from_value::<Capability>(json!({
                "type": "devices.capabilities.range",
                "state": {"instance": "temperature", "value": 18.0}
            }))
            .unwrap(),
            Capability::Range {
                function: RangeFunction::Temperature,
                value: 18.0,
                relative: false
            }
        );

        assert_eq!(
            from_value::<Capability>(json!({
                "type": "devices.capabilities.range",
                "state": {"instance": "temperature", "value": 2.0, "relative": true}
            }))
            .unwrap(),
            Capability::Range {
                function: RangeFunction::Temperature,
                value: 2.0,
                relative: true
            }
        );
    }

    #[test]
    fn test_unknown_capability_type() {
        assert!(from_value::<Capability>(json!({
            "type": "devices.capabilities.color_setting",
            "state": {"instance": "hsv", "value": "red"}
        }))
        .is_err());
    }
}
