use std::fmt;

use serde::{de::value, de::IntoDeserializer, Deserialize, Serialize};

#[derive(Copy, Clone, Debug, Deserialize, Serialize, PartialEq)]
#[serde(rename_all = "snake_case")]
pub enum ModeFunction {
    Thermostat,
    FanSpeed,
}

impl std::str::FromStr for ModeFunction {
    type Err = value::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::deserialize(s.into_deserializer())
    }
}

#[derive(Copy, Clone, Debug, Deserialize, Serialize, PartialEq)]
#[serde(rename_all = "snake_case")]
pub enum Mode {
    Auto,
    Cool,
    Heat,
    Dry,
    FanOnly,
    Low,
    Medium,
    High,
}

impl Mode {
    pub const fn thermostat_modes() -> [Mode; 5] {
        [Mode::Auto, Mode::Cool, Mode::Heat, Mode::Dry, Mode::FanOnly]
    }

    pub const fn fan_speed_modes() -> [Mode; 4] {
        [Mode::Auto, Mode::Low, Mode::Medium, Mode::High]
    }
}

impl std::str::FromStr for Mode {
    type Err = value::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::deserialize(s.into_deserializer())
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.serialize(f)
    }
}
