use serde::ser::SerializeStruct;
use serde::Serialize;

use crate::{Mode, ModeFunction, Range, RangeFunction, TemperatureUnit, ToggleFunction};

/// Capability descriptions for device discovery responses.
#[derive(Clone, Debug)]
pub enum Capability {
    OnOff {
        split: bool,
        retrievable: bool,
        reportable: bool,
    },
    Range {
        function: RangeFunction,
        unit: TemperatureUnit,
        range: Range,
        retrievable: bool,
        reportable: bool,
    },
    Mode {
        function: ModeFunction,
        modes: Vec<Mode>,
        retrievable: bool,
        reportable: bool,
    },
    Toggle {
        function: ToggleFunction,
        retrievable: bool,
        reportable: bool,
    },
}

impl Capability {
    pub fn on_off(split: bool) -> Capability {
        Capability::OnOff {
            split,
            retrievable: false,
            reportable: false,
        }
    }

    pub fn range(function: RangeFunction, unit: TemperatureUnit, range: Range) -> Capability {
        Capability::Range {
            function,
            unit,
            range,
            retrievable: false,
            reportable: false,
        }
    }

    pub fn mode(function: ModeFunction, modes: Vec<Mode>) -> Capability {
        Capability::Mode {
            function,
            modes,
            retrievable: false,
            reportable: false,
        }
    }

    pub fn toggle(function: ToggleFunction) -> Capability {
        Capability::Toggle {
            function,
            retrievable: false,
            reportable: false,
        }
    }

    pub fn retrievable(mut self) -> Capability {
        match self {
            Capability::OnOff {
                ref mut retrievable,
                ..
            }
            | Capability::Range {
                ref mut retrievable,
                ..
            }
            | Capability::Mode {
                ref mut retrievable,
                ..
            }
            | Capability::Toggle {
                ref mut retrievable,
                ..
            } => *retrievable = true,
        }

        self
    }

    pub fn reportable(mut self) -> Capability {
        match self {
            Capability::OnOff {
                ref mut reportable, ..
            }
            | Capability::Range {
                ref mut reportable, ..
            }
            | Capability::Mode {
                ref mut reportable, ..
            }
            | Capability::Toggle {
                ref mut reportable, ..
            } => *reportable = true,
        }

        self
    }
}

impl serde::ser::Serialize for Capability {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        let mut capability = serializer.serialize_struct("Capability", 4)?;

        match self {
            Capability::OnOff {
                split,
                retrievable,
                reportable,
            } => {
                #[derive(Serialize)]
                struct Parameters<'a> {
                    split: &'a bool,
                }

                capability.serialize_field("type", "devices.capabilities.on_off")?;
                capability.serialize_field("retrievable", retrievable)?;
                capability.serialize_field("reportable", reportable)?;
                capability.serialize_field("parameters", &Parameters { split })?;
            }
            Capability::Range {
                function,
                unit,
                range,
                retrievable,
                reportable,
            } => {
                #[derive(Serialize)]
                struct Parameters<'a> {
                    instance: &'a RangeFunction,
                    unit: &'a TemperatureUnit,
                    range: &'a Range,
                }

                capability.serialize_field("type", "devices.capabilities.range")?;
                capability.serialize_field("retrievable", retrievable)?;
                capability.serialize_field("reportable", reportable)?;
                capability.serialize_field(
                    "parameters",
                    &Parameters {
                        instance: function,
                        unit,
                        range,
                    },
                )?;
            }
            Capability::Mode {
                function,
                modes,
                retrievable,
                reportable,
            } => {
                #[derive(Serialize)]
                struct ModeWrapper<'a> {
                    value: &'a Mode,
                }

                #[derive(Serialize)]
                struct Parameters<'a> {
                    instance: &'a ModeFunction,
                    modes: Vec<ModeWrapper<'a>>,
                }

                capability.serialize_field("type", "devices.capabilities.mode")?;
                capability.serialize_field("retrievable", retrievable)?;
                capability.serialize_field("reportable", reportable)?;
                capability.serialize_field(
                    "parameters",
                    &Parameters {
                        instance: function,
                        modes: modes.iter().map(|m| ModeWrapper { value: m }).collect(),
                    },
                )?;
            }
            Capability::Toggle {
                function,
                retrievable,
                reportable,
            } => {
                #[derive(Serialize)]
                struct Parameters<'a> {
                    instance: &'a ToggleFunction,
                }

                capability.serialize_field("type", "devices.capabilities.toggle")?;
                capability.serialize_field("retrievable", retrievable)?;
                capability.serialize_field("reportable", reportable)?;
                capability.serialize_field("parameters", &Parameters { instance: function })?;
            }
        }

        capability.end()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{json, to_value};

    #[test]
    fn test_on_off_capability() {
        assert_eq!(
            to_value(Capability::on_off(false).retrievable()).unwrap(),
            json!({
                "type": "devices.capabilities.on_off",
                "retrievable": true,
                "reportable": false,
                "parameters": {
                    "split": false
                }
            })
        );
    }

    #[test]
    fn test_range_capability() {
        assert_eq!(
            to_value(
                Capability::range(
                    RangeFunction::Temperature,
                    TemperatureUnit::Celsius,
                    Range {
                        min: 16.0,
                        max: 30.0,
                        precision: 1.0,
                    },
                )
                .retrievable()
            )
            .unwrap(),
            json!({
                "type": "devices.capabilities.range",
                "retrievable": true,
                "reportable": false,
                "parameters": {
                    "instance": "temperature",
                    "unit": "unit.temperature.celsius",
                    "range": {
                        "min": 16.0,
                        "max": 30.0,
                        "precision": 1.0
                    }
                }
            })
        );
    }

    #[test]
    fn test_mode_capability() {
        assert_eq!(
            to_value(
                Capability::mode(
                    ModeFunction::FanSpeed,
                    Mode::fan_speed_modes().to_vec()
                )
                .retrievable()
                .reportable()
            )
            .unwrap(),
            json!({
                "type": "devices.capabilities.mode",
                "retrievable": true,
                "reportable": true,
                "parameters": {
                    "instance": "fan_speed",
                    "modes": [
                        {"value": "auto"},
                        {"value": "low"},
                        {"value": "medium"},
                        {"value": "high"}
                    ]
                }
            })
        );
    }

    #[test]
    fn test_toggle_capability() {
        assert_eq!(
            to_value(Capability::toggle(ToggleFunction::Swing)).unwrap(),
            json!({
                "type": "devices.capabilities.toggle",
                "retrievable": false,
                "reportable": false,
                "parameters": {
                    "instance": "swing",
                }
            })
        );
    }
}
