use serde::ser::SerializeStruct;
use serde::{Deserialize, Serialize};

/// Property descriptions for device discovery responses. The unit reports
/// a single float property, the measured room temperature.
#[derive(Clone, Debug, PartialEq)]
pub enum Property {
    Temperature {
        unit: TemperatureUnit,
        retrievable: bool,
        reportable: bool,
    },
}

impl Property {
    pub fn temperature() -> Property {
        Property::Temperature {
            unit: TemperatureUnit::Celsius,
            retrievable: false,
            reportable: false,
        }
    }

    pub fn retrievable(mut self) -> Property {
        match self {
            Property::Temperature {
                ref mut retrievable,
                ..
            } => *retrievable = true,
        }

        self
    }

    pub fn reportable(mut self) -> Property {
        match self {
            Property::Temperature {
                ref mut reportable, ..
            } => *reportable = true,
        }

        self
    }
}

#[derive(Copy, Clone, Debug, Deserialize, Serialize, PartialEq)]
pub enum TemperatureUnit {
    #[serde(rename = "unit.temperature.celsius")]
    Celsius,
}

impl serde::ser::Serialize for Property {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        #[derive(Serialize)]
        struct Parameters<'a> {
            instance: &'static str,
            unit: &'a TemperatureUnit,
        }

        let mut property = serializer.serialize_struct("Property", 4)?;
        property.serialize_field("type", "devices.properties.float")?;

        match self {
            Property::Temperature {
                unit,
                retrievable,
                reportable,
            } => {
                property.serialize_field("retrievable", retrievable)?;
                property.serialize_field("reportable", reportable)?;
                property.serialize_field(
                    "parameters",
                    &Parameters {
                        instance: "temperature",
                        unit,
                    },
                )?;
            }
        }

        property.end()
    }
}
