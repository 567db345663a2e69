use serde::ser::SerializeStruct;
use serde::Serialize;

/// Property state for query responses.
#[derive(Debug, Clone, PartialEq)]
pub enum Property {
    Temperature { value: f32 },
}

impl Property {
    pub fn temperature(value: f32) -> Property {
        Property::Temperature { value }
    }
}

#[derive(Serialize)]
struct State<U> {
    instance: &'static str,
    value: U,
}

impl serde::ser::Serialize for Property {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        let mut property = serializer.serialize_struct("Property", 2)?;

        match self {
            Property::Temperature { value } => {
                property.serialize_field("type", "devices.properties.float")?;
                property.serialize_field(
                    "state",
                    &State {
                        instance: "temperature",
                        value,
                    },
                )?;
            }
        }

        property.end()
    }
}
