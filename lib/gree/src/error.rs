use std::fmt;

use crate::Property;

#[derive(Debug)]
pub enum Error {
    Io(std::io::Error),
    Json(serde_json::Error),
    NotConnected,
    Rejected(Property, serde_json::Value),
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err)
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Self::Json(err)
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(err) => write!(f, "io error: {err}"),
            Self::Json(err) => write!(f, "json error: {err}"),
            Self::NotConnected => write!(f, "no live connection to the unit"),
            Self::Rejected(property, value) => {
                write!(f, "unit rejected {property} = {value}")
            }
        }
    }
}

impl std::error::Error for Error {}
