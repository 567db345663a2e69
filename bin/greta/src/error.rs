use std::fmt;

#[derive(Debug)]
pub enum Error {
    Io(std::io::Error),
    Json(serde_json::Error),
    Gree(gree::Error),
    NotConnected,
    VendorUnreachable,
    SessionClosed,
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

impl From<gree::Error> for Error {
    fn from(err: gree::Error) -> Self {
        match err {
            gree::Error::NotConnected => Self::NotConnected,
            err => Self::Gree(err),
        }
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(err) => write!(f, "io error: {err}"),
            Self::Json(err) => write!(f, "json error: {err}"),
            Self::Gree(err) => write!(f, "unit error: {err}"),
            Self::NotConnected => write!(f, "no session with the unit"),
            Self::VendorUnreachable => write!(f, "unit did not come up within the grace delay"),
            Self::SessionClosed => write!(f, "session manager is gone"),
        }
    }
}

impl std::error::Error for Error {}
