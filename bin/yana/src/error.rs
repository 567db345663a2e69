use std::fmt;

#[derive(Debug)]
pub enum Error {
    Http(chipp_http::Error),
    UrlParse(chipp_http::UrlParseError),
    Json(serde_json::Error),
    UrlEncode(serde_urlencoded::ser::Error),
    Io(std::io::Error),
    Upstream(u16),
    OutOfRange(f32),
}

impl From<chipp_http::Error> for Error {
    fn from(err: chipp_http::Error) -> Self {
        Self::Http(err)
    }
}

impl From<chipp_http::UrlParseError> for Error {
    fn from(err: chipp_http::UrlParseError) -> Self {
        Self::UrlParse(err)
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Self::Json(err)
    }
}

impl From<serde_urlencoded::ser::Error> for Error {
    fn from(err: serde_urlencoded::ser::Error) -> Self {
        Self::UrlEncode(err)
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err)
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Http(err) => write!(f, "http error: {err}"),
            Self::UrlParse(err) => write!(f, "url parse error: {err}"),
            Self::Json(err) => write!(f, "json error: {err}"),
            Self::UrlEncode(err) => write!(f, "url encode error: {err}"),
            Self::Io(err) => write!(f, "io error: {err}"),
            Self::Upstream(status) => write!(f, "hvac service returned {status}"),
            Self::OutOfRange(value) => {
                write!(f, "temperature {value} is outside the supported range")
            }
        }
    }
}

impl std::error::Error for Error {}
