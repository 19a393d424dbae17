use std::fmt;

use crate::fan;

#[derive(Debug)]
pub enum Error {
    Fan(fan::Error),
    Json(serde_json::Error),
    UnknownDevice(String),
}

impl From<fan::Error> for Error {
    fn from(err: fan::Error) -> Self {
        Self::Fan(err)
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
            Self::Fan(err) => write!(f, "fan error: {err}"),
            Self::Json(err) => write!(f, "json error: {err}"),
            Self::UnknownDevice(id) => write!(f, "unknown device {id}"),
        }
    }
}

impl std::error::Error for Error {}
