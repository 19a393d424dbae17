use std::fmt;

#[derive(Debug)]
pub enum Error {
    Api { code: u16, message: String },
    Http(chipp_http::Error),
    Json(serde_json::Error),
    Io(std::io::Error),
    UnexpectedPayload(&'static str),
}

impl From<chipp_http::Error> for Error {
    fn from(err: chipp_http::Error) -> Self {
        Self::Http(err)
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Self::Json(err)
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
            Self::Api { code, message } => write!(f, "bond api error code {code}: {message}"),
            Self::Http(err) => write!(f, "http error: {err}"),
            Self::Json(err) => write!(f, "json error: {err}"),
            Self::Io(err) => write!(f, "io error: {err}"),
            Self::UnexpectedPayload(what) => write!(f, "unexpected {what} payload"),
        }
    }
}

impl std::error::Error for Error {}
