use crate::{config, fetch, parse};
use reqwest::StatusCode;
use tokio::task::JoinError;
use std::{
    fmt::{self, Display, Formatter},
    io,
};

#[derive(Debug)]
pub enum Error {
    Fetch { location: String, cause: fetch::Error },
    Parse(parse::Error),
    StreamClose(io::Error),
    Read(io::Error),
    Json(serde_json::Error),
    Request(reqwest::Error),
    Webhook(StatusCode),
    Config(config::Error),
    Task(JoinError),
}

impl From<parse::Error> for Error {
    fn from(e: parse::Error) -> Self {
        Error::Parse(e)
    }
}

impl From<reqwest::Error> for Error {
    fn from(e: reqwest::Error) -> Self {
        Error::Request(e)
    }
}

impl From<serde_json::Error> for Error {
    fn from(e: serde_json::Error) -> Self {
        Error::Json(e)
    }
}

impl From<config::Error> for Error {
    fn from(e: config::Error) -> Self {
        Error::Config(e)
    }
}

impl Display for Error {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Error::Fetch { location, cause } => write!(f, "fetching {location}: {cause}"),
            Error::Parse(e) => write!(f, "parsing body: {e}"),
            Error::StreamClose(e) => write!(f, "closing body: {e}"),
            Error::Read(e) => write!(f, "reading body: {e}"),
            Error::Json(e) => write!(f, "unmarshalling JSON: {e}"),
            Error::Request(e) => write!(f, "posting payload: {e}"),
            Error::Webhook(status) => write!(f, "webhook answered {status}"),
            Error::Config(e) => write!(f, "configuration: {e}"),
            Error::Task(e) => write!(f, "reading body: {e}"),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Fetch { cause, .. } => Some(cause),
            Error::Parse(e) => Some(e),
            Error::StreamClose(e) | Error::Read(e) => Some(e),
            Error::Json(e) => Some(e),
            Error::Request(e) => Some(e),
            Error::Config(e) => Some(e),
            Error::Task(e) => Some(e),
            Error::Webhook(_) => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
