use std::{
    env,
    fmt::{self, Display, Formatter},
    net::{AddrParseError, SocketAddr},
};

use url::Url;

use crate::holiday::HOLIDAYS_URL;

/// Settings read from the environment at startup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub addr: SocketAddr,
    pub webhook: Url,
    pub holidays: String,
    pub vendors: Vec<String>,
}

#[derive(Debug)]
pub enum Error {
    Missing(&'static str),
    Url(&'static str, url::ParseError),
    Addr(String, AddrParseError),
    UnknownVendor(String),
}

impl Display for Error {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Self::Missing(var) => write!(f, "env var {var} not set"),
            Self::Url(var, e) => write!(f, "env var {var} is not a valid url: {e}"),
            Self::Addr(addr, e) => write!(f, "{addr:?} is not a valid address: {e}"),
            Self::UnknownVendor(name) => write!(f, "unknown vendor {name:?}"),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Url(_, e) => Some(e),
            Self::Addr(_, e) => Some(e),
            Self::Missing(_) | Self::UnknownVendor(_) => None,
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self, Error> {
        Self::from_lookup(|var| env::var(var).ok())
    }

    fn from_lookup(var: impl Fn(&str) -> Option<String>) -> Result<Self, Error> {
        let host = var("HOST").unwrap_or_else(|| "0.0.0.0".to_string());
        let port = var("PORT").unwrap_or_else(|| "8080".to_string());
        let addr = format!("{host}:{port}");
        let addr = addr.parse::<SocketAddr>().map_err(|e| Error::Addr(addr, e))?;

        let webhook = var("SLACK_WEBHOOK_URL").ok_or(Error::Missing("SLACK_WEBHOOK_URL"))?;
        let webhook = Url::parse(&webhook).map_err(|e| Error::Url("SLACK_WEBHOOK_URL", e))?;

        let holidays = var("HOLIDAYS_URL").unwrap_or_else(|| HOLIDAYS_URL.to_string());

        let vendors = var("VENDORS")
            .unwrap_or_else(|| "tamagoya,azuma2020".to_string())
            .split(',')
            .map(str::trim)
            .filter(|name| !name.is_empty())
            .map(str::to_owned)
            .collect();

        Ok(Self {
            addr,
            webhook,
            holidays,
            vendors,
        })
    }
}
