use std::{
    env,
    net::{AddrParseError, SocketAddr},
    num::ParseIntError,
    path::PathBuf,
};

use thiserror::Error;

pub const DATA_PATH_VAR: &str = "MUSEO_DATA_PATH";
pub const PORT_VAR: &str = "MUSEO_PORT";
pub const BIND_VAR: &str = "MUSEO_BIND";

const DEFAULT_PORT: u16 = 3000;
const DEFAULT_BIND: &str = "0.0.0.0";

#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    #[error("Missing museum export, pass a path or set MUSEO_DATA_PATH")]
    MissingDataPath,
    #[error("Invalid MUSEO_PORT {value:?}: {source}")]
    InvalidPort {
        value: String,
        source: ParseIntError,
    },
    #[error("Invalid bind address {bind}: {source}")]
    InvalidAddress {
        bind: String,
        source: AddrParseError,
    },
}

#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub data_path: PathBuf,
    pub bind: String,
    pub port: u16,
}

impl Config {
    /// The museum export comes from the first argument, or from `MUSEO_DATA_PATH`.
    pub fn from_env() -> Result<Self, self::Error> {
        let arg = env::args().nth(1);
        Self::from_lookup(arg, |key| env::var(key).ok())
    }

    fn from_lookup<F>(arg: Option<String>, lookup: F) -> Result<Self, self::Error>
    where
        F: Fn(&str) -> Option<String>,
    {
        let data_path = arg
            .or_else(|| lookup(DATA_PATH_VAR))
            .map(PathBuf::from)
            .ok_or(Error::MissingDataPath)?;
        let port = match lookup(PORT_VAR) {
            Some(value) => match value.parse() {
                Ok(port) => port,
                Err(source) => return Err(Error::InvalidPort { value, source }),
            },
            None => DEFAULT_PORT,
        };
        let bind = lookup(BIND_VAR).unwrap_or_else(|| DEFAULT_BIND.to_string());
        Ok(Self {
            data_path,
            bind,
            port,
        })
    }

    pub fn address(&self) -> Result<SocketAddr, self::Error> {
        format!("{}:{}", self.bind, self.port)
            .parse()
            .map_err(|source| Error::InvalidAddress {
                bind: self.bind.clone(),
                source,
            })
    }
}
