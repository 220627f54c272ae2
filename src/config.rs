//! Environment configuration. A `.env` file in the working directory is
//! loaded first when present.

use std::env;
use std::net::SocketAddr;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Invalid value for {var}: {reason}")]
    InvalidValue { var: String, reason: String },
}

pub type ConfigResult<T> = Result<T, ConfigError>;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub database_url: String,
    pub bind_addr: String,
    pub port: u16,
    pub db_max_connections: u32,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            database_url: "sqlite://contacts.db?mode=rwc".to_owned(),
            bind_addr: "0.0.0.0".to_owned(),
            port: 5000,
            db_max_connections: 16,
        }
    }
}

impl Config {
    pub fn from_env() -> ConfigResult<Self> {
        let _ = dotenv::dotenv();
        Self::from_lookup(|var| env::var(var).ok())
    }

    /// Builds a config from any variable source, falling back to defaults.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> ConfigResult<Self> {
        let defaults = Self::default();

        let database_url = lookup("DATABASE_URL").unwrap_or(defaults.database_url);
        let bind_addr = lookup("BIND_ADDR").unwrap_or(defaults.bind_addr);
        let port = parse_var(&lookup, "PORT", defaults.port)?;
        let db_max_connections = parse_var(&lookup, "DB_MAX_CONNECTIONS", defaults.db_max_connections)?;

        if db_max_connections == 0 {
            return Err(ConfigError::InvalidValue {
                var: "DB_MAX_CONNECTIONS".to_owned(),
                reason: "Must be at least 1".to_owned(),
            });
        }

        let config = Config {
            database_url,
            bind_addr,
            port,
            db_max_connections,
        };
        config.socket_addr()?;
        Ok(config)
    }

    pub fn socket_addr(&self) -> ConfigResult<SocketAddr> {
        format!("{}:{}", self.bind_addr, self.port)
            .parse()
            .map_err(|_| ConfigError::InvalidValue {
                var: "BIND_ADDR".to_owned(),
                reason: format!("Not an IP address: {}", self.bind_addr),
            })
    }
}

fn parse_var<T: std::str::FromStr>(
    lookup: &impl Fn(&str) -> Option<String>,
    var: &str,
    default: T,
) -> ConfigResult<T> {
    match lookup(var) {
        Some(val) => val.trim().parse().map_err(|_| ConfigError::InvalidValue {
            var: var.to_owned(),
            reason: format!("Must be a positive number, got: {val}"),
        }),
        None => Ok(default),
    }
}
