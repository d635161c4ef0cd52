//! Runtime settings from environment variables.

use crate::error::ConfigError;
use std::net::{IpAddr, SocketAddr};

const DEFAULT_DATABASE_URL: &str = "postgres://localhost/jobly";
const DEV_SECRET_KEY: &str = "secret-dev";

#[derive(Clone, Debug)]
pub struct Settings {
    pub database_url: String,
    pub secret_key: String,
    pub bind_addr: IpAddr,
    pub port: u16,
    pub max_db_connections: u32,
}

impl Settings {
    /// Read from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|k| std::env::var(k).ok())
    }

    /// Read through `lookup`, falling back to development defaults.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let database_url = lookup("DATABASE_URL").unwrap_or_else(|| DEFAULT_DATABASE_URL.into());
        let secret_key = match lookup("SECRET_KEY") {
            Some(s) if !s.is_empty() => s,
            _ => {
                tracing::warn!("SECRET_KEY not set, using the development secret");
                DEV_SECRET_KEY.into()
            }
        };
        let bind_addr = match lookup("BIND_ADDR") {
            Some(s) => s.parse().map_err(|_| ConfigError::BindAddr(s))?,
            None => IpAddr::from([0, 0, 0, 0]),
        };
        let port = parse_or("PORT", lookup("PORT"), 3001)?;
        let max_db_connections = parse_or("MAX_DB_CONNECTIONS", lookup("MAX_DB_CONNECTIONS"), 5)?;
        Ok(Settings {
            database_url,
            secret_key,
            bind_addr,
            port,
            max_db_connections,
        })
    }

    pub fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.bind_addr, self.port)
    }
}

fn parse_or<T: std::str::FromStr>(var: &'static str, raw: Option<String>, default: T) -> Result<T, ConfigError> {
    match raw {
        None => Ok(default),
        Some(s) => s.trim().parse().map_err(|_| ConfigError::Invalid { var, value: s }),
    }
}
