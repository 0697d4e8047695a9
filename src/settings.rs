//! Process configuration from environment variables (and `.env`, when present).

use crate::error::ConfigError;
use std::net::SocketAddr;

const DATABASE_URL: &str = "DATABASE_URL";
const BIND: &str = "BOOKSHELF_BIND";
const MAX_CONNECTIONS: &str = "BOOKSHELF_MAX_CONNECTIONS";
const CREATE_DATABASE: &str = "BOOKSHELF_CREATE_DATABASE";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    /// `None` selects the in-memory store.
    pub database_url: Option<String>,
    pub bind: SocketAddr,
    pub max_connections: u32,
    pub create_database: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            database_url: None,
            bind: SocketAddr::from(([0, 0, 0, 0], 3000)),
            max_connections: 5,
            create_database: true,
        }
    }
}

impl Settings {
    /// Read settings from the process environment after loading `.env`.
    pub fn from_env() -> Result<Self, ConfigError> {
        // A missing `.env` is fine.
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build settings from any key lookup. Unset or blank keys keep their defaults.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());
        let mut settings = Self::default();
        settings.database_url = get(DATABASE_URL);
        if let Some(v) = get(BIND) {
            settings.bind = v.parse().map_err(|_| invalid(BIND, v))?;
        }
        if let Some(v) = get(MAX_CONNECTIONS) {
            settings.max_connections = match v.parse::<u32>() {
                Ok(n) if n > 0 => n,
                _ => return Err(invalid(MAX_CONNECTIONS, v)),
            };
        }
        if let Some(v) = get(CREATE_DATABASE) {
            settings.create_database = parse_bool(&v).ok_or_else(|| invalid(CREATE_DATABASE, v))?;
        }
        Ok(settings)
    }
}

fn invalid(var: &'static str, value: String) -> ConfigError {
    ConfigError::InvalidValue { var, value }
}

fn parse_bool(v: &str) -> Option<bool> {
    match v.to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}
