//! Process configuration read from the environment.
//!
//! | Variable     | Default     |
//! |--------------|-------------|
//! | `TODO_HOST`  | `127.0.0.1` |
//! | `PORT`       | `8082`      |
//! | `JWT_SECRET` | required    |
//! | `LOG_LEVEL`  | `info`      |
//! | `LOG_FORMAT` | `text`      |

use thiserror::Error;

pub const DEFAULT_HOST: &str = "127.0.0.1";
pub const DEFAULT_PORT: u16 = 8082;
pub const DEFAULT_LOG_LEVEL: &str = "info";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("JWT_SECRET must be set to a non-empty value")]
    MissingSecret,

    #[error("invalid PORT `{0}`")]
    InvalidPort(String),

    #[error("invalid LOG_FORMAT `{0}`: expected `text` or `json`")]
    InvalidLogFormat(String),
}

#[derive(Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub jwt_secret: String,
    pub log: LogConfig,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogConfig {
    pub level: String,
    pub json: bool,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: DEFAULT_LOG_LEVEL.to_string(),
            json: false,
        }
    }
}

impl ServerConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the config from `lookup`, which maps a variable name to its
    /// value. Empty values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let host = get("TODO_HOST").unwrap_or_else(|| DEFAULT_HOST.to_string());
        let port = match get("PORT") {
            Some(raw) => raw
                .trim()
                .parse::<u16>()
                .map_err(|_| ConfigError::InvalidPort(raw))?,
            None => DEFAULT_PORT,
        };
        let jwt_secret = get("JWT_SECRET").ok_or(ConfigError::MissingSecret)?;

        let level = get("LOG_LEVEL").unwrap_or_else(|| DEFAULT_LOG_LEVEL.to_string());
        let json = match get("LOG_FORMAT").as_deref().map(str::to_ascii_lowercase) {
            None => false,
            Some(f) if f == "text" => false,
            Some(f) if f == "json" => true,
            Some(other) => return Err(ConfigError::InvalidLogFormat(other)),
        };

        Ok(Self {
            host,
            port,
            jwt_secret,
            log: LogConfig { level, json },
        })
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl std::fmt::Debug for ServerConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ServerConfig")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("jwt_secret", &"<redacted>")
            .field("log", &self.log)
            .finish()
    }
}
