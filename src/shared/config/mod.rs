//! Application configuration module
//!
//! Provides configuration types for the application. Values come from the
//! process environment (optionally seeded from a `.env` file by the server
//! binary) and are assembled through [`AppConfigBuilder`].
//!
//! # Variables
//!
//! - `AUTH_TYPE` - `auth`, `basic_auth`, `session_auth`, `session_exp_auth`
//!   or `session_db_auth`. Unset or unknown disables the request gate.
//! - `SESSION_DURATION` - session max-age in seconds, `0` or less never expires
//! - `SESSION_NAME` - session cookie name
//! - `DATABASE_URL` - SQLite connection URL
//! - `BCRYPT_COST` - bcrypt work factor
//! - `SERVER_PORT` - listen port

use std::env;

use thiserror::Error;

/// Cookie carrying the session identifier unless `SESSION_NAME` says otherwise.
pub const DEFAULT_SESSION_NAME: &str = "session_id";

/// On-disk SQLite database created on first start.
pub const DEFAULT_DATABASE_URL: &str = "sqlite://authkeep.db?mode=rwc";

/// Same work factor as `bcrypt::DEFAULT_COST`.
pub const DEFAULT_BCRYPT_COST: u32 = 12;

pub const DEFAULT_PORT: u16 = 5000;

/// Where sessions live and whether they age out.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionPolicy {
    /// In-memory map, sessions never expire
    Bare,
    /// In-memory map, sessions expire after `SESSION_DURATION`
    Expiring,
    /// `user_sessions` table, sessions expire after `SESSION_DURATION`
    Persisted,
}

/// Strategy used by the request gate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthType {
    /// Gate is active but never recognises anyone
    Deny,
    /// `Authorization: Basic` credentials checked on every request
    Basic,
    /// Session cookie resolved through the session registry
    Session(SessionPolicy),
}

impl AuthType {
    /// Parse an `AUTH_TYPE` value. Unknown names yield `None`.
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim() {
            "auth" => Some(Self::Deny),
            "basic_auth" => Some(Self::Basic),
            "session_auth" => Some(Self::Session(SessionPolicy::Bare)),
            "session_exp_auth" => Some(Self::Session(SessionPolicy::Expiring)),
            "session_db_auth" => Some(Self::Session(SessionPolicy::Persisted)),
            _ => None,
        }
    }

    pub fn session_policy(&self) -> Option<SessionPolicy> {
        match self {
            Self::Session(policy) => Some(*policy),
            _ => None,
        }
    }
}

/// Application configuration
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Request gate strategy, `None` when authentication is disabled
    pub auth_type: Option<AuthType>,
    /// Session max-age in seconds
    pub session_duration: i64,
    /// Session cookie name
    pub session_name: String,
    /// SQLite connection URL
    pub database_url: String,
    /// bcrypt work factor
    pub bcrypt_cost: u32,
    /// HTTP listen port
    pub port: u16,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            auth_type: None,
            session_duration: 0,
            session_name: DEFAULT_SESSION_NAME.to_string(),
            database_url: DEFAULT_DATABASE_URL.to_string(),
            bcrypt_cost: DEFAULT_BCRYPT_COST,
            port: DEFAULT_PORT,
        }
    }
}

impl AppConfig {
    /// Create a new AppConfigBuilder
    pub fn builder() -> AppConfigBuilder {
        AppConfigBuilder::default()
    }

    /// Load configuration from the process environment.
    ///
    /// `AUTH_TYPE` and `SESSION_DURATION` are read leniently: an unknown
    /// strategy disables the gate and a non-integer duration means "never
    /// expires". Everything else must parse.
    pub fn from_env() -> Result<Self, ConfigError> {
        let mut builder = Self::builder();

        if let Ok(value) = env::var("AUTH_TYPE") {
            match AuthType::parse(&value) {
                Some(auth_type) => builder = builder.auth_type(auth_type),
                None => tracing::warn!("Unknown AUTH_TYPE '{}', authentication disabled", value),
            }
        }

        builder = builder.session_duration(parse_session_duration(
            env::var("SESSION_DURATION").ok().as_deref(),
        ));

        if let Ok(name) = env::var("SESSION_NAME") {
            builder = builder.session_name(name);
        }
        if let Ok(url) = env::var("DATABASE_URL") {
            builder = builder.database_url(url);
        }
        if let Ok(cost) = env::var("BCRYPT_COST") {
            let cost = cost.trim().parse::<u32>().map_err(|_| ConfigError::InvalidValue {
                key: "BCRYPT_COST",
                value: cost.clone(),
            })?;
            builder = builder.bcrypt_cost(cost);
        }
        if let Ok(port) = env::var("SERVER_PORT") {
            let port = port.trim().parse::<u16>().map_err(|_| ConfigError::InvalidValue {
                key: "SERVER_PORT",
                value: port.clone(),
            })?;
            builder = builder.port(port);
        }

        builder.build()
    }

    /// Session policy backing the user service.
    ///
    /// Follows `AUTH_TYPE` when it names a session strategy, otherwise
    /// sessions are persisted so they survive a restart.
    pub fn session_policy(&self) -> SessionPolicy {
        self.auth_type
            .and_then(|auth_type| auth_type.session_policy())
            .unwrap_or(SessionPolicy::Persisted)
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(4..=31).contains(&self.bcrypt_cost) {
            return Err(ConfigError::InvalidValue {
                key: "BCRYPT_COST",
                value: self.bcrypt_cost.to_string(),
            });
        }

        let valid_name = !self.session_name.is_empty()
            && self
                .session_name
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || "_-.".contains(c));
        if !valid_name {
            return Err(ConfigError::InvalidValue {
                key: "SESSION_NAME",
                value: self.session_name.clone(),
            });
        }

        if !self.database_url.starts_with("sqlite:") {
            return Err(ConfigError::InvalidUrl(self.database_url.clone()));
        }

        Ok(())
    }
}

/// Non-integer values fall back to zero (never expires).
fn parse_session_duration(raw: Option<&str>) -> i64 {
    raw.and_then(|value| value.trim().parse::<i64>().ok())
        .unwrap_or(0)
}

/// Builder for AppConfig
#[derive(Debug, Default)]
pub struct AppConfigBuilder {
    auth_type: Option<AuthType>,
    session_duration: Option<i64>,
    session_name: Option<String>,
    database_url: Option<String>,
    bcrypt_cost: Option<u32>,
    port: Option<u16>,
}

impl AppConfigBuilder {
    pub fn auth_type(mut self, auth_type: AuthType) -> Self {
        self.auth_type = Some(auth_type);
        self
    }

    pub fn session_duration(mut self, seconds: i64) -> Self {
        self.session_duration = Some(seconds);
        self
    }

    pub fn session_name(mut self, name: impl Into<String>) -> Self {
        self.session_name = Some(name.into());
        self
    }

    pub fn database_url(mut self, url: impl Into<String>) -> Self {
        self.database_url = Some(url.into());
        self
    }

    pub fn bcrypt_cost(mut self, cost: u32) -> Self {
        self.bcrypt_cost = Some(cost);
        self
    }

    pub fn port(mut self, port: u16) -> Self {
        self.port = Some(port);
        self
    }

    /// Build and validate the configuration
    pub fn build(self) -> Result<AppConfig, ConfigError> {
        let defaults = AppConfig::default();
        let config = AppConfig {
            auth_type: self.auth_type,
            session_duration: self.session_duration.unwrap_or(defaults.session_duration),
            session_name: self.session_name.unwrap_or(defaults.session_name),
            database_url: self.database_url.unwrap_or(defaults.database_url),
            bcrypt_cost: self.bcrypt_cost.unwrap_or(defaults.bcrypt_cost),
            port: self.port.unwrap_or(defaults.port),
        };
        config.validate()?;
        Ok(config)
    }
}

/// Configuration errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid URL: {0}")]
    InvalidUrl(String),
    #[error("invalid value for {key}: {value}")]
    InvalidValue { key: &'static str, value: String },
}
