//! Store configuration loaded from environment variables.
//!
//! | Variable | Default | Meaning |
//! |---|---|---|
//! | `POSTBOX_DATABASE_URL` | none | `PostgreSQL` connection URL |
//! | `POSTBOX_POOL_SIZE` | `10` | maximum pooled connections |
//! | `POSTBOX_OPERATION_DEADLINE_MS` | `5000` | deadline for each storage call |
//! | `POSTBOX_MAX_TEXT_LENGTH` | unset | maximum message length in characters |

use crate::direct_message::{
    adapters::postgres::PgPool, services::DEFAULT_OPERATION_DEADLINE, validation::ValidationConfig,
};
use diesel::PgConnection;
use diesel::r2d2::{ConnectionManager, Pool};
use std::env;
use std::time::Duration;
use thiserror::Error;

/// Environment variable holding the database URL.
pub const DATABASE_URL_VAR: &str = "POSTBOX_DATABASE_URL";
/// Environment variable holding the pool size.
pub const POOL_SIZE_VAR: &str = "POSTBOX_POOL_SIZE";
/// Environment variable holding the per-operation deadline in milliseconds.
pub const OPERATION_DEADLINE_VAR: &str = "POSTBOX_OPERATION_DEADLINE_MS";
/// Environment variable holding the maximum message text length.
pub const MAX_TEXT_LENGTH_VAR: &str = "POSTBOX_MAX_TEXT_LENGTH";

const DEFAULT_POOL_SIZE: u32 = 10;

/// Errors raised while loading configuration or opening the pool.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// A variable was set but could not be parsed.
    #[error("invalid value '{value}' for {name}: {reason}")]
    InvalidValue {
        /// Variable name.
        name: &'static str,
        /// Raw value.
        value: String,
        /// Parse failure description.
        reason: String,
    },

    /// A variable required for the requested operation is not set.
    #[error("{0} is not set")]
    Missing(&'static str),

    /// The connection pool could not be built.
    #[error("failed to build connection pool: {0}")]
    Pool(#[from] diesel::r2d2::PoolError),
}

/// Runtime configuration for the message store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreConfig {
    /// `PostgreSQL` connection URL, if persistence is database-backed.
    pub database_url: Option<String>,
    /// Maximum number of pooled connections.
    pub pool_size: u32,
    /// Deadline applied to every storage call.
    pub operation_deadline: Duration,
    /// Boundary validation limits.
    pub validation: ValidationConfig,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            database_url: None,
            pool_size: DEFAULT_POOL_SIZE,
            operation_deadline: DEFAULT_OPERATION_DEADLINE,
            validation: ValidationConfig::default(),
        }
    }
}

impl StoreConfig {
    /// Loads configuration from process environment variables.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidValue`] when a variable is set but
    /// cannot be parsed.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Loads configuration through an arbitrary variable lookup.
    ///
    /// Empty values are treated as unset.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidValue`] when a variable is set but
    /// cannot be parsed.
    ///
    /// # Examples
    ///
    /// ```
    /// use postbox::config::StoreConfig;
    /// use std::time::Duration;
    ///
    /// let config = StoreConfig::from_lookup(|name| match name {
    ///     "POSTBOX_OPERATION_DEADLINE_MS" => Some("250".to_owned()),
    ///     _ => None,
    /// })
    /// .expect("valid configuration");
    /// assert_eq!(config.operation_deadline, Duration::from_millis(250));
    /// assert_eq!(config.pool_size, 10);
    /// ```
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let read = |name: &'static str| lookup(name).filter(|value| !value.trim().is_empty());

        let pool_size = read(POOL_SIZE_VAR)
            .map(|value| parse_var::<u32>(POOL_SIZE_VAR, &value))
            .transpose()?
            .unwrap_or(DEFAULT_POOL_SIZE);
        if pool_size == 0 {
            return Err(ConfigError::InvalidValue {
                name: POOL_SIZE_VAR,
                value: pool_size.to_string(),
                reason: "pool size must be at least 1".to_owned(),
            });
        }

        let operation_deadline = read(OPERATION_DEADLINE_VAR)
            .map(|value| parse_var::<u64>(OPERATION_DEADLINE_VAR, &value))
            .transpose()?
            .map_or(DEFAULT_OPERATION_DEADLINE, Duration::from_millis);

        let max_text_length = read(MAX_TEXT_LENGTH_VAR)
            .map(|value| parse_var::<usize>(MAX_TEXT_LENGTH_VAR, &value))
            .transpose()?;

        Ok(Self {
            database_url: read(DATABASE_URL_VAR),
            pool_size,
            operation_deadline,
            validation: ValidationConfig { max_text_length },
        })
    }

    /// Opens a `PostgreSQL` connection pool for the configured database.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Missing`] when no database URL is configured,
    /// or [`ConfigError::Pool`] when the pool cannot be built.
    pub fn build_pool(&self) -> Result<PgPool, ConfigError> {
        let url = self
            .database_url
            .as_deref()
            .ok_or(ConfigError::Missing(DATABASE_URL_VAR))?;
        let manager = ConnectionManager::<PgConnection>::new(url);
        let pool = Pool::builder()
            .max_size(self.pool_size)
            .connection_timeout(self.operation_deadline)
            .build(manager)?;
        Ok(pool)
    }
}

fn parse_var<T>(name: &'static str, value: &str) -> Result<T, ConfigError>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    value
        .trim()
        .parse::<T>()
        .map_err(|err| ConfigError::InvalidValue {
            name,
            value: value.to_owned(),
            reason: err.to_string(),
        })
}
