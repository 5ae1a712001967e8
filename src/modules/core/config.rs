//! Environment configuration

use std::fmt;

use crate::error::{Result, SmartPosError};

pub const MONGODB_URL_VAR: &str = "MONGODB_URL";
pub const DATABASE_VAR: &str = "SMARTPOS_DATABASE";
pub const MIN_POOL_SIZE_VAR: &str = "MONGODB_MIN_POOL_SIZE";
pub const MAX_POOL_SIZE_VAR: &str = "MONGODB_MAX_POOL_SIZE";

/// Database used when `SMARTPOS_DATABASE` is unset
pub const DEFAULT_DATABASE: &str = "smartpos_ai";

/// Settings the handler needs to reach its database
#[derive(Clone, PartialEq, Eq)]
pub struct Config {
    /// Connection string. Absent until a request actually needs the database.
    pub mongodb_url: Option<String>,
    pub database: String,
    pub min_pool_size: Option<u32>,
    pub max_pool_size: Option<u32>,
}

impl Config {
    /// Load from the process environment, reading a `.env` file first if one exists
    pub fn from_env() -> Result<Self> {
        // Load .env file if present (ignores errors)
        let _ = dotenvy::dotenv();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load from an arbitrary key lookup
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_empty = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        Ok(Self {
            mongodb_url: non_empty(MONGODB_URL_VAR),
            database: non_empty(DATABASE_VAR).unwrap_or_else(|| DEFAULT_DATABASE.to_string()),
            min_pool_size: parse_pool_size(MIN_POOL_SIZE_VAR, non_empty(MIN_POOL_SIZE_VAR))?,
            max_pool_size: parse_pool_size(MAX_POOL_SIZE_VAR, non_empty(MAX_POOL_SIZE_VAR))?,
        })
    }

    /// Connection string, or a configuration error naming the missing variable
    pub fn require_url(&self) -> Result<&str> {
        self.mongodb_url
            .as_deref()
            .ok_or_else(|| SmartPosError::Config(format!("{} is not set", MONGODB_URL_VAR)))
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            mongodb_url: None,
            database: DEFAULT_DATABASE.to_string(),
            min_pool_size: None,
            max_pool_size: None,
        }
    }
}

// Connection strings embed credentials.
impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("mongodb_url", &self.mongodb_url.as_ref().map(|_| "<redacted>"))
            .field("database", &self.database)
            .field("min_pool_size", &self.min_pool_size)
            .field("max_pool_size", &self.max_pool_size)
            .finish()
    }
}

fn parse_pool_size(key: &str, value: Option<String>) -> Result<Option<u32>> {
    value
        .map(|v| {
            v.trim().parse::<u32>().map_err(|e| {
                SmartPosError::Config(format!("{} must be a non-negative integer: {}", key, e))
            })
        })
        .transpose()
}
