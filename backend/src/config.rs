//! Runtime configuration, read once from the environment at startup.
//!
//! Every key has a default that is logged when used; a value that is present
//! but does not parse stops the server instead of being silently replaced.

use log::info;
use std::env;
use std::fmt::Display;
use std::path::PathBuf;
use std::str::FromStr;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value for {key}: {reason}")]
    Invalid { key: &'static str, reason: String },
}

#[derive(Debug, Clone)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub database: PathBuf,
    /// Base of every link sent by email, without a trailing slash.
    pub public_url: String,
    pub token_ttl_hours: i64,
    pub analyzer_url: Option<String>,
    pub analyzer_key: Option<String>,
    pub json_limit: usize,
}

impl Config {
    pub fn load() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let public_url: String = try_load(&lookup, "TRUSTGRID_PUBLIC_URL", "http://127.0.0.1:8080")?;
        if !(public_url.starts_with("http://") || public_url.starts_with("https://")) {
            return Err(ConfigError::Invalid {
                key: "TRUSTGRID_PUBLIC_URL",
                reason: "must start with http:// or https://".to_string(),
            });
        }

        let token_ttl_hours: i64 = try_load(&lookup, "TRUSTGRID_TOKEN_TTL_HOURS", "168")?;
        if token_ttl_hours <= 0 {
            return Err(ConfigError::Invalid {
                key: "TRUSTGRID_TOKEN_TTL_HOURS",
                reason: "must be positive".to_string(),
            });
        }

        Ok(Self {
            host: try_load(&lookup, "TRUSTGRID_HOST", "127.0.0.1")?,
            port: try_load(&lookup, "TRUSTGRID_PORT", "8080")?,
            database: try_load(&lookup, "TRUSTGRID_DATABASE", "trustgrid.sqlite")?,
            public_url: public_url.trim_end_matches('/').to_string(),
            token_ttl_hours,
            analyzer_url: optional(&lookup, "TRUSTGRID_ANALYZER_URL"),
            analyzer_key: optional(&lookup, "TRUSTGRID_ANALYZER_KEY"),
            json_limit: try_load(&lookup, "TRUSTGRID_JSON_LIMIT", "1048576")?,
        })
    }
}

fn try_load<T: FromStr>(
    lookup: &impl Fn(&str) -> Option<String>,
    key: &'static str,
    default: &str,
) -> Result<T, ConfigError>
where
    T::Err: Display,
{
    let raw = lookup(key).unwrap_or_else(|| {
        info!("{key} not set, using default: {default}");
        default.to_string()
    });
    raw.trim().parse().map_err(|e: T::Err| ConfigError::Invalid {
        key,
        reason: e.to_string(),
    })
}

fn optional(lookup: &impl Fn(&str) -> Option<String>, key: &str) -> Option<String> {
    lookup(key)
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}
