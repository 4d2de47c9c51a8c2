//! Configuration types.

use std::path::PathBuf;
use std::time::Duration;

use crate::error::ConfigError;
use crate::testimonials::DEFAULT_ROTATION_INTERVAL;

/// Service configuration, read from `MUTUAL_AID_*` environment variables.
#[derive(Debug, Clone)]
pub struct ServiceConfig {
    /// HTTP listen port.
    pub port: u16,
    /// libSQL database file holding the quiz results record.
    pub db_path: PathBuf,
    /// Keep the results record in memory instead of on disk.
    pub in_memory: bool,
    /// Time between automatic testimonial advances.
    pub rotation_interval: Duration,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            port: 8080,
            db_path: PathBuf::from("./data/mutual-aid.db"),
            in_memory: false,
            rotation_interval: DEFAULT_ROTATION_INTERVAL,
        }
    }
}

impl ServiceConfig {
    /// Build from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from an arbitrary variable lookup. Unset variables keep their
    /// defaults; set but unparsable ones are an error.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let mut config = Self::default();

        if let Some(port) = lookup("MUTUAL_AID_PORT") {
            config.port = parse("MUTUAL_AID_PORT", &port)?;
        }
        if let Some(path) = lookup("MUTUAL_AID_DB_PATH") {
            config.db_path = PathBuf::from(path);
        }
        if let Some(flag) = lookup("MUTUAL_AID_IN_MEMORY") {
            config.in_memory = matches!(flag.trim(), "1" | "true" | "yes");
        }
        if let Some(secs) = lookup("MUTUAL_AID_ROTATION_SECS") {
            let secs: u64 = parse("MUTUAL_AID_ROTATION_SECS", &secs)?;
            if secs == 0 {
                return Err(ConfigError::InvalidValue {
                    key: "MUTUAL_AID_ROTATION_SECS".to_string(),
                    message: "must be at least 1".to_string(),
                });
            }
            config.rotation_interval = Duration::from_secs(secs);
        }

        Ok(config)
    }
}

fn parse<T>(key: &str, raw: &str) -> Result<T, ConfigError>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    raw.trim().parse().map_err(|e: T::Err| ConfigError::InvalidValue {
        key: key.to_string(),
        message: format!("{raw:?}: {e}"),
    })
}
