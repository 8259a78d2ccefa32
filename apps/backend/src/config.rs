//! Environment configuration

use std::collections::HashMap;

use review_core::Algorithm;
use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("invalid value for {key}: {value}")]
    Invalid { key: &'static str, value: String },
}

/// Service configuration read from the environment.
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub log_filter: String,
    pub default_algorithm: Algorithm,
    /// Fixed seed for the drill RNG; entropy-seeded when unset.
    pub drill_seed: Option<u64>,
    pub schedule_cache_capacity: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 3000,
            log_filter: "info".to_string(),
            default_algorithm: Algorithm::default(),
            drill_seed: None,
            schedule_cache_capacity: 1024,
        }
    }
}

impl Config {
    /// Load from process environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_vars(std::env::vars().collect())
    }

    /// Load from an explicit variable map. Unset keys keep their defaults.
    pub fn from_vars(vars: HashMap<String, String>) -> Result<Self, ConfigError> {
        let mut config = Self::default();

        if let Some(host) = vars.get("HOST") {
            config.host = host.clone();
        }
        if let Some(port) = vars.get("PORT") {
            config.port = parse("PORT", port)?;
        }
        if let Some(filter) = vars.get("RUST_LOG") {
            config.log_filter = filter.clone();
        }
        if let Some(name) = vars.get("SCHEDULER_ALGORITHM") {
            config.default_algorithm = Algorithm::parse(name).ok_or_else(|| ConfigError::Invalid {
                key: "SCHEDULER_ALGORITHM",
                value: name.clone(),
            })?;
        }
        if let Some(seed) = vars.get("DRILL_SEED") {
            config.drill_seed = Some(parse("DRILL_SEED", seed)?);
        }
        if let Some(capacity) = vars.get("SCHEDULE_CACHE_CAPACITY") {
            config.schedule_cache_capacity = parse("SCHEDULE_CACHE_CAPACITY", capacity)?;
        }

        Ok(config)
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

fn parse<T: std::str::FromStr>(key: &'static str, value: &str) -> Result<T, ConfigError> {
    value.trim().parse().map_err(|_| ConfigError::Invalid {
        key,
        value: value.to_string(),
    })
}
