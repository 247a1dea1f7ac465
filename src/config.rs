//! Runtime configuration
//!
//! Read once from environment variables at startup.

use std::time::Duration;

use thiserror::Error;

use crate::catalog::client::DEFAULT_BASE_URL;

/// Default HTTP timeout for catalog requests
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Configuration error types
#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("{name} must be {expected}, got '{value}'")]
    Invalid {
        name: &'static str,
        expected: &'static str,
        value: String,
    },
}

/// Application configuration
#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    /// data.go.kr service key, sent as issued
    pub service_key: String,
    pub api_base_url: String,
    pub http_timeout: Duration,
    /// Overrides the standard daily calorie target
    pub daily_calories: Option<f64>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            service_key: String::new(),
            api_base_url: DEFAULT_BASE_URL.to_string(),
            http_timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            daily_calories: None,
        }
    }
}

impl AppConfig {
    /// Load from the process environment
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Load from an arbitrary variable lookup
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        let non_empty = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());

        let http_timeout = match non_empty("FITMEAL_HTTP_TIMEOUT_SECS") {
            Some(raw) => {
                let secs = raw.trim().parse::<u64>().ok().filter(|s| *s > 0).ok_or(
                    ConfigError::Invalid {
                        name: "FITMEAL_HTTP_TIMEOUT_SECS",
                        expected: "a positive whole number of seconds",
                        value: raw.clone(),
                    },
                )?;
                Duration::from_secs(secs)
            }
            None => defaults.http_timeout,
        };

        let daily_calories = match non_empty("FITMEAL_DAILY_CALORIES") {
            Some(raw) => Some(
                raw.trim()
                    .parse::<f64>()
                    .ok()
                    .filter(|kcal| kcal.is_finite() && *kcal > 0.0)
                    .ok_or(ConfigError::Invalid {
                        name: "FITMEAL_DAILY_CALORIES",
                        expected: "a positive number of kcal",
                        value: raw.clone(),
                    })?,
            ),
            None => None,
        };

        Ok(Self {
            service_key: non_empty("FITMEAL_SERVICE_KEY")
                .map(|k| k.trim().to_string())
                .unwrap_or(defaults.service_key),
            api_base_url: non_empty("FITMEAL_API_BASE_URL")
                .map(|u| u.trim().to_string())
                .unwrap_or(defaults.api_base_url),
            http_timeout,
            daily_calories,
        })
    }
}
