//! Runtime configuration from the environment (`.env` is loaded first by `main`)

use std::time::Duration;

use reqwest::Url;
use thiserror::Error;

const DEFAULT_API_URL: &str = "http://localhost:8002";
const DEFAULT_PAGE_SIZE: usize = 20;
const DEFAULT_TIMEOUT_SECS: u64 = 10;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{key} must be {expected}, got '{value}'")]
    Invalid {
        key: &'static str,
        value: String,
        expected: &'static str,
    },
}

#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    /// Backend root, e.g. `http://localhost:8002`
    pub api_url: String,
    /// Rows per history page
    pub page_size: usize,
    pub timeout: Duration,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let api_url = lookup("FXDESK_API_URL").unwrap_or_else(|| DEFAULT_API_URL.to_string());
        match Url::parse(&api_url) {
            Ok(url) if url.scheme() == "http" || url.scheme() == "https" => {}
            _ => {
                return Err(ConfigError::Invalid {
                    key: "FXDESK_API_URL",
                    value: api_url,
                    expected: "an http(s) URL",
                })
            }
        }

        let page_size = match lookup("FXDESK_PAGE_SIZE") {
            Some(value) => match value.trim().parse::<usize>() {
                Ok(n) if n > 0 => n,
                _ => {
                    return Err(ConfigError::Invalid {
                        key: "FXDESK_PAGE_SIZE",
                        value,
                        expected: "a positive integer",
                    })
                }
            },
            None => DEFAULT_PAGE_SIZE,
        };

        let timeout_secs = match lookup("FXDESK_TIMEOUT_SECS") {
            Some(value) => match value.trim().parse::<u64>() {
                Ok(n) if n > 0 => n,
                _ => {
                    return Err(ConfigError::Invalid {
                        key: "FXDESK_TIMEOUT_SECS",
                        value,
                        expected: "a positive number of seconds",
                    })
                }
            },
            None => DEFAULT_TIMEOUT_SECS,
        };

        Ok(Config {
            api_url,
            page_size,
            timeout: Duration::from_secs(timeout_secs),
        })
    }
}
