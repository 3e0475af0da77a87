use reqwest::{Url, header::HeaderValue};

pub const BACKEND_URL: &str = "COACHKIT_BACKEND_URL";
pub const BACKEND_KEY: &str = "COACHKIT_BACKEND_KEY";
pub const EXERCISE_TABLE: &str = "COACHKIT_EXERCISE_TABLE";

const DEFAULT_EXERCISE_TABLE: &str = "exercises";

/// Connection settings for the hosted backend.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Base URL, always ending with a slash.
    pub url: Url,
    pub api_key: String,
    pub table: String,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let value = |var: &'static str| lookup(var).filter(|v| !v.trim().is_empty());

        let mut url = value(BACKEND_URL)
            .ok_or(ConfigError::Missing(BACKEND_URL))?
            .trim()
            .to_string();
        if !url.ends_with('/') {
            url.push('/');
        }
        let url = Url::parse(&url).map_err(|err| ConfigError::InvalidUrl {
            url: url.clone(),
            reason: err.to_string(),
        })?;
        if url.cannot_be_a_base() {
            return Err(ConfigError::InvalidUrl {
                url: url.to_string(),
                reason: "not a base URL".to_string(),
            });
        }

        let api_key = value(BACKEND_KEY).ok_or(ConfigError::Missing(BACKEND_KEY))?;
        if HeaderValue::from_str(&api_key).is_err() {
            return Err(ConfigError::InvalidKey);
        }

        let table = value(EXERCISE_TABLE).unwrap_or_else(|| DEFAULT_EXERCISE_TABLE.to_string());

        Ok(Self {
            url,
            api_key,
            table,
        })
    }
}

#[derive(thiserror::Error, Debug, PartialEq)]
pub enum ConfigError {
    #[error("environment variable {0} is not set")]
    Missing(&'static str),
    #[error("invalid backend URL {url}: {reason}")]
    InvalidUrl { url: String, reason: String },
    #[error("backend key contains invalid characters")]
    InvalidKey,
}
