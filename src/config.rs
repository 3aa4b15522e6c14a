use std::env;
use thiserror::Error;

const HOST: &str = "0.0.0.0";
const PORT: u16 = 8080;
const DATABASE: &str = "TripPlanner";
const COMPLETION_API_URL: &str = "https://apps.abacus.ai/v1/chat/completions";
const COMPLETION_MODEL: &str = "gpt-4.1-mini";

#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("{0} must be set")]
    Missing(&'static str),
    #[error("{name} is not a valid number: {value}")]
    Invalid { name: &'static str, value: String },
}

#[derive(Debug, Clone)]
pub struct CompletionConfig {
    pub api_url: String,
    pub api_key: String,
    pub model: String,
    /// Left to the HTTP client's default when unset.
    pub timeout_secs: Option<u64>,
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    pub mongo_uri: String,
    pub database: String,
    pub jwt_secret: String,
    pub completion: CompletionConfig,
}

impl AppConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Builds the config from any variable source; empty values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |name: &str| lookup(name).filter(|value| !value.trim().is_empty());
        let required = |name: &'static str| get(name).ok_or(ConfigError::Missing(name));

        let port = match get("PORT") {
            Some(value) => value
                .parse::<u16>()
                .map_err(|_| ConfigError::Invalid { name: "PORT", value })?,
            None => PORT,
        };
        let timeout_secs = match get("COMPLETION_TIMEOUT_SECS") {
            Some(value) => Some(value.parse::<u64>().map_err(|_| ConfigError::Invalid {
                name: "COMPLETION_TIMEOUT_SECS",
                value,
            })?),
            None => None,
        };

        Ok(Self {
            host: get("HOST").unwrap_or_else(|| HOST.to_string()),
            port,
            mongo_uri: required("MONGODB_URI")?,
            database: get("MONGODB_DATABASE").unwrap_or_else(|| DATABASE.to_string()),
            jwt_secret: required("JWT_SECRET")?,
            completion: CompletionConfig {
                api_url: get("COMPLETION_API_URL").unwrap_or_else(|| COMPLETION_API_URL.to_string()),
                api_key: required("COMPLETION_API_KEY")?,
                model: get("COMPLETION_MODEL").unwrap_or_else(|| COMPLETION_MODEL.to_string()),
                timeout_secs,
            },
        })
    }
}
