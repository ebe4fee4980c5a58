use thiserror::Error;

use crate::store::DEFAULT_PAGE_LIMIT;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid configuration: {0}")]
    ValidationError(String),
}

#[derive(Debug, Clone)]
pub struct Config {
    pub api: ApiConfig,
    /// Page size requested from listing endpoints
    pub page_limit: u32,
    /// Buffered mutation events per subscriber before lagging ones drop events
    pub event_capacity: usize,
}

#[derive(Debug, Clone)]
pub struct ApiConfig {
    /// Base URL every endpoint path is joined onto
    pub root: String,
    /// Bearer token for authenticated endpoints
    pub token: Option<String>,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            root: "http://localhost:5000/api/".to_string(),
            token: None,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api: ApiConfig::default(),
            page_limit: DEFAULT_PAGE_LIMIT,
            event_capacity: 64,
        }
    }
}

impl Config {
    /// Load configuration from environment variables.
    pub fn load() -> Result<Self, ConfigError> {
        let defaults = Config::default();

        let root = std::env::var("API_ROOT").unwrap_or(defaults.api.root);
        let token = std::env::var("API_TOKEN").ok().filter(|t| !t.is_empty());

        let page_limit = match std::env::var("PAGE_LIMIT") {
            Ok(raw) => raw.parse().map_err(|e| {
                ConfigError::ValidationError(format!("PAGE_LIMIT must be an integer: {e}"))
            })?,
            Err(_) => defaults.page_limit,
        };

        let event_capacity = std::env::var("EVENT_CAPACITY")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(defaults.event_capacity);

        let config = Config {
            api: ApiConfig { root, token },
            page_limit,
            event_capacity,
        };

        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.page_limit == 0 {
            return Err(ConfigError::ValidationError(
                "PAGE_LIMIT must be greater than zero".to_string(),
            ));
        }

        if self.event_capacity == 0 {
            return Err(ConfigError::ValidationError(
                "EVENT_CAPACITY must be greater than zero".to_string(),
            ));
        }

        crate::api::base_url(&self.api.root)
            .map_err(|e| ConfigError::ValidationError(format!("API_ROOT: {e}")))?;

        if self.api.token.is_none() {
            tracing::warn!("API_TOKEN is not set; authenticated endpoints will be rejected");
        }

        Ok(())
    }
}
