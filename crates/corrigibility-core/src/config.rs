//! Validator configuration
//!
//! Only the schema sources are configurable; the rule sets are fixed.

use std::path::PathBuf;

use crate::schema::remote::DEFAULT_SCHEMA_BASE_URL;

pub const DEFAULT_SCHEMA_DIR: &str = "schema";
pub const DEFAULT_HTTP_TIMEOUT_MS: u64 = 10_000;

pub const ENV_SCHEMA_DIR: &str = "VALIDATE_SCHEMA_DIR";
pub const ENV_SCHEMA_BASE_URL: &str = "VALIDATE_SCHEMA_BASE_URL";
pub const ENV_HTTP_TIMEOUT_MS: &str = "VALIDATE_HTTP_TIMEOUT_MS";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatorConfig {
    /// Directory holding cached schema files
    pub schema_dir: PathBuf,

    /// Publisher URL that schema file names are appended to
    pub schema_base_url: String,

    /// Timeout for remote schema fetches in milliseconds
    pub http_timeout_ms: u64,
}

impl Default for ValidatorConfig {
    fn default() -> Self {
        Self {
            schema_dir: PathBuf::from(DEFAULT_SCHEMA_DIR),
            schema_base_url: DEFAULT_SCHEMA_BASE_URL.to_string(),
            http_timeout_ms: DEFAULT_HTTP_TIMEOUT_MS,
        }
    }
}

impl ValidatorConfig {
    pub fn builder() -> ValidatorConfigBuilder {
        ValidatorConfigBuilder::new()
    }

    /// Create config from environment variables. Unset or unparsable values
    /// fall back to the defaults.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();
        Self {
            schema_dir: lookup(ENV_SCHEMA_DIR)
                .map(PathBuf::from)
                .unwrap_or(defaults.schema_dir),
            schema_base_url: lookup(ENV_SCHEMA_BASE_URL).unwrap_or(defaults.schema_base_url),
            http_timeout_ms: lookup(ENV_HTTP_TIMEOUT_MS)
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.http_timeout_ms),
        }
    }
}

/// Builder for ValidatorConfig
#[derive(Debug, Default)]
pub struct ValidatorConfigBuilder {
    config: ValidatorConfig,
}

impl ValidatorConfigBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn schema_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.config.schema_dir = dir.into();
        self
    }

    pub fn schema_base_url(mut self, url: impl Into<String>) -> Self {
        self.config.schema_base_url = url.into();
        self
    }

    pub fn http_timeout_ms(mut self, timeout: u64) -> Self {
        self.config.http_timeout_ms = timeout;
        self
    }

    pub fn build(self) -> ValidatorConfig {
        self.config
    }
}
