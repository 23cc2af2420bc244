//! # Console Configuration
//!
//! [`ConsoleConfig`] is read from an optional TOML file and then overridden
//! by environment variables:
//!
//! | Key | Variable | Default |
//! |-----|----------|---------|
//! | `api_base_url` | `CONSOLE_API_URL` | `http://localhost:8000/api` |
//! | `request_timeout_secs` | `CONSOLE_TIMEOUT_SECS` | `30` |
//! | `per_page` | `CONSOLE_PER_PAGE` | `10` |
//!
//! ```rust
//! use admin_console::config::ConsoleConfig;
//!
//! let config = ConsoleConfig::from_toml_str("per_page = 25").unwrap();
//! assert_eq!(config.per_page, 25);
//! assert_eq!(config.api_base_url, "http://localhost:8000/api");
//! ```

use crate::error::ConsoleError;
use console_framework::{QueryParams, DEFAULT_PER_PAGE};
use serde::Deserialize;
use std::path::Path;
use std::str::FromStr;
use std::time::Duration;
use tracing::debug;

pub const DEFAULT_API_BASE_URL: &str = "http://localhost:8000/api";
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

pub const ENV_API_URL: &str = "CONSOLE_API_URL";
pub const ENV_TIMEOUT_SECS: &str = "CONSOLE_TIMEOUT_SECS";
pub const ENV_PER_PAGE: &str = "CONSOLE_PER_PAGE";

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ConsoleConfig {
    pub api_base_url: String,
    pub request_timeout_secs: u64,
    pub per_page: u32,
}

impl Default for ConsoleConfig {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            request_timeout_secs: DEFAULT_TIMEOUT_SECS,
            per_page: DEFAULT_PER_PAGE,
        }
    }
}

impl ConsoleConfig {
    /// Loads `path` (if any), then applies the process environment.
    pub fn load(path: Option<&Path>) -> Result<Self, ConsoleError> {
        let mut config = match path {
            Some(path) => {
                let raw = std::fs::read_to_string(path).map_err(|e| {
                    ConsoleError::Config(format!("cannot read {}: {e}", path.display()))
                })?;
                Self::from_toml_str(&raw)?
            }
            None => Self::default(),
        };
        config.apply_env(|key| std::env::var(key).ok())?;
        debug!(?config, "Configuration loaded");
        Ok(config)
    }

    pub fn from_toml_str(raw: &str) -> Result<Self, ConsoleError> {
        let mut config: Self =
            toml::from_str(raw).map_err(|e| ConsoleError::Config(e.message().to_string()))?;
        config.api_base_url = config.api_base_url.trim().to_string();
        config.validate()?;
        Ok(config)
    }

    /// Overrides fields from `lookup`, which maps a variable name to its value.
    pub fn apply_env(
        &mut self,
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Result<(), ConsoleError> {
        if let Some(url) = lookup(ENV_API_URL) {
            self.api_base_url = url.trim().to_string();
        }
        if let Some(raw) = lookup(ENV_TIMEOUT_SECS) {
            self.request_timeout_secs = parse_var(ENV_TIMEOUT_SECS, &raw)?;
        }
        if let Some(raw) = lookup(ENV_PER_PAGE) {
            self.per_page = parse_var(ENV_PER_PAGE, &raw)?;
        }
        self.validate()
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    /// Initial query parameters for every list.
    pub fn query_params(&self) -> QueryParams {
        QueryParams::with_per_page(self.per_page)
    }

    fn validate(&self) -> Result<(), ConsoleError> {
        let url = &self.api_base_url;
        if !(url.starts_with("http://") || url.starts_with("https://")) {
            return Err(ConsoleError::Config(format!(
                "api_base_url must start with http:// or https://, got {url:?}"
            )));
        }
        if self.request_timeout_secs == 0 {
            return Err(ConsoleError::Config(
                "request_timeout_secs must be greater than 0".into(),
            ));
        }
        if self.per_page == 0 {
            return Err(ConsoleError::Config("per_page must be greater than 0".into()));
        }
        Ok(())
    }
}

fn parse_var<T: FromStr>(key: &str, raw: &str) -> Result<T, ConsoleError> {
    raw.trim()
        .parse()
        .map_err(|_| ConsoleError::Config(format!("{key} is not a valid number: {raw:?}")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn env(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn empty_file_gives_defaults() {
        let config = ConsoleConfig::from_toml_str("").unwrap();
        assert_eq!(config, ConsoleConfig::default());
        assert_eq!(config.timeout(), Duration::from_secs(30));
        assert_eq!(config.query_params().per_page, 10);
    }

    #[test]
    fn file_values_are_read() {
        let config = ConsoleConfig::from_toml_str(
            r#"
            api_base_url = "https://admin.example.com/api"
            request_timeout_secs = 5
            "#,
        )
        .unwrap();
        assert_eq!(config.api_base_url, "https://admin.example.com/api");
        assert_eq!(config.request_timeout_secs, 5);
        assert_eq!(config.per_page, 10);
    }

    #[test]
    fn environment_overrides_file() {
        let mut config = ConsoleConfig::from_toml_str("per_page = 25").unwrap();
        config
            .apply_env(env(&[
                (ENV_API_URL, "https://staging.example.com/api"),
                (ENV_PER_PAGE, " 50 "),
            ]))
            .unwrap();
        assert_eq!(config.api_base_url, "https://staging.example.com/api");
        assert_eq!(config.per_page, 50);
    }

    #[test]
    fn base_url_is_stored_trimmed() {
        let config = ConsoleConfig::from_toml_str("api_base_url = \" https://admin.example.com/api \"").unwrap();
        assert_eq!(config.api_base_url, "https://admin.example.com/api");

        let mut config = ConsoleConfig::default();
        config
            .apply_env(env(&[(ENV_API_URL, "\thttps://staging.example.com/api\n")]))
            .unwrap();
        assert_eq!(config.api_base_url, "https://staging.example.com/api");
    }

    #[test]
    fn invalid_values_are_config_errors() {
        let bad = [
            ConsoleConfig::from_toml_str("per_page = 0"),
            ConsoleConfig::from_toml_str("api_base_url = \"ftp://x\""),
            ConsoleConfig::from_toml_str("per_page = \"ten\""),
            ConsoleConfig::from_toml_str("unknown_key = 1"),
        ];
        for result in bad {
            assert!(matches!(result, Err(ConsoleError::Config(_))), "{result:?}");
        }

        let mut config = ConsoleConfig::default();
        let err = config
            .apply_env(env(&[(ENV_TIMEOUT_SECS, "soon")]))
            .unwrap_err();
        assert!(matches!(err, ConsoleError::Config(_)));
    }
}
