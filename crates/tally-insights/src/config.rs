//! Where the proxy lives and how long to wait for it.

use std::time::Duration;

use serde::{Deserialize, Serialize};
use url::Url;

use crate::error::{InsightsError, InsightsResult};

pub const DEFAULT_BASE_URL: &str = "http://localhost:3000";
pub const DEFAULT_INSIGHTS_PATH: &str = "/api/insights";
pub const DEFAULT_CHAT_PATH: &str = "/api/chat";

/// Endpoint settings. Mirrors the `[insights]` section of the back-office
/// config file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct InsightsConfig {
    pub base_url: String,
    pub insights_path: String,
    pub chat_path: String,
    /// No client-side timeout when absent.
    pub timeout_secs: Option<u64>,
}

impl Default for InsightsConfig {
    fn default() -> Self {
        InsightsConfig {
            base_url: DEFAULT_BASE_URL.to_string(),
            insights_path: DEFAULT_INSIGHTS_PATH.to_string(),
            chat_path: DEFAULT_CHAT_PATH.to_string(),
            timeout_secs: None,
        }
    }
}

impl InsightsConfig {
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn validate(&self) -> InsightsResult<()> {
        let base = Url::parse(&self.base_url)?;
        if !matches!(base.scheme(), "http" | "https") {
            return Err(InsightsError::InvalidConfig(format!(
                "base_url must be http or https, got {}",
                base.scheme()
            )));
        }
        for (name, path) in [("insights_path", &self.insights_path), ("chat_path", &self.chat_path)] {
            if !path.starts_with('/') {
                return Err(InsightsError::InvalidConfig(format!(
                    "{name} must start with '/', got {path:?}"
                )));
            }
        }
        if self.timeout_secs == Some(0) {
            return Err(InsightsError::InvalidConfig(
                "timeout_secs must be greater than zero".to_string(),
            ));
        }
        Ok(())
    }

    pub fn insights_url(&self) -> InsightsResult<Url> {
        self.endpoint(&self.insights_path)
    }

    pub fn chat_url(&self) -> InsightsResult<Url> {
        self.endpoint(&self.chat_path)
    }

    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_secs.map(Duration::from_secs)
    }

    /// Appends `path` to the base URL, keeping any path prefix the base has.
    fn endpoint(&self, path: &str) -> InsightsResult<Url> {
        let joined = format!(
            "{}/{}",
            self.base_url.trim_end_matches('/'),
            path.trim_start_matches('/')
        );
        Ok(Url::parse(&joined)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let config = InsightsConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.insights_url().unwrap().as_str(), "http://localhost:3000/api/insights");
        assert_eq!(config.timeout(), None);
    }

    #[test]
    fn test_base_path_prefix_is_kept() {
        let config = InsightsConfig::default().with_base_url("https://proxy.example.com/tally/");
        assert_eq!(config.chat_url().unwrap().as_str(), "https://proxy.example.com/tally/api/chat");
    }

    #[test]
    fn test_rejects_bad_settings() {
        let bad_scheme = InsightsConfig::default().with_base_url("ftp://example.com");
        assert!(matches!(bad_scheme.validate(), Err(InsightsError::InvalidConfig(_))));

        let bad_path = InsightsConfig {
            chat_path: "api/chat".to_string(),
            ..InsightsConfig::default()
        };
        assert!(bad_path.validate().is_err());

        let zero_timeout = InsightsConfig {
            timeout_secs: Some(0),
            ..InsightsConfig::default()
        };
        assert!(zero_timeout.validate().is_err());
    }

    #[test]
    fn test_partial_toml_section_fills_defaults() {
        let config: InsightsConfig = serde_json::from_str(r#"{"timeout_secs": 20}"#).unwrap();
        assert_eq!(config.timeout(), Some(Duration::from_secs(20)));
        assert_eq!(config.chat_path, DEFAULT_CHAT_PATH);
    }
}
