//! # Back-Office Configuration
//!
//! ## Configuration Sources
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Configuration Priority                               │
//! │                                                                         │
//! │  1. Environment Variables (highest priority)                            │
//! │     TALLY_STORE_NAME=Corner Shop                                        │
//! │     TALLY_INSIGHTS_URL=https://proxy.example.com                        │
//! │                                                                         │
//! │  2. TOML Config File                                                    │
//! │     ~/.config/tally-backoffice/backoffice.toml (Linux)                  │
//! │     ~/Library/Application Support/com.tally.backoffice/... (macOS)      │
//! │                                                                         │
//! │  3. Default Values (lowest priority)                                    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Configuration File Format
//! ```toml
//! [store]
//! name = "Corner Shop"
//! currency_code = "USD"
//! seed_demo_data = true
//!
//! [reports]
//! utc_offset_minutes = -300
//! top_n = 5
//!
//! [insights]
//! base_url = "http://localhost:3000"
//! insights_path = "/api/insights"
//! chat_path = "/api/chat"
//! timeout_secs = 30
//! ```

use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use tally_core::DEFAULT_TOP_N;
use tally_insights::{InsightsConfig, InsightsError};
use tally_reports::ReportFilter;
use thiserror::Error;
use tracing::{debug, info, warn};

pub type ConfigResult<T> = Result<T, ConfigError>;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Failed to write config: {0}")]
    Serialize(#[from] toml::ser::Error),

    #[error("Invalid configuration: {0}")]
    Invalid(String),

    #[error("No config path available")]
    NoPath,
}

impl From<InsightsError> for ConfigError {
    fn from(err: InsightsError) -> Self {
        ConfigError::Invalid(err.to_string())
    }
}

// =============================================================================
// Sections
// =============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StoreSettings {
    /// Shown in the dashboard header and in insights prompts.
    pub name: String,
    /// ISO 4217 code.
    pub currency_code: String,
    /// Start from the demo data set instead of an empty store.
    pub seed_demo_data: bool,
}

impl Default for StoreSettings {
    fn default() -> Self {
        StoreSettings {
            name: "Tally Demo Store".to_string(),
            currency_code: "USD".to_string(),
            seed_demo_data: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReportSettings {
    /// Local offset that report day boundaries are measured in.
    pub utc_offset_minutes: i32,
    pub top_n: usize,
}

impl Default for ReportSettings {
    fn default() -> Self {
        ReportSettings {
            utc_offset_minutes: 0,
            top_n: DEFAULT_TOP_N,
        }
    }
}

impl ReportSettings {
    /// An unbounded filter carrying the configured offset and ranking size.
    pub fn base_filter(&self) -> ReportFilter {
        ReportFilter::all()
            .with_offset_minutes(self.utc_offset_minutes)
            .top(self.top_n)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BackofficeConfig {
    #[serde(default)]
    pub store: StoreSettings,

    #[serde(default)]
    pub reports: ReportSettings,

    #[serde(default)]
    pub insights: InsightsConfig,
}

impl BackofficeConfig {
    /// Loads configuration from file, environment, and defaults.
    ///
    /// ## Load Order (later overrides earlier)
    /// 1. Default values
    /// 2. Config file (backoffice.toml)
    /// 3. Environment variables
    pub fn load(config_path: Option<PathBuf>) -> ConfigResult<Self> {
        let mut config = Self::default();

        if let Some(path) = config_path.or_else(Self::default_config_path) {
            if path.exists() {
                info!(?path, "Loading back-office config from file");
                let contents = std::fs::read_to_string(&path)?;
                config = toml::from_str(&contents)?;
            } else {
                debug!(?path, "Config file not found, using defaults");
            }
        }

        config.apply_overrides(|key| std::env::var(key).ok());
        config.validate()?;

        Ok(config)
    }

    /// Loads config or returns default if load fails.
    pub fn load_or_default(config_path: Option<PathBuf>) -> Self {
        Self::load(config_path).unwrap_or_else(|e| {
            warn!("Failed to load back-office config: {}. Using defaults.", e);
            Self::default()
        })
    }

    pub fn save(&self, config_path: Option<PathBuf>) -> ConfigResult<()> {
        let path = config_path
            .or_else(Self::default_config_path)
            .ok_or(ConfigError::NoPath)?;

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let contents = toml::to_string_pretty(self)?;
        std::fs::write(&path, contents)?;

        info!(?path, "Back-office config saved");
        Ok(())
    }

    pub fn validate(&self) -> ConfigResult<()> {
        if self.store.name.trim().is_empty() {
            return Err(ConfigError::Invalid("store.name must not be empty".into()));
        }

        let code = &self.store.currency_code;
        if code.len() != 3 || !code.chars().all(|c| c.is_ascii_uppercase()) {
            return Err(ConfigError::Invalid(format!(
                "store.currency_code must be three uppercase letters, got {code:?}"
            )));
        }

        // chrono accepts offsets strictly inside ±24h.
        if self.reports.utc_offset_minutes.abs() >= 24 * 60 {
            return Err(ConfigError::Invalid(format!(
                "reports.utc_offset_minutes out of range: {}",
                self.reports.utc_offset_minutes
            )));
        }

        if self.reports.top_n == 0 {
            return Err(ConfigError::Invalid("reports.top_n must be greater than 0".into()));
        }

        self.insights.validate()?;
        Ok(())
    }

    /// Applies `TALLY_*` overrides read through `lookup`.
    fn apply_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(name) = lookup("TALLY_STORE_NAME") {
            self.store.name = name;
        }

        if let Some(code) = lookup("TALLY_CURRENCY_CODE") {
            self.store.currency_code = code.to_uppercase();
        }

        if let Some(seed) = lookup("TALLY_SEED_DEMO_DATA") {
            self.store.seed_demo_data = seed != "false" && seed != "0";
        }

        if let Some(offset) = lookup("TALLY_UTC_OFFSET_MINUTES") {
            match offset.parse::<i32>() {
                Ok(minutes) => {
                    debug!(minutes, "Overriding report offset from environment");
                    self.reports.utc_offset_minutes = minutes;
                }
                Err(_) => warn!(value = %offset, "Ignoring unparseable TALLY_UTC_OFFSET_MINUTES"),
            }
        }

        if let Some(top_n) = lookup("TALLY_TOP_N") {
            if let Ok(n) = top_n.parse::<usize>() {
                self.reports.top_n = n;
            }
        }

        if let Some(url) = lookup("TALLY_INSIGHTS_URL") {
            debug!(url = %url, "Overriding insights URL from environment");
            self.insights.base_url = url;
        }

        if let Some(secs) = lookup("TALLY_INSIGHTS_TIMEOUT_SECS") {
            if let Ok(s) = secs.parse::<u64>() {
                self.insights.timeout_secs = Some(s);
            }
        }
    }

    fn default_config_path() -> Option<PathBuf> {
        directories::ProjectDirs::from("com", "tally", "backoffice")
            .map(|dirs| dirs.config_dir().join("backoffice.toml"))
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
