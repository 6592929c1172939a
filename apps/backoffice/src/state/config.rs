//! Configuration loaded at startup. Read-only afterwards, so no mutex.

use tally_core::Money;
use tally_reports::ReportFilter;

use crate::config::BackofficeConfig;

#[derive(Debug, Clone, Default)]
pub struct ConfigState {
    config: BackofficeConfig,
}

impl ConfigState {
    pub fn new(config: BackofficeConfig) -> Self {
        ConfigState { config }
    }

    pub fn config(&self) -> &BackofficeConfig {
        &self.config
    }

    pub fn store_name(&self) -> &str {
        &self.config.store.name
    }

    /// Filter used when a report command is called without one.
    pub fn default_filter(&self) -> ReportFilter {
        self.config.reports.base_filter()
    }

    /// Completes a caller's filter with the configured offset when it has none.
    pub fn localize(&self, mut filter: ReportFilter) -> ReportFilter {
        if filter.utc_offset_minutes.is_none() {
            filter.utc_offset_minutes = Some(self.config.reports.utc_offset_minutes);
        }
        filter
    }

    /// `"12.34 USD"`, for logs and insights prompts.
    pub fn format_money(&self, amount: Money) -> String {
        format!("{} {}", amount, self.config.store.currency_code)
    }
}
