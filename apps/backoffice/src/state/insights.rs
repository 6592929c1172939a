//! Holds the insights client built from the `[insights]` config section.

use tally_insights::{InsightsClient, InsightsConfig, InsightsResult};

#[derive(Debug, Clone)]
pub struct InsightsState {
    client: InsightsClient,
}

impl InsightsState {
    pub fn new(config: &InsightsConfig) -> InsightsResult<Self> {
        Ok(InsightsState {
            client: InsightsClient::new(config)?,
        })
    }

    pub fn client(&self) -> &InsightsClient {
        &self.client
    }
}
