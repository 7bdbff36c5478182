//! CRM sink stub
//!
//! Stands in for the downstream CRM until the real integration lands;
//! the delay simulates the network round trip.

use std::time::Duration;
use tracing::info;

use leadflow_common::db::models::Lead;
use leadflow_common::Result;

const SIMULATED_PUSH_DELAY: Duration = Duration::from_millis(100);

/// Simulated CRM delivery target
#[derive(Debug, Clone)]
pub struct CrmSink {
    delay: Duration,
}

impl CrmSink {
    pub fn new() -> Self {
        Self {
            delay: SIMULATED_PUSH_DELAY,
        }
    }

    /// Sink with a custom delay, for tests that should not wait.
    pub fn with_delay(delay: Duration) -> Self {
        Self { delay }
    }

    /// Deliver one lead to the CRM.
    pub async fn push(&self, lead: &Lead) -> Result<()> {
        tokio::time::sleep(self.delay).await;
        info!(name = %lead.name, "sending verified lead to sales team");
        Ok(())
    }
}

impl Default for CrmSink {
    fn default() -> Self {
        Self::new()
    }
}
