use std::sync::Arc;
use std::time::Duration;

use tokio::time::timeout;
use tracing::{debug, info, warn};

use crate::provider::{ProviderError, VehicleProvider};
use crate::query::Query;
use crate::record::VehicleRecord;

/// Default per-provider deadline.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(15);

/// Tries providers in priority order; the first record wins.
pub struct Resolver {
    providers: Vec<Arc<dyn VehicleProvider>>,
    timeout: Duration,
}

impl Resolver {
    #[must_use]
    pub fn new(providers: Vec<Arc<dyn VehicleProvider>>) -> Self {
        Self {
            providers,
            timeout: DEFAULT_TIMEOUT,
        }
    }

    #[must_use]
    pub const fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Returns the first provider's record, or `None` when every provider
    /// came up empty. Provider failures never escape; they fall through
    /// to the next provider.
    pub async fn resolve(&self, query: &Query) -> Option<VehicleRecord> {
        for provider in &self.providers {
            let name = provider.name();

            if !provider.is_configured() {
                debug!("Skipping {name}: not configured");
                continue;
            }

            let outcome = match timeout(self.timeout, provider.fetch(query)).await {
                Ok(outcome) => outcome,
                Err(_) => Err(ProviderError::Timeout(self.timeout)),
            };

            match outcome {
                Ok(Some(record)) => {
                    info!("{name}: found record for {query}");
                    return Some(record);
                }
                Ok(None) => info!("{name}: no record for {query}"),
                Err(e) => warn!("{name}: lookup for {query} failed: {e}"),
            }
        }

        info!("No provider has a record for {query}");
        None
    }
}
