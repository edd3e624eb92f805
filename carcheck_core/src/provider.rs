use std::time::Duration;

use async_trait::async_trait;
use thiserror::Error;

use crate::query::Query;
use crate::record::VehicleRecord;

/// A provider failure, as opposed to a provider that simply has no record.
#[derive(Debug, Error)]
pub enum ProviderError {
    #[error("request failed: {0}")]
    Http(String),

    #[error("unexpected status {status}: {body}")]
    Status { status: u16, body: String },

    #[error("malformed response: {0}")]
    Decode(String),

    #[error("timed out after {0:?}")]
    Timeout(Duration),
}

/// One external vehicle-history source.
///
/// `Ok(None)` means the source has nothing for this query, or the adapter
/// is disabled (missing credentials, unsupported identifier shape) and
/// did not call out at all.
#[async_trait]
pub trait VehicleProvider: Send + Sync {
    /// Display name, also written into `VehicleRecord::source`.
    fn name(&self) -> &str;

    /// Whether the adapter has the credentials it needs.
    fn is_configured(&self) -> bool {
        true
    }

    async fn fetch(&self, query: &Query) -> Result<Option<VehicleRecord>, ProviderError>;
}
