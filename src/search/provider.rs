use async_trait::async_trait;

use crate::search::record::{NutrientRecord, Source};

/// Upper bound on results a single adapter may hand to the aggregator.
pub const MAX_RESULTS: usize = 15;

/// A single upstream nutrition database. Implementations take their
/// configuration (base URL, credential, timeout) at construction so they can
/// be pointed at fake endpoints in tests.
#[async_trait]
pub trait SearchProvider: Send + Sync {
    fn name(&self) -> &'static str;
    fn source(&self) -> Source;

    /// Free-text search. Zero matches is a success with an empty list, not
    /// an error — the distinction drives the aggregator's fallback.
    async fn search(&self, query: &str) -> Result<Vec<NutrientRecord>, ProviderError>;
}

/// One named provider failed. Consumed by the aggregator's fallback; never
/// reaches a route handler raw.
#[derive(Debug, thiserror::Error)]
pub enum ProviderError {
    #[error("{provider}: API key not configured")]
    MissingCredentials { provider: &'static str },

    #[error("{provider}: request failed: {source}")]
    Request {
        provider: &'static str,
        #[source]
        source: reqwest::Error,
    },

    #[error("{provider}: unexpected status {status}")]
    Status {
        provider: &'static str,
        status: reqwest::StatusCode,
    },
}

impl ProviderError {
    pub fn provider(&self) -> &'static str {
        match self {
            ProviderError::MissingCredentials { provider }
            | ProviderError::Request { provider, .. }
            | ProviderError::Status { provider, .. } => provider,
        }
    }
}
