//! Sequential provider fallback. Providers are tried strictly in order —
//! primary first — and the first success with at least one result wins. No
//! fan-out: a later provider is only contacted when an earlier one failed or
//! came back empty.

use std::sync::Arc;

use tracing::{debug, info, warn};

use crate::search::provider::{ProviderError, SearchProvider};
use crate::search::rank::rank;
use crate::search::record::{NutrientRecord, Source};

/// Queries shorter than this (trimmed) are rejected before any provider call.
pub const MIN_QUERY_LEN: usize = 2;

#[derive(Debug, thiserror::Error)]
pub enum SearchError {
    /// No provider succeeded at all. Reportable "search unavailable", not
    /// fatal — the handler turns it into an empty result payload.
    #[error("all search providers failed")]
    AllProvidersFailed(Vec<ProviderError>),
}

#[derive(Debug)]
pub struct SearchHits {
    pub results: Vec<NutrientRecord>,
    /// Provider that produced the list; `None` when the query was too short.
    pub source: Option<Source>,
}

pub struct FoodSearch {
    providers: Vec<Arc<dyn SearchProvider>>,
}

impl FoodSearch {
    /// Providers in fallback order, most authoritative first.
    pub fn new(providers: Vec<Arc<dyn SearchProvider>>) -> Self {
        Self { providers }
    }

    pub async fn search(&self, query: &str) -> Result<SearchHits, SearchError> {
        let query = query.trim();
        if query.chars().count() < MIN_QUERY_LEN {
            return Ok(SearchHits {
                results: Vec::new(),
                source: None,
            });
        }

        let mut failures = Vec::new();
        let mut empty_from = None;
        for provider in &self.providers {
            match provider.search(query).await {
                Ok(results) if !results.is_empty() => {
                    info!(
                        provider = provider.name(),
                        count = results.len(),
                        %query,
                        "search satisfied"
                    );
                    return Ok(SearchHits {
                        results: rank(results, query),
                        source: Some(provider.source()),
                    });
                }
                Ok(_) => {
                    debug!(provider = provider.name(), %query, "no matches, falling through");
                    empty_from = Some(provider.source());
                }
                Err(e) => {
                    warn!(provider = e.provider(), error = %e, "provider failed, falling through");
                    failures.push(e);
                }
            }
        }

        match empty_from {
            Some(source) => Ok(SearchHits {
                results: Vec::new(),
                source: Some(source),
            }),
            None => Err(SearchError::AllProvidersFailed(failures)),
        }
    }
}
