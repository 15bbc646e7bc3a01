use serde::{Deserialize, Serialize};

use crate::products::lookup::{CachedProduct, Found, LookupSource};
use crate::search::aggregate::SearchHits;
use crate::search::provider::ProviderError;
use crate::search::record::{NutrientRecord, Source};

#[derive(Debug, Deserialize)]
pub struct SearchParams {
    #[serde(default)]
    pub query: String,
}

/// One failed provider, reported alongside an empty result set.
#[derive(Debug, Serialize)]
pub struct ProviderFailure {
    pub provider: String,
    pub error: String,
}

#[derive(Debug, Serialize)]
pub struct SearchResponse {
    pub results: Vec<NutrientRecord>,
    pub source: &'static str,
    pub count: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<&'static str>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub errors: Vec<ProviderFailure>,
}

impl SearchResponse {
    pub fn too_short() -> Self {
        Self {
            results: Vec::new(),
            source: "none",
            count: 0,
            message: Some("Query too short"),
            errors: Vec::new(),
        }
    }

    pub fn from_hits(hits: SearchHits) -> Self {
        let source = match hits.source {
            Some(Source::Primary) => "primary",
            Some(Source::Secondary) => "secondary",
            None => "none",
        };
        Self {
            count: hits.results.len(),
            results: hits.results,
            source,
            message: None,
            errors: Vec::new(),
        }
    }

    pub fn unavailable(failures: Vec<ProviderError>) -> Self {
        Self {
            results: Vec::new(),
            source: "none",
            count: 0,
            message: Some("Search unavailable, try again"),
            errors: failures
                .iter()
                .map(|e| ProviderFailure {
                    provider: e.provider().to_string(),
                    error: e.to_string(),
                })
                .collect(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct LookupResponse {
    pub source: LookupSource,
    pub product: CachedProduct,
}

impl From<Found> for LookupResponse {
    fn from(found: Found) -> Self {
        Self {
            source: found.source,
            product: found.product,
        }
    }
}
