//! Secondary adapter: Open Food Facts. Free-text search with per-100g
//! nutriment fields, no credential, and the only upstream that supports
//! fetching a single product by barcode.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::USER_AGENT;
use reqwest::StatusCode;
use tracing::debug;

use crate::config::OffConfig;
use crate::products::lookup::{NewProduct, ProductFetcher};
use crate::search::normalize::{
    normalize_off, normalize_off_product, OffProductResponse, OffSearchResponse,
};
use crate::search::provider::{ProviderError, SearchProvider, MAX_RESULTS};
use crate::search::record::{NutrientRecord, Source};

const PROVIDER: &str = "openfoodfacts";
const SEARCH_FIELDS: &str = "product_name,nutriments,code,brands";

pub struct OffProvider {
    client: reqwest::Client,
    config: OffConfig,
}

impl OffProvider {
    pub fn new(config: OffConfig) -> Self {
        Self {
            client: reqwest::Client::new(),
            config,
        }
    }

    fn timeout(&self) -> Duration {
        Duration::from_secs(self.config.timeout_secs)
    }
}

#[async_trait]
impl SearchProvider for OffProvider {
    fn name(&self) -> &'static str {
        PROVIDER
    }

    fn source(&self) -> Source {
        Source::Secondary
    }

    async fn search(&self, query: &str) -> Result<Vec<NutrientRecord>, ProviderError> {
        let url = format!("{}/cgi/search.pl", self.config.base_url);
        let response = self
            .client
            .get(&url)
            .timeout(self.timeout())
            .header(USER_AGENT, &self.config.user_agent)
            .query(&[
                ("search_terms", query),
                ("search_simple", "1"),
                ("action", "process"),
                ("json", "1"),
                ("page_size", "20"),
                ("fields", SEARCH_FIELDS),
            ])
            .send()
            .await
            .map_err(|source| ProviderError::Request { provider: PROVIDER, source })?;

        let status = response.status();
        if !status.is_success() {
            return Err(ProviderError::Status { provider: PROVIDER, status });
        }

        let body: OffSearchResponse = response
            .json()
            .await
            .map_err(|source| ProviderError::Request { provider: PROVIDER, source })?;

        let records: Vec<_> = body
            .products
            .into_iter()
            .filter_map(normalize_off)
            .take(MAX_RESULTS)
            .collect();
        debug!(count = records.len(), %query, "open food facts search complete");
        Ok(records)
    }
}

#[async_trait]
impl ProductFetcher for OffProvider {
    /// Exact-barcode product fetch. A 404 (or a 200 without a product body)
    /// is "not found", not a provider failure.
    async fn fetch_by_barcode(&self, barcode: &str) -> Result<Option<NewProduct>, ProviderError> {
        let url = format!("{}/api/v2/product/{}.json", self.config.base_url, barcode);
        let response = self
            .client
            .get(&url)
            .timeout(self.timeout())
            .header(USER_AGENT, &self.config.user_agent)
            .send()
            .await
            .map_err(|source| ProviderError::Request { provider: PROVIDER, source })?;

        let status = response.status();
        if status == StatusCode::NOT_FOUND {
            return Ok(None);
        }
        if !status.is_success() {
            return Err(ProviderError::Status { provider: PROVIDER, status });
        }

        let body: OffProductResponse = response
            .json()
            .await
            .map_err(|source| ProviderError::Request { provider: PROVIDER, source })?;

        Ok(body
            .product
            .map(|product| normalize_off_product(barcode, product)))
    }
}
