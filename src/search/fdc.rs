//! Primary adapter: USDA FoodData Central, searched by text with nutrient
//! values keyed by numeric ids. Requires an API key.

use std::time::Duration;

use async_trait::async_trait;
use tracing::debug;

use crate::config::FdcConfig;
use crate::search::normalize::{normalize_fdc, FdcSearchResponse};
use crate::search::provider::{ProviderError, SearchProvider, MAX_RESULTS};
use crate::search::record::{NutrientRecord, Source};

const PROVIDER: &str = "usda-fdc";
const PAGE_SIZE: &str = "25";
const DATA_TYPES: &str = "Foundation,Survey (FNDDS),SR Legacy,Branded";

pub struct FdcProvider {
    client: reqwest::Client,
    config: FdcConfig,
}

impl FdcProvider {
    pub fn new(config: FdcConfig) -> Self {
        Self {
            client: reqwest::Client::new(),
            config,
        }
    }
}

#[async_trait]
impl SearchProvider for FdcProvider {
    fn name(&self) -> &'static str {
        PROVIDER
    }

    fn source(&self) -> Source {
        Source::Primary
    }

    async fn search(&self, query: &str) -> Result<Vec<NutrientRecord>, ProviderError> {
        let api_key = self
            .config
            .api_key
            .as_deref()
            .filter(|k| !k.is_empty())
            .ok_or(ProviderError::MissingCredentials { provider: PROVIDER })?;

        let url = format!("{}/v1/foods/search", self.config.base_url);
        let response = self
            .client
            .get(&url)
            .timeout(Duration::from_secs(self.config.timeout_secs))
            .query(&[
                ("api_key", api_key),
                ("query", query),
                ("pageSize", PAGE_SIZE),
                ("dataType", DATA_TYPES),
            ])
            .send()
            .await
            .map_err(|source| ProviderError::Request { provider: PROVIDER, source })?;

        let status = response.status();
        if !status.is_success() {
            return Err(ProviderError::Status { provider: PROVIDER, status });
        }

        let body: FdcSearchResponse = response
            .json()
            .await
            .map_err(|source| ProviderError::Request { provider: PROVIDER, source })?;

        let records: Vec<_> = body
            .foods
            .into_iter()
            .filter_map(normalize_fdc)
            .take(MAX_RESULTS)
            .collect();
        debug!(count = records.len(), %query, "fdc search complete");
        Ok(records)
    }
}
