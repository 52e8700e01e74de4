//! Rates service client
//!
//! HTTP client for an external rates service, optionally backed by the
//! SQLite snapshot cache. An HTTP 404 means "unknown currency" and maps to
//! an empty table, never an error.

use super::{IndexTable, RateCache, RateSource, RateTable};
use anyhow::Result;
use reqwest::{Client, StatusCode};
use serde::Deserialize;
use std::future::Future;
use std::path::Path;
use std::time::Duration;
use thiserror::Error;

/// Request timeout for the rates service
const TIMEOUT_SECS: u64 = 10;

/// Errors surfaced by the rates service client
#[derive(Debug, Error)]
pub enum RatesServiceError {
    /// Non-success status other than 404
    #[error("rates service returned status {0}")]
    Status(StatusCode),
    /// Connection or protocol failure
    #[error("rates service request failed: {0}")]
    Transport(#[from] reqwest::Error),
    /// Body did not match the expected payload
    #[error("failed to decode rates service response: {0}")]
    Decode(#[from] serde_json::Error),
}

/// Rate table payload: `{"rates": {"EUR": 0.89879561, ...}}`
#[derive(Debug, Deserialize)]
struct RatesResponse {
    rates: RateTable,
}

/// Currency index payload: `{"currencies": {"USD": 27, ...}}`
#[derive(Debug, Deserialize)]
struct IndexResponse {
    currencies: IndexTable,
}

/// Client for the external rates service
pub struct RatesClient {
    /// Service base URL
    base_url: String,
    /// Optional snapshot cache
    cache: Option<RateCache>,
    /// HTTP client
    client: Client,
}

impl RatesClient {
    /// Create a new client for the given base URL
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            cache: None,
            client: Client::builder()
                .timeout(Duration::from_secs(TIMEOUT_SECS))
                .build()
                .expect("Failed to create HTTP client"),
        }
    }

    /// Create with a snapshot cache at the given path
    pub fn with_cache<P: AsRef<Path>>(base_url: impl Into<String>, cache_path: P) -> Result<Self> {
        let cache = RateCache::new(cache_path)?;
        let mut client = Self::new(base_url);
        client.cache = Some(cache);
        Ok(client)
    }

    /// The service base URL
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Fetch the rate table for a source currency
    pub async fn rates(&self, source_currency: &str) -> Result<RateTable, RatesServiceError> {
        let url = format!(
            "{}/currencies/{}/rates",
            self.base_url,
            source_currency.to_uppercase()
        );

        let response = self.client.get(&url).send().await?;
        let status = response.status();
        if status == StatusCode::NOT_FOUND {
            return Ok(RateTable::new());
        }
        if !status.is_success() {
            return Err(RatesServiceError::Status(status));
        }

        let body = response.text().await?;
        let parsed: RatesResponse = serde_json::from_str(&body)?;
        Ok(parsed.rates)
    }

    /// Fetch the global currency index
    pub async fn currency_index(&self) -> Result<IndexTable, RatesServiceError> {
        let url = format!("{}/currencies/index", self.base_url);

        let response = self.client.get(&url).send().await?;
        let status = response.status();
        if status == StatusCode::NOT_FOUND {
            return Ok(IndexTable::new());
        }
        if !status.is_success() {
            return Err(RatesServiceError::Status(status));
        }

        let body = response.text().await?;
        let parsed: IndexResponse = serde_json::from_str(&body)?;
        Ok(parsed.currencies)
    }

    /// Run a fetch future from a synchronous context.
    ///
    /// Inside a tokio runtime the current handle is reused via
    /// `block_in_place`; otherwise a throwaway runtime is created.
    fn block_on<F, T>(&self, future: F) -> Result<T>
    where
        F: Future<Output = Result<T, RatesServiceError>>,
    {
        match tokio::runtime::Handle::try_current() {
            Ok(handle) => {
                Ok(tokio::task::block_in_place(|| handle.block_on(future))?)
            }
            Err(_) => {
                let rt = tokio::runtime::Runtime::new()?;
                Ok(rt.block_on(future)?)
            }
        }
    }
}

impl RateSource for RatesClient {
    fn fetch_rates(&self, source_currency: &str) -> Result<RateTable> {
        // One normalized key for both the cache and the request URL
        let source_currency = source_currency.to_uppercase();

        if let Some(cache) = &self.cache {
            if let Some(cached) = cache.get_rates(&source_currency)? {
                tracing::debug!("rate cache hit for {}", source_currency);
                return Ok(cached);
            }
        }

        let table = self.block_on(self.rates(&source_currency))?;

        if let Some(cache) = &self.cache {
            if !table.is_empty() {
                cache.put_rates(&source_currency, &table)?;
            }
        }

        Ok(table)
    }

    fn fetch_currency_index(&self) -> Result<IndexTable> {
        if let Some(cache) = &self.cache {
            if let Some(cached) = cache.get_index()? {
                tracing::debug!("currency index cache hit");
                return Ok(cached);
            }
        }

        let table = self.block_on(self.currency_index())?;

        if let Some(cache) = &self.cache {
            if !table.is_empty() {
                cache.put_index(&table)?;
            }
        }

        Ok(table)
    }
}
