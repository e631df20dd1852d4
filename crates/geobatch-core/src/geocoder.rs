//! Request orchestration: cache lookup, throttled dispatch, classification,
//! quota retry, cache write.

use std::sync::Arc;

use futures::Stream;
use serde_json::Value;

use crate::batch::{address_stream, geocode_stream, AddressError, GeocodedRecord};
use crate::cache::{FileCache, GeocodeCache};
use crate::classify::classify;
use crate::config::GeocoderConfig;
use crate::credentials::Credentials;
use crate::error::{ConfigError, GeocodeError};
use crate::google::GoogleMapsProvider;
use crate::provider::{GeocodeProvider, GeocodeRequest};
use crate::retry::{RetryDecision, RetryPolicy};
use crate::throttle::Throttle;

/// Geocoding client over an injected provider and cache.
///
/// Credentials and the request rate are validated once at construction and
/// immutable thereafter. Safe to share across tasks behind an [`Arc`]; the
/// throttle and cache serialize their own state internally.
pub struct Geocoder {
    credentials: Credentials,
    provider: Arc<dyn GeocodeProvider>,
    cache: Arc<dyn GeocodeCache>,
    throttle: Throttle,
    retry: RetryPolicy,
}

impl Geocoder {
    pub fn new(
        config: &GeocoderConfig,
        provider: Arc<dyn GeocodeProvider>,
        cache: Arc<dyn GeocodeCache>,
    ) -> Result<Self, ConfigError> {
        let credentials = Credentials::from_config(config)?;
        let throttle = Throttle::new(config.queries_per_second)?;

        Ok(Self {
            credentials,
            provider,
            cache,
            throttle,
            retry: RetryPolicy::new(config.max_retries),
        })
    }

    /// Resolves one address to its location payload (the full provider
    /// results collection, as one JSON array).
    ///
    /// A cache hit for the literal address string short-circuits the
    /// throttle and the provider call. On a miss the call is rate-limited,
    /// classified, and retried on quota rejections up to the configured
    /// budget; a successful resolution is written to the cache exactly once
    /// before it is returned.
    pub async fn geocode_address(&self, address: &str) -> Result<Value, GeocodeError> {
        if let Some(cached) = self.cache.get(address).await {
            return Ok(cached);
        }

        let mut attempt = 1u32;
        loop {
            self.throttle.acquire().await;

            let request = GeocodeRequest::new(address, self.credentials.clone());
            let outcome = classify(self.provider.geocode(request).await);

            match self.retry.decide(outcome, attempt) {
                RetryDecision::Retry => attempt += 1,
                RetryDecision::Resolve(Ok(results)) => {
                    let location = Value::Array(results);
                    self.cache.add(address, location.clone()).await?;
                    return Ok(location);
                }
                RetryDecision::Resolve(Err(error)) => return Err(error),
            }
        }
    }
}

/// Batch geocoding facade.
///
/// [`GeoBatch::new`] wires the production parts (Google Maps over reqwest,
/// file-backed cache at `config.cache_file`); [`GeoBatch::with_parts`]
/// injects any conforming provider/cache pair.
pub struct GeoBatch {
    geocoder: Arc<Geocoder>,
}

impl std::fmt::Debug for GeoBatch {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GeoBatch").finish_non_exhaustive()
    }
}

impl GeoBatch {
    pub fn new(config: GeocoderConfig) -> Result<Self, ConfigError> {
        let cache = FileCache::open(&config.cache_file)?;
        let provider = GoogleMapsProvider::new()
            .map_err(|error| ConfigError::HttpClient(error.to_string()))?;
        Self::with_parts(&config, Arc::new(provider), Arc::new(cache))
    }

    pub fn with_parts(
        config: &GeocoderConfig,
        provider: Arc<dyn GeocodeProvider>,
        cache: Arc<dyn GeocodeCache>,
    ) -> Result<Self, ConfigError> {
        Ok(Self {
            geocoder: Arc::new(Geocoder::new(config, provider, cache)?),
        })
    }

    pub async fn geocode_address(&self, address: &str) -> Result<Value, GeocodeError> {
        self.geocoder.geocode_address(address).await
    }

    /// Lazy source stream over an address collection; see [`address_stream`].
    pub fn create_stream<I>(addresses: I) -> impl Stream<Item = String>
    where
        I: IntoIterator,
        I::Item: Into<String>,
    {
        address_stream(addresses)
    }

    /// Stream transform resolving every address from `addresses`; one item
    /// per input address, failures reported per item.
    pub fn geocode<S>(&self, addresses: S) -> impl Stream<Item = Result<GeocodedRecord, AddressError>>
    where
        S: Stream<Item = String>,
    {
        geocode_stream(Arc::clone(&self.geocoder), addresses)
    }

    /// Convenience form accepting the address collection directly.
    pub fn geocode_addresses<I>(
        &self,
        addresses: I,
    ) -> impl Stream<Item = Result<GeocodedRecord, AddressError>>
    where
        I: IntoIterator,
        I::Item: Into<String>,
    {
        self.geocode(address_stream(addresses))
    }
}
