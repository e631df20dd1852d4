//! # Geobatch Core
//!
//! Rate-limited, cached batch geocoding over the Google Maps API.
//!
//! ## Overview
//!
//! The crate orchestrates four concerns around a single provider call:
//!
//! - **Credential validation** once at construction (client-id/private-key
//!   pair or API key, never both)
//! - **Throttling** to a configured queries-per-second ceiling
//! - **Persistent caching** of resolved addresses, keyed by the literal
//!   address string
//! - **Bounded quota retry** for `OVER_QUERY_LIMIT` rejections
//!
//! and exposes both a single-address call and a backpressure-aware batch
//! stream.
//!
//! ## Modules
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`batch`] | Address source stream and resolve-stream transform |
//! | [`cache`] | Cache capability trait, file-backed and in-memory caches |
//! | [`classify`] | Provider reply to typed outcome mapping |
//! | [`config`] | Recognized options and defaults |
//! | [`credentials`] | Authentication mode resolution |
//! | [`error`] | Configuration, geocoding, and cache error taxonomies |
//! | [`geocoder`] | Request orchestration and the `GeoBatch` facade |
//! | [`google`] | Default reqwest-backed Google Maps adapter |
//! | [`provider`] | Provider transport contract and envelopes |
//! | [`retry`] | Quota-retry policy |
//! | [`throttle`] | Async QPS admission gate |
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use futures::StreamExt;
//! use geobatch_core::{GeoBatch, GeocoderConfig};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let batch = GeoBatch::new(GeocoderConfig::default().with_api_key("..."))?;
//!
//!     let mut records = std::pin::pin!(batch.geocode_addresses(["Hamburg", "Berlin"]));
//!     while let Some(record) = records.next().await {
//!         println!("{:?}", record?);
//!     }
//!
//!     Ok(())
//! }
//! ```
//!
//! ## Error Handling
//!
//! Construction failures ([`ConfigError`]) are synchronous; the client is
//! never created. Per-address failures ([`GeocodeError`]) are asynchronous,
//! scoped to that address, and carry stable human-readable messages.

pub mod batch;
pub mod cache;
pub mod classify;
pub mod config;
pub mod credentials;
pub mod error;
pub mod geocoder;
pub mod google;
pub mod provider;
pub mod retry;
pub mod throttle;

pub use batch::{address_stream, geocode_stream, AddressError, GeocodedRecord, MAX_IN_FLIGHT};
pub use cache::{FileCache, GeocodeCache, MemoryCache};
pub use classify::{classify, GeocodeOutcome};
pub use config::{GeocoderConfig, DEFAULT_CACHE_FILE, DEFAULT_QUERIES_PER_SECOND};
pub use credentials::Credentials;
pub use error::{CacheError, ConfigError, GeocodeError};
pub use geocoder::{GeoBatch, Geocoder};
pub use google::{GoogleMapsProvider, GEOCODE_ENDPOINT};
pub use provider::{
    GeocodeProvider, GeocodeRequest, NoopProvider, ProviderError, ProviderResponse, ProviderStatus,
};
pub use retry::{RetryDecision, RetryPolicy};
pub use throttle::{Throttle, MAX_QUERIES_PER_SECOND, MIN_QUERIES_PER_SECOND};
