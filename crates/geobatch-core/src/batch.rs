//! Lazy batch pipeline turning a collection of addresses into a stream of
//! resolved records.

use std::fmt::{Display, Formatter};
use std::sync::Arc;

use futures::{Stream, StreamExt};
use serde::Serialize;
use serde_json::Value;

use crate::error::GeocodeError;
use crate::geocoder::Geocoder;

/// Cap on in-flight resolutions inside [`geocode_stream`]. The throttle
/// still bounds the admission rate; this only limits buffered futures.
pub const MAX_IN_FLIGHT: usize = 16;

/// One resolved address from the batch pipeline.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GeocodedRecord {
    pub address: String,
    pub location: Value,
}

/// A single address that failed to resolve. Scoped to that item; later
/// addresses in the stream are unaffected.
#[derive(Debug)]
pub struct AddressError {
    pub address: String,
    pub error: GeocodeError,
}

impl Display for AddressError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.address, self.error)
    }
}

impl std::error::Error for AddressError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        Some(&self.error)
    }
}

/// Lazy, single-pass source stream over an address collection, one element
/// per input address in input order.
pub fn address_stream<I>(addresses: I) -> impl Stream<Item = String>
where
    I: IntoIterator,
    I::Item: Into<String>,
{
    futures::stream::iter(addresses.into_iter().map(Into::into))
}

/// Resolves every address from `addresses` through `geocoder`, yielding one
/// item per input address as resolutions complete (output order is not
/// guaranteed to match input order).
///
/// The stream completes when the input completes and all in-flight
/// resolutions finish. Dropping it early drops in-flight calls; results of
/// calls that still race to completion are discarded, and pending throttle
/// waits release their slot.
pub fn geocode_stream<S>(
    geocoder: Arc<Geocoder>,
    addresses: S,
) -> impl Stream<Item = Result<GeocodedRecord, AddressError>>
where
    S: Stream<Item = String>,
{
    addresses
        .map(move |address| {
            let geocoder = Arc::clone(&geocoder);
            async move {
                match geocoder.geocode_address(&address).await {
                    Ok(location) => Ok(GeocodedRecord { address, location }),
                    Err(error) => Err(AddressError { address, error }),
                }
            }
        })
        .buffer_unordered(MAX_IN_FLIGHT)
}
