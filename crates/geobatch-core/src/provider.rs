use std::fmt::{Display, Formatter};
use std::future::Future;
use std::pin::Pin;

use serde::Deserialize;
use serde_json::{json, Value};

use crate::credentials::Credentials;

/// Request envelope handed to a geocoding provider.
///
/// Carries the literal address string plus the resolved auth mode, so
/// provider implementations never re-inspect raw configuration fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeocodeRequest {
    pub address: String,
    pub credentials: Credentials,
}

impl GeocodeRequest {
    pub fn new(address: impl Into<String>, credentials: Credentials) -> Self {
        Self {
            address: address.into(),
            credentials,
        }
    }
}

/// Provider status codes relevant to outcome classification.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub enum ProviderStatus {
    #[serde(rename = "OK")]
    Ok,
    #[serde(rename = "ZERO_RESULTS")]
    ZeroResults,
    #[serde(rename = "OVER_QUERY_LIMIT")]
    OverQueryLimit,
    #[serde(untagged)]
    Other(String),
}

/// Raw provider response body.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ProviderResponse {
    pub status: ProviderStatus,
    #[serde(default)]
    pub results: Vec<Value>,
    #[serde(default)]
    pub error_message: Option<String>,
}

impl ProviderResponse {
    pub fn ok(results: Vec<Value>) -> Self {
        Self {
            status: ProviderStatus::Ok,
            results,
            error_message: None,
        }
    }

    pub fn with_status(status: ProviderStatus) -> Self {
        Self {
            status,
            results: Vec::new(),
            error_message: None,
        }
    }
}

/// Transport-level provider error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProviderError {
    /// Provider rejected the request with an HTTP status code.
    Status(u16),
    /// Connection-refused signal (ECONNREFUSED or equivalent).
    ConnectionRefused,
    /// Any other transport failure, message kept verbatim.
    Transport(String),
}

impl Display for ProviderError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Status(code) => write!(f, "provider returned status {code}"),
            Self::ConnectionRefused => f.write_str("connection refused"),
            Self::Transport(message) => f.write_str(message),
        }
    }
}

impl std::error::Error for ProviderError {}

/// Provider transport contract.
///
/// The single capability: given a request, asynchronously produce a raw
/// provider response or a raw transport error. Implementations must be
/// `Send + Sync` as they are shared across concurrent resolutions.
pub trait GeocodeProvider: Send + Sync {
    fn geocode<'a>(
        &'a self,
        request: GeocodeRequest,
    ) -> Pin<Box<dyn Future<Output = Result<ProviderResponse, ProviderError>> + Send + 'a>>;
}

/// Default no-op provider for deterministic offline runs: echoes the
/// submitted address back as a single canned result.
#[derive(Debug, Default)]
pub struct NoopProvider;

impl GeocodeProvider for NoopProvider {
    fn geocode<'a>(
        &'a self,
        request: GeocodeRequest,
    ) -> Pin<Box<dyn Future<Output = Result<ProviderResponse, ProviderError>> + Send + 'a>> {
        Box::pin(async move {
            Ok(ProviderResponse::ok(vec![json!({
                "formatted_address": request.address,
            })]))
        })
    }
}
