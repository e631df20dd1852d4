use serde_json::Value;

use crate::provider::{ProviderError, ProviderResponse, ProviderStatus};

/// Typed outcome of a single provider call.
#[derive(Debug, Clone, PartialEq)]
pub enum GeocodeOutcome {
    /// Carries the full results collection.
    Success(Vec<Value>),
    AuthenticationFailure,
    ConnectionFailure,
    NoResults,
    OverQuotaFailure,
    OtherError(String),
}

/// Maps a raw provider reply into a typed outcome. Pure; no side effects.
pub fn classify(reply: Result<ProviderResponse, ProviderError>) -> GeocodeOutcome {
    match reply {
        Err(ProviderError::ConnectionRefused) => GeocodeOutcome::ConnectionFailure,
        Err(ProviderError::Status(403)) => GeocodeOutcome::AuthenticationFailure,
        Err(ProviderError::Status(code)) => {
            GeocodeOutcome::OtherError(format!("provider returned status {code}"))
        }
        Err(ProviderError::Transport(message)) => GeocodeOutcome::OtherError(message),
        Ok(response) => {
            if response.status == ProviderStatus::OverQueryLimit {
                return GeocodeOutcome::OverQuotaFailure;
            }
            if let Some(message) = response.error_message {
                return GeocodeOutcome::OtherError(message);
            }
            if response.results.is_empty() {
                return GeocodeOutcome::NoResults;
            }
            GeocodeOutcome::Success(response.results)
        }
    }
}
