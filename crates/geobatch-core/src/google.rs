//! Default provider adapter for the Google Maps geocoding API.

use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

use crate::credentials::Credentials;
use crate::provider::{GeocodeProvider, GeocodeRequest, ProviderError, ProviderResponse};

pub const GEOCODE_ENDPOINT: &str = "https://maps.googleapis.com/maps/api/geocode/json";

/// Production provider using reqwest for real API calls.
#[derive(Debug, Clone)]
pub struct GoogleMapsProvider {
    client: Arc<reqwest::Client>,
    endpoint: String,
}

impl GoogleMapsProvider {
    pub fn new() -> Result<Self, ProviderError> {
        let client = reqwest::Client::builder()
            .user_agent(concat!("geobatch/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|error| ProviderError::Transport(error.to_string()))?;

        Ok(Self::with_client(client))
    }

    pub fn with_client(client: reqwest::Client) -> Self {
        Self {
            client: Arc::new(client),
            endpoint: String::from(GEOCODE_ENDPOINT),
        }
    }

    /// Point the adapter at a different endpoint (local test servers).
    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }

    fn request_url(&self, request: &GeocodeRequest) -> String {
        let address = urlencoding::encode(&request.address);
        match &request.credentials {
            Credentials::ApiKey(api_key) => format!(
                "{}?address={address}&key={}",
                self.endpoint,
                urlencoding::encode(api_key)
            ),
            Credentials::ClientKeyPair { client_id, .. } => format!(
                "{}?address={address}&client={}",
                self.endpoint,
                urlencoding::encode(client_id)
            ),
        }
    }
}

impl GeocodeProvider for GoogleMapsProvider {
    fn geocode<'a>(
        &'a self,
        request: GeocodeRequest,
    ) -> Pin<Box<dyn Future<Output = Result<ProviderResponse, ProviderError>> + Send + 'a>> {
        Box::pin(async move {
            let url = self.request_url(&request);

            let response = self.client.get(&url).send().await.map_err(|error| {
                if error.is_connect() {
                    ProviderError::ConnectionRefused
                } else {
                    ProviderError::Transport(error.to_string())
                }
            })?;

            let status = response.status().as_u16();
            if !(200..300).contains(&status) {
                return Err(ProviderError::Status(status));
            }

            let body = response.text().await.map_err(|error| {
                ProviderError::Transport(format!("failed to read response body: {error}"))
            })?;

            serde_json::from_str(&body).map_err(|error| {
                ProviderError::Transport(format!("failed to parse geocode response: {error}"))
            })
        })
    }
}
