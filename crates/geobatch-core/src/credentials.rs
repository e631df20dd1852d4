use crate::config::GeocoderConfig;
use crate::error::ConfigError;

/// Resolved authentication mode for provider requests.
///
/// Exactly one mode exists after construction; the ad-hoc option fields on
/// [`GeocoderConfig`] are checked once and never re-inspected downstream.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Credentials {
    ClientKeyPair {
        client_id: String,
        private_key: String,
    },
    ApiKey(String),
}

impl Credentials {
    /// Determines the authentication mode from a configuration object.
    ///
    /// # Errors
    ///
    /// - no auth field set: "Must either provide credentials or API key"
    /// - `client_id` without `private_key`: "Missing privateKey"
    /// - `private_key` without `client_id`: "Missing clientId"
    /// - `api_key` combined with either: "Can only specify credentials or API key"
    pub fn from_config(config: &GeocoderConfig) -> Result<Self, ConfigError> {
        match (&config.client_id, &config.private_key, &config.api_key) {
            (None, None, None) => Err(ConfigError::MissingAuth),
            (Some(_), _, Some(_)) | (_, Some(_), Some(_)) => Err(ConfigError::AmbiguousAuth),
            (Some(_), None, None) => Err(ConfigError::MissingPrivateKey),
            (None, Some(_), None) => Err(ConfigError::MissingClientId),
            (Some(client_id), Some(private_key), None) => Ok(Self::ClientKeyPair {
                client_id: client_id.clone(),
                private_key: private_key.clone(),
            }),
            (None, None, Some(api_key)) => Ok(Self::ApiKey(api_key.clone())),
        }
    }
}
