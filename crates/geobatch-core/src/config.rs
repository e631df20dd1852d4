use std::path::PathBuf;

/// Default path of the persistent lookup cache.
pub const DEFAULT_CACHE_FILE: &str = "geocache.db";

/// Default request rate; the hard provider ceiling is 50.
pub const DEFAULT_QUERIES_PER_SECOND: f64 = 35.0;

/// Recognized geocoder options.
///
/// Exactly one authentication mode must be set: either `client_id` plus
/// `private_key`, or `api_key`. Validation happens once at client
/// construction (see [`crate::Credentials::from_config`]) and the resolved
/// mode is immutable thereafter.
#[derive(Debug, Clone)]
pub struct GeocoderConfig {
    pub client_id: Option<String>,
    pub private_key: Option<String>,
    pub api_key: Option<String>,
    /// Passed verbatim to the cache constructor.
    pub cache_file: PathBuf,
    /// Valid inclusive range is [1, 50]; fractional rates are accepted.
    pub queries_per_second: f64,
    /// Extra attempts after a quota rejection; total calls = `max_retries + 1`.
    pub max_retries: u32,
}

impl Default for GeocoderConfig {
    fn default() -> Self {
        Self {
            client_id: None,
            private_key: None,
            api_key: None,
            cache_file: PathBuf::from(DEFAULT_CACHE_FILE),
            queries_per_second: DEFAULT_QUERIES_PER_SECOND,
            max_retries: 0,
        }
    }
}

impl GeocoderConfig {
    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(api_key.into());
        self
    }

    pub fn with_credentials(
        mut self,
        client_id: impl Into<String>,
        private_key: impl Into<String>,
    ) -> Self {
        self.client_id = Some(client_id.into());
        self.private_key = Some(private_key.into());
        self
    }

    pub fn with_cache_file(mut self, cache_file: impl Into<PathBuf>) -> Self {
        self.cache_file = cache_file.into();
        self
    }

    pub fn with_queries_per_second(mut self, queries_per_second: f64) -> Self {
        self.queries_per_second = queries_per_second;
        self
    }

    pub fn with_max_retries(mut self, max_retries: u32) -> Self {
        self.max_retries = max_retries;
        self
    }
}
