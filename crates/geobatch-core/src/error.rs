use thiserror::Error;

/// Construction-time configuration errors.
///
/// These are synchronous and fatal to the constructor call; the client is
/// never created when one of them is returned. The message strings are part
/// of the public contract.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Must either provide credentials or API key")]
    MissingAuth,
    #[error("Missing privateKey")]
    MissingPrivateKey,
    #[error("Missing clientId")]
    MissingClientId,
    #[error("Can only specify credentials or API key")]
    AmbiguousAuth,
    #[error("Requests per second must be >= 1 and <= 50")]
    QueriesPerSecondOutOfRange,
    #[error("Could not initialize the HTTP client: {0}")]
    HttpClient(String),
    #[error(transparent)]
    Cache(#[from] CacheError),
}

/// Terminal per-address geocoding errors.
///
/// Each variant carries the stable, human-readable message the caller sees.
/// Quota failures are only surfaced once retries are exhausted.
#[derive(Debug, Error)]
pub enum GeocodeError {
    #[error("Authentication error")]
    Authentication,
    #[error("Could not connect to the Google Maps API")]
    Connection,
    #[error("No results found")]
    NoResults,
    #[error("Over query limit")]
    OverQuotaLimit,
    #[error(transparent)]
    Cache(#[from] CacheError),
    #[error("{0}")]
    Other(String),
}

/// Cache storage failures (opening or persisting the snapshot file).
#[derive(Debug, Error)]
pub enum CacheError {
    #[error("cache io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("cache serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}
