//! CLI argument definitions for geobatch.
//!
//! # Options
//!
//! | Option | Default | Description |
//! |--------|---------|-------------|
//! | `--api-key` | (none) | Google Maps API key |
//! | `--client-id` | (none) | Premium-plan client id (with `--private-key`) |
//! | `--private-key` | (none) | Premium-plan private key (with `--client-id`) |
//! | `--cache-file` | `geocache.db` | Persistent lookup cache path |
//! | `--queries-per-second` | `35` | Request rate ceiling (1–50) |
//! | `--max-retries` | `0` | Extra attempts after a quota rejection |
//!
//! Addresses are taken from positional arguments, or read one per line from
//! stdin when none are given.
//!
//! # Examples
//!
//! ```bash
//! geobatch --api-key $KEY "Hamburg" "Berlin"
//!
//! cat addresses.txt | geobatch --api-key $KEY --max-retries 3
//! ```

use std::path::PathBuf;

use clap::Parser;
use geobatch_core::{GeocoderConfig, DEFAULT_CACHE_FILE, DEFAULT_QUERIES_PER_SECOND};

/// Batch-geocode addresses with caching, throttling, and quota retry.
#[derive(Debug, Parser)]
#[command(
    name = "geobatch",
    version,
    about = "Batch-geocode addresses through the Google Maps API"
)]
pub struct Cli {
    /// Addresses to geocode; read from stdin (one per line) when omitted.
    pub addresses: Vec<String>,

    /// Google Maps API key. Mutually exclusive with --client-id/--private-key.
    #[arg(long)]
    pub api_key: Option<String>,

    /// Premium-plan client id; requires --private-key.
    #[arg(long)]
    pub client_id: Option<String>,

    /// Premium-plan private key; requires --client-id.
    #[arg(long)]
    pub private_key: Option<String>,

    /// Persistent cache file for resolved addresses.
    #[arg(long, default_value = DEFAULT_CACHE_FILE)]
    pub cache_file: PathBuf,

    /// Request rate ceiling; must be >= 1 and <= 50.
    #[arg(long, default_value_t = DEFAULT_QUERIES_PER_SECOND)]
    pub queries_per_second: f64,

    /// Extra attempts after a provider quota rejection.
    #[arg(long, default_value_t = 0)]
    pub max_retries: u32,
}

impl Cli {
    /// Auth combinations are validated by the core at construction, not by
    /// clap, so the contract messages stay authoritative.
    pub fn to_config(&self) -> GeocoderConfig {
        GeocoderConfig {
            client_id: self.client_id.clone(),
            private_key: self.private_key.clone(),
            api_key: self.api_key.clone(),
            cache_file: self.cache_file.clone(),
            queries_per_second: self.queries_per_second,
            max_retries: self.max_retries,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_mirror_the_core_config() {
        let cli = Cli::parse_from(["geobatch", "Hamburg"]);
        let config = cli.to_config();

        assert_eq!(config.cache_file, PathBuf::from("geocache.db"));
        assert_eq!(config.queries_per_second, 35.0);
        assert_eq!(config.max_retries, 0);
    }

    #[test]
    fn flags_are_passed_through_verbatim() {
        let cli = Cli::parse_from([
            "geobatch",
            "--api-key",
            "key",
            "--cache-file",
            "my.db",
            "--queries-per-second",
            "10",
            "--max-retries",
            "2",
            "Hamburg",
            "Berlin",
        ]);

        let config = cli.to_config();
        assert_eq!(config.api_key.as_deref(), Some("key"));
        assert_eq!(config.cache_file, PathBuf::from("my.db"));
        assert_eq!(config.queries_per_second, 10.0);
        assert_eq!(config.max_retries, 2);
        assert_eq!(cli.addresses, vec!["Hamburg", "Berlin"]);
    }
}
