//! Persistent address lookup cache.

use std::collections::BTreeMap;
use std::future::Future;
use std::path::{Path, PathBuf};
use std::pin::Pin;
use std::sync::Arc;

use serde_json::Value;

use crate::error::CacheError;

/// Cache capability consulted and updated by the geocoder.
///
/// The key is the literal, unnormalized address string. Any conforming
/// implementation can be injected at construction; entries are never
/// evicted by the geocoder, and repeated writes of the same address/payload
/// are idempotent.
pub trait GeocodeCache: Send + Sync {
    fn get<'a>(&'a self, key: &'a str) -> Pin<Box<dyn Future<Output = Option<Value>> + Send + 'a>>;

    fn add<'a>(
        &'a self,
        key: &'a str,
        value: Value,
    ) -> Pin<Box<dyn Future<Output = Result<(), CacheError>> + Send + 'a>>;
}

/// Ephemeral in-memory cache.
#[derive(Debug, Default, Clone)]
pub struct MemoryCache {
    inner: Arc<tokio::sync::RwLock<BTreeMap<String, Value>>>,
}

impl MemoryCache {
    pub fn new() -> Self {
        Self::default()
    }
}

impl GeocodeCache for MemoryCache {
    fn get<'a>(&'a self, key: &'a str) -> Pin<Box<dyn Future<Output = Option<Value>> + Send + 'a>> {
        Box::pin(async move {
            let entries = self.inner.read().await;
            entries.get(key).cloned()
        })
    }

    fn add<'a>(
        &'a self,
        key: &'a str,
        value: Value,
    ) -> Pin<Box<dyn Future<Output = Result<(), CacheError>> + Send + 'a>> {
        Box::pin(async move {
            let mut entries = self.inner.write().await;
            entries.insert(key.to_owned(), value);
            Ok(())
        })
    }
}

/// File-backed cache persisting resolved address mappings across restarts.
///
/// The whole map is kept in memory and snapshotted to a JSON object file on
/// every write (temp file + rename, so readers never observe a partial
/// snapshot). Opening creates the file immediately when it does not exist.
#[derive(Debug, Clone)]
pub struct FileCache {
    path: PathBuf,
    inner: Arc<tokio::sync::RwLock<BTreeMap<String, Value>>>,
}

impl FileCache {
    /// Loads the cache at `path`, creating an empty file when absent.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, CacheError> {
        let path = path.into();

        let entries = if path.exists() {
            let raw = std::fs::read_to_string(&path)?;
            if raw.trim().is_empty() {
                BTreeMap::new()
            } else {
                serde_json::from_str(&raw)?
            }
        } else {
            let entries = BTreeMap::new();
            persist_snapshot(&path, &serde_json::to_vec(&entries)?)?;
            entries
        };

        Ok(Self {
            path,
            inner: Arc::new(tokio::sync::RwLock::new(entries)),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub async fn len(&self) -> usize {
        self.inner.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.inner.read().await.is_empty()
    }
}

impl GeocodeCache for FileCache {
    fn get<'a>(&'a self, key: &'a str) -> Pin<Box<dyn Future<Output = Option<Value>> + Send + 'a>> {
        Box::pin(async move {
            let entries = self.inner.read().await;
            entries.get(key).cloned()
        })
    }

    fn add<'a>(
        &'a self,
        key: &'a str,
        value: Value,
    ) -> Pin<Box<dyn Future<Output = Result<(), CacheError>> + Send + 'a>> {
        Box::pin(async move {
            let mut entries = self.inner.write().await;
            entries.insert(key.to_owned(), value);

            // The lock stays held across the write so snapshots land on
            // disk in insertion order.
            let bytes = serde_json::to_vec(&*entries)?;
            let path = self.path.clone();
            tokio::task::spawn_blocking(move || persist_snapshot(&path, &bytes))
                .await
                .map_err(|error| CacheError::Io(std::io::Error::other(error)))?
        })
    }
}

/// Appends `.tmp` to the full file name, so sibling caches that differ only
/// by extension stage to distinct files.
fn staging_path(path: &Path) -> PathBuf {
    let mut staging = path.as_os_str().to_owned();
    staging.push(".tmp");
    PathBuf::from(staging)
}

fn persist_snapshot(path: &Path, bytes: &[u8]) -> Result<(), CacheError> {
    let staging = staging_path(path);
    std::fs::write(&staging, bytes)?;
    std::fs::rename(&staging, path)?;
    Ok(())
}
