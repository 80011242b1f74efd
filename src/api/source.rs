use async_trait::async_trait;
use reqwest::Client;
use serde_json::Value;
use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use super::{Collection, FetchError};

/// Backing store for the static mock collections
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CollectionSource: Send + Sync {
    /// Load the whole collection as raw JSON
    async fn load(&self, collection: Collection) -> Result<Value, FetchError>;
}

/// In-memory fixture dataset. Every collection starts out as an empty array.
pub struct FixtureSource {
    collections: HashMap<Collection, Value>,
    loads: AtomicUsize,
}

impl Default for FixtureSource {
    fn default() -> Self {
        let collections = Collection::ALL
            .iter()
            .map(|c| (*c, Value::Array(Vec::new())))
            .collect();

        Self {
            collections,
            loads: AtomicUsize::new(0),
        }
    }
}

impl FixtureSource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace one collection
    pub fn with(mut self, collection: Collection, value: Value) -> Self {
        self.collections.insert(collection, value);
        self
    }

    /// Drop one collection so loading it fails
    pub fn without(mut self, collection: Collection) -> Self {
        self.collections.remove(&collection);
        self
    }

    /// Number of loads served so far
    pub fn load_count(&self) -> usize {
        self.loads.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl CollectionSource for FixtureSource {
    async fn load(&self, collection: Collection) -> Result<Value, FetchError> {
        self.loads.fetch_add(1, Ordering::SeqCst);
        self.collections
            .get(&collection)
            .cloned()
            .ok_or_else(|| FetchError::NotFound(collection.resource_name().to_string()))
    }
}

/// Reads `<dir>/<resource>.json` files
pub struct DirectorySource {
    root: PathBuf,
}

impl DirectorySource {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    fn path_for(&self, collection: Collection) -> PathBuf {
        self.root.join(format!("{}.json", collection.resource_name()))
    }
}

#[async_trait]
impl CollectionSource for DirectorySource {
    async fn load(&self, collection: Collection) -> Result<Value, FetchError> {
        let resource = collection.resource_name();
        let path = self.path_for(collection);

        tracing::debug!("Reading {:?}", path);

        let bytes = match tokio::fs::read(&path).await {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Err(FetchError::NotFound(resource.to_string()));
            }
            Err(e) => {
                return Err(FetchError::Io {
                    resource: resource.to_string(),
                    message: e.to_string(),
                });
            }
        };

        serde_json::from_slice(&bytes).map_err(|e| FetchError::decode(resource, e))
    }
}

/// Fetches `<base_url>/<resource>.json` as static resources
pub struct HttpSource {
    client: Client,
    base_url: String,
}

impl HttpSource {
    pub fn new(base_url: impl Into<String>, timeout: Option<Duration>) -> anyhow::Result<Self> {
        let mut builder = Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder
            .build()
            .map_err(|e| anyhow::anyhow!("Failed to create HTTP client: {}", e))?;

        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    fn url_for(&self, collection: Collection) -> String {
        format!("{}/{}.json", self.base_url, collection.resource_name())
    }
}

#[async_trait]
impl CollectionSource for HttpSource {
    async fn load(&self, collection: Collection) -> Result<Value, FetchError> {
        let resource = collection.resource_name();
        let url = self.url_for(collection);

        tracing::debug!("GET {}", url);

        let network = |e: reqwest::Error| FetchError::Network {
            resource: resource.to_string(),
            message: e.to_string(),
        };

        let response = self.client.get(&url).send().await.map_err(network)?;
        let status = response.status();

        if status.is_success() {
            response
                .json::<Value>()
                .await
                .map_err(|e| FetchError::decode(resource, e))
        } else {
            let error_text = response.text().await.unwrap_or_default();
            Err(FetchError::from_status(resource, status, error_text))
        }
    }
}
