// Browser-style key/value storage with memory and sled backends

use anyhow::{Context, Result};
use parking_lot::Mutex;
use sled::Db;
use std::collections::HashMap;
use std::path::{Path, PathBuf};

mod credentials;
mod session;

pub use credentials::{CredentialStore, StoredAccount};
pub use session::{Session, SessionStore};

pub const SESSION_KEY: &str = "session";
pub const REGISTERED_TRAINERS_KEY: &str = "registered_users";
pub const STUDENT_ACCOUNTS_KEY: &str = "student_users";

const LOCAL_TREE: &str = "local_storage";

/// String key/value storage shared by the credential and session stores
pub trait KeyValueStore: Send + Sync {
    fn get(&self, key: &str) -> Result<Option<String>>;

    fn set(&self, key: &str, value: &str) -> Result<()>;

    fn remove(&self, key: &str) -> Result<()>;

    /// Persist pending writes
    fn flush(&self) -> Result<()> {
        Ok(())
    }
}

/// Process-lifetime storage
#[derive(Default)]
pub struct MemoryStore {
    entries: Mutex<HashMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.entries.lock().get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        self.entries.lock().insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<()> {
        self.entries.lock().remove(key);
        Ok(())
    }
}

/// Storage persisted in a sled database
pub struct SledStore {
    db: Db,
}

impl SledStore {
    /// Default database directory (~/.trainer-link/store)
    pub fn default_path() -> Result<PathBuf> {
        if let Ok(path) = std::env::var("TRAINER_LINK_STORE_PATH") {
            return Ok(PathBuf::from(path));
        }

        Ok(crate::config::Config::config_dir()?.join("store"))
    }

    pub fn open(path: &Path) -> Result<Self> {
        tracing::info!("Opening sled store at {:?}", path);

        let db = sled::open(path).context("Failed to open sled database")?;
        Ok(Self { db })
    }

    fn tree(&self) -> Result<sled::Tree> {
        self.db
            .open_tree(LOCAL_TREE)
            .context("Failed to open local storage tree")
    }
}

impl KeyValueStore for SledStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        let value = self.tree()?.get(key.as_bytes()).context("Failed to read key")?;

        match value {
            Some(bytes) => {
                let text = String::from_utf8(bytes.to_vec())
                    .with_context(|| format!("Value for {} is not valid UTF-8", key))?;
                Ok(Some(text))
            }
            None => Ok(None),
        }
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        self.tree()?
            .insert(key.as_bytes(), value.as_bytes())
            .context("Failed to write key")?;
        self.flush()?;

        tracing::debug!("Stored {}", key);
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<()> {
        self.tree()?
            .remove(key.as_bytes())
            .context("Failed to remove key")?;
        self.flush()?;

        tracing::debug!("Removed {}", key);
        Ok(())
    }

    fn flush(&self) -> Result<()> {
        self.db.flush().context("Failed to flush database")?;
        Ok(())
    }
}
