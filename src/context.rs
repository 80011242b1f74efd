use anyhow::Result;
use std::sync::Arc;

use crate::api::{CollectionSource, DirectorySource, HttpSource, MockApi};
use crate::auth::AuthService;
use crate::config::{Config, SourceKind, StorageBackend};
use crate::models::User;
use crate::services::{AppData, ReminderPolicy};
use crate::storage::{CredentialStore, KeyValueStore, MemoryStore, SessionStore, SledStore};

/// Everything a consumer needs, wired once at application start
pub struct AppContext {
    pub config: Config,
    pub api: Arc<MockApi>,
    pub store: Arc<dyn KeyValueStore>,
    pub credentials: Arc<CredentialStore>,
    pub auth: Arc<AuthService>,
    pub data: Arc<AppData>,
}

impl AppContext {
    /// Build the data source and local store named by the configuration
    pub fn from_config(config: Config) -> Result<Self> {
        let source: Arc<dyn CollectionSource> = match config.data.source {
            SourceKind::Directory => Arc::new(DirectorySource::new(config.data.dir.clone())),
            SourceKind::Http => Arc::new(HttpSource::new(
                config.data.base_url.clone(),
                config.data.timeout(),
            )?),
        };

        let store: Arc<dyn KeyValueStore> = match config.storage.backend {
            StorageBackend::Memory => Arc::new(MemoryStore::new()),
            StorageBackend::Sled => {
                let path = match config.storage.path.clone() {
                    Some(path) => path,
                    None => SledStore::default_path()?,
                };
                Arc::new(SledStore::open(&path)?)
            }
        };

        Ok(Self::assemble(config, source, store))
    }

    pub fn assemble(
        config: Config,
        source: Arc<dyn CollectionSource>,
        store: Arc<dyn KeyValueStore>,
    ) -> Self {
        let api = Arc::new(MockApi::new(source));
        let credentials = Arc::new(CredentialStore::new(store.clone()));
        let auth = Arc::new(AuthService::new(
            api.clone(),
            credentials.clone(),
            SessionStore::new(store.clone()),
        ));
        let data = Arc::new(AppData::new(
            api.clone(),
            auth.clone(),
            credentials.clone(),
            ReminderPolicy::new(config.reminders.threshold_days),
        ));

        Self {
            config,
            api,
            store,
            credentials,
            auth,
            data,
        }
    }

    /// Restore the saved session and load its data
    pub async fn start(&self) -> Result<Option<User>> {
        let user = self.auth.restore()?;
        if user.is_some() {
            self.data.refresh().await?;
        }
        Ok(user)
    }

    pub fn shutdown(&self) -> Result<()> {
        self.store.flush()
    }
}
