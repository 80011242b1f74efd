use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use super::{KeyValueStore, SESSION_KEY};
use crate::models::User;

/// Signed-in user and its mock token
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Session {
    pub user: User,
    pub token: String,
}

/// Persisted session record
pub struct SessionStore {
    store: Arc<dyn KeyValueStore>,
}

impl SessionStore {
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self { store }
    }

    /// Saved session, if any. An unreadable record is logged and ignored.
    pub fn load(&self) -> Result<Option<Session>> {
        let Some(raw) = self.store.get(SESSION_KEY)? else {
            return Ok(None);
        };

        match serde_json::from_str(&raw) {
            Ok(session) => Ok(Some(session)),
            Err(e) => {
                tracing::error!("Failed to restore session: {}", e);
                Ok(None)
            }
        }
    }

    pub fn save(&self, session: &Session) -> Result<()> {
        let raw = serde_json::to_string(session).context("Failed to serialize session")?;
        self.store.set(SESSION_KEY, &raw)
    }

    pub fn clear(&self) -> Result<()> {
        self.store.remove(SESSION_KEY)
    }
}
