use async_trait::async_trait;
use std::sync::Arc;

use crate::api::MockApi;
use crate::auth::{AuthError, LoginRequest};
use crate::models::User;
use crate::storage::CredentialStore;

/// A source of user records that can be searched at login
#[async_trait]
pub trait UserDirectory: Send + Sync {
    async fn users(&self) -> Result<Vec<User>, AuthError>;
}

/// Users from the mock `users` collection
pub struct FixtureUsers {
    api: Arc<MockApi>,
}

impl FixtureUsers {
    pub fn new(api: Arc<MockApi>) -> Self {
        Self { api }
    }
}

#[async_trait]
impl UserDirectory for FixtureUsers {
    async fn users(&self) -> Result<Vec<User>, AuthError> {
        Ok(self.api.users().await?)
    }
}

/// Registered trainers and generated students from local storage
pub struct StoredUsers {
    credentials: Arc<CredentialStore>,
}

impl StoredUsers {
    pub fn new(credentials: Arc<CredentialStore>) -> Self {
        Self { credentials }
    }
}

#[async_trait]
impl UserDirectory for StoredUsers {
    async fn users(&self) -> Result<Vec<User>, AuthError> {
        Ok(self.credentials.all_users()?)
    }
}

/// Directories searched in order; the first exact match wins
pub struct MergedDirectory {
    sources: Vec<Arc<dyn UserDirectory>>,
}

impl MergedDirectory {
    pub fn new(sources: Vec<Arc<dyn UserDirectory>>) -> Self {
        Self { sources }
    }

    pub async fn find(&self, request: &LoginRequest) -> Result<Option<User>, AuthError> {
        for source in &self.sources {
            let found = source
                .users()
                .await?
                .into_iter()
                .find(|u| u.email == request.email && u.password == request.password);

            if found.is_some() {
                return Ok(found);
            }
        }
        Ok(None)
    }
}
