use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use super::{KeyValueStore, REGISTERED_TRAINERS_KEY, STUDENT_ACCOUNTS_KEY};
use crate::models::{User, UserRole};
use crate::services::reminders::parse_entry_date;

/// Locally persisted account. Older records may lack id, photo or creation date,
/// and their creation date may be in any format.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct StoredAccount {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(rename = "type")]
    pub role: UserRole,
    pub name: String,
    pub email: String,
    pub password: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub photo: Option<String>,
    #[serde(rename = "createdAt", default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
}

impl StoredAccount {
    /// Fill in the fields older records may lack
    pub fn into_user(self, now: DateTime<Utc>) -> User {
        let id = self
            .id
            .unwrap_or_else(|| format!("{}-{}", self.role, now.timestamp_millis()));
        let photo = self.photo.unwrap_or_else(|| {
            let seed = if id.is_empty() { &self.email } else { &id };
            format!("https://i.pravatar.cc/150?u={}", seed)
        });

        User {
            id,
            role: self.role,
            name: self.name,
            email: self.email,
            password: self.password,
            photo,
            created_at: self
                .created_at
                .as_deref()
                .and_then(parse_entry_date)
                .unwrap_or(now),
        }
    }
}

/// Trainer registrations and generated student accounts
pub struct CredentialStore {
    store: Arc<dyn KeyValueStore>,
}

impl CredentialStore {
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self { store }
    }

    fn decode_list(key: &str, raw: &str) -> Result<Vec<StoredAccount>> {
        serde_json::from_str(raw).with_context(|| format!("unreadable account list {}", key))
    }

    /// A corrupt list is logged and read as empty
    fn read_list(&self, key: &str) -> Result<Vec<StoredAccount>> {
        let Some(raw) = self.store.get(key)? else {
            return Ok(Vec::new());
        };

        match Self::decode_list(key, &raw) {
            Ok(accounts) => Ok(accounts),
            Err(e) => {
                tracing::warn!("Ignoring {:#}", e);
                Ok(Vec::new())
            }
        }
    }

    /// Fails on a corrupt list rather than overwriting it
    fn append(&self, key: &str, account: StoredAccount) -> Result<()> {
        let mut accounts = match self.store.get(key)? {
            Some(raw) => Self::decode_list(key, &raw)?,
            None => Vec::new(),
        };
        accounts.push(account);

        let raw = serde_json::to_string(&accounts).context("Failed to serialize accounts")?;
        self.store.set(key, &raw)
    }

    pub fn registered_trainers(&self) -> Result<Vec<StoredAccount>> {
        self.read_list(REGISTERED_TRAINERS_KEY)
    }

    pub fn add_registered_trainer(&self, account: StoredAccount) -> Result<()> {
        tracing::debug!("Persisting trainer registration for {}", account.email);
        self.append(REGISTERED_TRAINERS_KEY, account)
    }

    pub fn student_accounts(&self) -> Result<Vec<StoredAccount>> {
        self.read_list(STUDENT_ACCOUNTS_KEY)
    }

    pub fn add_student_account(&self, account: StoredAccount) -> Result<()> {
        tracing::debug!("Persisting student account for {}", account.email);
        self.append(STUDENT_ACCOUNTS_KEY, account)
    }

    /// Registered trainers followed by student accounts, normalized into users
    pub fn all_users(&self) -> Result<Vec<User>> {
        let now = Utc::now();
        let users = self
            .registered_trainers()?
            .into_iter()
            .chain(self.student_accounts()?)
            .map(|account| account.into_user(now))
            .collect();
        Ok(users)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStore;

    fn account(email: &str) -> StoredAccount {
        StoredAccount {
            id: None,
            role: UserRole::Student,
            name: "Ana".to_string(),
            email: email.to_string(),
            password: "pw".to_string(),
            phone: None,
            photo: None,
            created_at: None,
        }
    }

    #[test]
    fn test_accounts_append_in_order() -> Result<()> {
        let credentials = CredentialStore::new(Arc::new(MemoryStore::new()));
        credentials.add_student_account(account("a@app.com"))?;
        credentials.add_student_account(account("b@app.com"))?;

        let emails: Vec<String> = credentials
            .student_accounts()?
            .into_iter()
            .map(|a| a.email)
            .collect();
        assert_eq!(emails, vec!["a@app.com", "b@app.com"]);
        assert!(credentials.registered_trainers()?.is_empty());
        Ok(())
    }

    #[test]
    fn test_corrupt_list_reads_as_empty() -> Result<()> {
        let store = Arc::new(MemoryStore::new());
        store.set(STUDENT_ACCOUNTS_KEY, "not json")?;

        let credentials = CredentialStore::new(store);
        assert!(credentials.student_accounts()?.is_empty());
        Ok(())
    }

    #[test]
    fn test_append_keeps_corrupt_list_intact() -> Result<()> {
        let store = Arc::new(MemoryStore::new());
        store.set(STUDENT_ACCOUNTS_KEY, "not json")?;

        let credentials = CredentialStore::new(store.clone());
        assert!(credentials.add_student_account(account("new@app.com")).is_err());
        assert_eq!(store.get(STUDENT_ACCOUNTS_KEY)?.as_deref(), Some("not json"));
        Ok(())
    }

    #[test]
    fn test_append_keeps_accounts_with_bare_creation_dates() -> Result<()> {
        let store = Arc::new(MemoryStore::new());
        store.set(
            STUDENT_ACCOUNTS_KEY,
            r#"[{"type":"student","name":"Old","email":"old@app.com","password":"pw","createdAt":"2024-01-01"}]"#,
        )?;

        let credentials = CredentialStore::new(store);
        credentials.add_student_account(account("new@app.com"))?;

        let users = credentials.all_users()?;
        let emails: Vec<&str> = users.iter().map(|u| u.email.as_str()).collect();
        assert_eq!(emails, vec!["old@app.com", "new@app.com"]);
        assert_eq!(users[0].created_at.format("%Y-%m-%d").to_string(), "2024-01-01");
        Ok(())
    }

    #[test]
    fn test_into_user_fills_defaults() {
        let now = Utc::now();
        let user = account("a@app.com").into_user(now);

        assert_eq!(user.id, format!("student-{}", now.timestamp_millis()));
        assert_eq!(user.photo, format!("https://i.pravatar.cc/150?u={}", user.id));
        assert_eq!(user.created_at, now);
    }
}
