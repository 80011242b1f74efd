use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Account roles
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum UserRole {
    #[serde(alias = "personal")]
    Trainer,
    #[serde(alias = "aluno")]
    Student,
}

impl UserRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            UserRole::Trainer => "trainer",
            UserRole::Student => "student",
        }
    }
}

impl std::fmt::Display for UserRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Identity record. Mock authentication matches on email + password.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct User {
    pub id: String,
    #[serde(rename = "type")]
    pub role: UserRole,
    pub name: String,
    pub email: String,
    pub password: String,
    #[serde(default)]
    pub photo: String,
    #[serde(rename = "createdAt")]
    pub created_at: DateTime<Utc>,
}

impl User {
    pub fn is_trainer(&self) -> bool {
        self.role == UserRole::Trainer
    }
}

/// User payload before an id and creation timestamp are assigned
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewUser {
    #[serde(rename = "type")]
    pub role: UserRole,
    pub name: String,
    pub email: String,
    pub password: String,
    #[serde(default)]
    pub photo: String,
}
