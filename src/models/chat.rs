use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ChatMessage {
    pub id: String,
    pub from: String,
    pub to: String,
    pub message: String,
    pub date: DateTime<Utc>,
}

/// Outgoing message before an id and timestamp are assigned
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewMessage {
    pub from: String,
    pub to: String,
    pub message: String,
}
