use reqwest::StatusCode;
use thiserror::Error;

/// Failures of the mock data layer
#[derive(Error, Debug, Clone, PartialEq)]
pub enum FetchError {
    #[error("Failed to load {resource}: {status} {reason}")]
    Status {
        resource: String,
        status: u16,
        reason: String,
    },

    #[error("Resource not found: {0}")]
    NotFound(String),

    #[error("Failed to read {resource}: {message}")]
    Io { resource: String, message: String },

    #[error("Failed to parse {resource}: {message}")]
    Decode { resource: String, message: String },

    #[error("Network error while loading {resource}: {message}")]
    Network { resource: String, message: String },
}

impl FetchError {
    pub fn from_status(resource: &str, status: StatusCode, message: String) -> Self {
        let reason = if message.is_empty() {
            status.canonical_reason().unwrap_or("Unknown error").to_string()
        } else {
            message
        };

        match status {
            StatusCode::NOT_FOUND => FetchError::NotFound(resource.to_string()),
            _ => FetchError::Status {
                resource: resource.to_string(),
                status: status.as_u16(),
                reason,
            },
        }
    }

    pub fn decode(resource: &str, err: impl std::fmt::Display) -> Self {
        FetchError::Decode {
            resource: resource.to_string(),
            message: err.to_string(),
        }
    }
}
