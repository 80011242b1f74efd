use thiserror::Error;

use crate::api::FetchError;

#[derive(Error, Debug)]
pub enum AuthError {
    #[error("Invalid credentials")]
    InvalidCredentials,
    #[error("Not logged in")]
    NotAuthenticated,
    #[error("Validation failed: {0}")]
    Validation(String),
    #[error("Failed to load users: {0}")]
    Fetch(#[from] FetchError),
    #[error("Internal error: {0}")]
    Internal(#[from] anyhow::Error),
}
