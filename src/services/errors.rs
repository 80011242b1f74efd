use thiserror::Error;

use crate::api::FetchError;

#[derive(Error, Debug)]
pub enum AppDataError {
    #[error("Failed to refresh data: {0}")]
    Fetch(#[from] FetchError),
    #[error("No user is signed in")]
    NotSignedIn,
    #[error("Storage error: {0}")]
    Storage(#[from] anyhow::Error),
}
