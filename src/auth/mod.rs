pub mod directory;
pub mod errors;
pub mod models;
pub mod service;

pub use directory::{FixtureUsers, MergedDirectory, StoredUsers, UserDirectory};
pub use errors::AuthError;
pub use models::{LoginRequest, RegisterRequest};
pub use service::AuthService;
