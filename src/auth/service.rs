use chrono::Utc;
use parking_lot::RwLock;
use std::sync::Arc;

use crate::api::MockApi;
use crate::auth::{
    AuthError, FixtureUsers, LoginRequest, MergedDirectory, RegisterRequest, StoredUsers,
};
use crate::models::{NewUser, User, UserRole};
use crate::services::accounts::{login_handle, phone_digits};
use crate::storage::{CredentialStore, Session, SessionStore, StoredAccount};

const MIN_PASSWORD_LEN: usize = 6;
const MIN_PHONE_DIGITS: usize = 10;
const TRAINER_PHOTO: &str =
    "https://images.unsplash.com/photo-1521572267360-ee0c2909d518?auto=format&fit=crop&w=200&q=80";

/// Mock authentication and the current session
pub struct AuthService {
    directory: MergedDirectory,
    credentials: Arc<CredentialStore>,
    sessions: SessionStore,
    current: RwLock<Option<Session>>,
}

impl AuthService {
    pub fn new(api: Arc<MockApi>, credentials: Arc<CredentialStore>, sessions: SessionStore) -> Self {
        let directory = MergedDirectory::new(vec![
            Arc::new(FixtureUsers::new(api)),
            Arc::new(StoredUsers::new(credentials.clone())),
        ]);

        Self {
            directory,
            credentials,
            sessions,
            current: RwLock::new(None),
        }
    }

    /// Rehydrate the persisted session
    pub fn restore(&self) -> Result<Option<User>, AuthError> {
        let session = self.sessions.load()?;
        if let Some(ref session) = session {
            tracing::info!("Restored session for {}", session.user.email);
        }

        let user = session.as_ref().map(|s| s.user.clone());
        *self.current.write() = session;
        Ok(user)
    }

    /// Login against fixture users, registered trainers and generated students
    pub async fn login(&self, request: &LoginRequest) -> Result<Session, AuthError> {
        tracing::debug!("Logging in as {}", request.email);

        let user = self
            .directory
            .find(request)
            .await?
            .ok_or(AuthError::InvalidCredentials)?;

        let session = Session {
            token: format!("mock-token-{}", user.id),
            user,
        };
        self.sessions.save(&session)?;
        *self.current.write() = Some(session.clone());

        tracing::info!("Successfully logged in as {}", session.user.email);
        Ok(session)
    }

    pub fn logout(&self) -> Result<(), AuthError> {
        *self.current.write() = None;
        self.sessions.clear()?;
        Ok(())
    }

    pub fn current_user(&self) -> Option<User> {
        self.current.read().as_ref().map(|s| s.user.clone())
    }

    pub fn token(&self) -> Option<String> {
        self.current.read().as_ref().map(|s| s.token.clone())
    }

    pub fn require_user(&self) -> Result<User, AuthError> {
        self.current_user().ok_or(AuthError::NotAuthenticated)
    }

    /// Replace the in-memory user of the current session. Not persisted.
    pub fn set_user(&self, user: User) {
        let mut current = self.current.write();
        let token = current
            .as_ref()
            .map(|s| s.token.clone())
            .unwrap_or_else(|| format!("mock-token-{}", user.id));
        *current = Some(Session { user, token });
    }

    /// Mock registration: assigns an id and creation date, persists nothing
    pub fn register(&self, user: NewUser) -> User {
        let now = Utc::now();
        User {
            id: format!("{}-{}", user.role, now.timestamp_millis()),
            role: user.role,
            name: user.name,
            email: user.email,
            password: user.password,
            photo: user.photo,
            created_at: now,
        }
    }

    /// Self-service trainer registration persisted to the credential store
    pub fn register_account(&self, request: RegisterRequest) -> Result<User, AuthError> {
        if request.name.trim().is_empty()
            || request.phone.trim().is_empty()
            || request.password.is_empty()
            || request.confirm_password.is_empty()
        {
            return Err(AuthError::Validation("All fields are required".to_string()));
        }

        if request.password != request.confirm_password {
            return Err(AuthError::Validation("Passwords do not match".to_string()));
        }

        if request.password.chars().count() < MIN_PASSWORD_LEN {
            return Err(AuthError::Validation(format!(
                "Password must be at least {} characters",
                MIN_PASSWORD_LEN
            )));
        }

        if phone_digits(&request.phone).len() < MIN_PHONE_DIGITS {
            return Err(AuthError::Validation("Enter a valid phone number".to_string()));
        }

        let email = format!("{}@app.com", login_handle(&request.name));
        let exists = self
            .credentials
            .registered_trainers()?
            .iter()
            .any(|a| a.email == email || a.phone.as_deref() == Some(request.phone.as_str()));
        if exists {
            return Err(AuthError::Validation(
                "An account with this phone already exists".to_string(),
            ));
        }

        let now = Utc::now();
        let account = StoredAccount {
            id: Some(format!("{}-{}", UserRole::Trainer, now.timestamp_millis())),
            role: UserRole::Trainer,
            name: request.name,
            email,
            password: request.password,
            phone: Some(request.phone),
            photo: Some(TRAINER_PHOTO.to_string()),
            created_at: Some(now.to_rfc3339()),
        };
        self.credentials.add_registered_trainer(account.clone())?;

        tracing::info!("Registered trainer {}", account.email);
        Ok(account.into_user(now))
    }
}
