//! Persisted session store.
//!
//! The store keeps three string entries (access token, refresh token and the
//! serialized user record) in a pluggable [`SessionStorage`] backend. All
//! writes go through [`SessionStore`], which writes and removes the entries as
//! one batch so readers never observe half a session.

mod memory;

pub use memory::MemoryStorage;

use std::{fmt, sync::Arc};

use thiserror::Error;
use tracing::{debug, warn};

use crate::models::{AuthResponse, TokenPair, User};

/// Storage key holding the access token.
pub const ACCESS_TOKEN_KEY: &str = "accessToken";
/// Storage key holding the refresh token.
pub const REFRESH_TOKEN_KEY: &str = "refreshToken";
/// Storage key holding the serialized user record.
pub const USER_KEY: &str = "user";

/// All keys owned by the session store.
pub const SESSION_KEYS: [&str; 3] = [ACCESS_TOKEN_KEY, REFRESH_TOKEN_KEY, USER_KEY];

/// Failure raised by a storage backend.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("session storage unavailable: {0}")]
    Unavailable(String),
    #[error("failed to encode session: {0}")]
    Encode(#[from] serde_json::Error),
    #[error("session storage I/O failed: {0}")]
    Io(#[from] std::io::Error),
}

/// Key/value backend for session entries.
///
/// `set_all` and `remove_all` must apply every entry or none, so backends
/// either write the batch under one lock or as one file replacement.
pub trait SessionStorage: fmt::Debug + Send + Sync {
    /// Reads a single entry.
    fn get(&self, key: &str) -> Option<String>;

    /// Writes every entry in `entries`.
    ///
    /// # Errors
    /// Returns an error if the backend cannot persist the batch.
    fn set_all(&self, entries: &[(&str, String)]) -> Result<(), StorageError>;

    /// Removes every key in `keys`.
    ///
    /// # Errors
    /// Returns an error if the backend cannot persist the removal.
    fn remove_all(&self, keys: &[&str]) -> Result<(), StorageError>;
}

/// The full credential set of a signed-in user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    pub access_token: String,
    pub refresh_token: String,
    pub user: User,
}

impl From<AuthResponse> for Session {
    fn from(response: AuthResponse) -> Self {
        Self {
            access_token: response.access_token,
            refresh_token: response.refresh_token,
            user: response.user,
        }
    }
}

/// Owner of the persisted session entries.
#[derive(Debug, Clone)]
pub struct SessionStore {
    storage: Arc<dyn SessionStorage>,
}

impl SessionStore {
    pub fn new(storage: Arc<dyn SessionStorage>) -> Self {
        Self { storage }
    }

    /// A store backed by process memory.
    #[must_use]
    pub fn in_memory() -> Self {
        Self::new(Arc::new(MemoryStorage::default()))
    }

    /// Persists the token pair and user record together.
    ///
    /// # Errors
    /// Returns an error if the user cannot be serialized or the backend fails.
    pub fn save(&self, session: &Session) -> Result<(), StorageError> {
        let user = serde_json::to_string(&session.user)?;
        self.storage.set_all(&[
            (ACCESS_TOKEN_KEY, session.access_token.clone()),
            (REFRESH_TOKEN_KEY, session.refresh_token.clone()),
            (USER_KEY, user),
        ])?;
        debug!(user_id = session.user.id, "session saved");
        Ok(())
    }

    /// Replaces both tokens after a refresh; the cached user is left as is.
    ///
    /// # Errors
    /// Returns an error if the backend fails.
    pub fn replace_tokens(&self, tokens: &TokenPair) -> Result<(), StorageError> {
        self.storage.set_all(&[
            (ACCESS_TOKEN_KEY, tokens.access_token.clone()),
            (REFRESH_TOKEN_KEY, tokens.refresh_token.clone()),
        ])
    }

    /// Returns the cached user record, if any.
    #[must_use]
    pub fn load(&self) -> Option<User> {
        let raw = self.storage.get(USER_KEY)?;
        match serde_json::from_str(&raw) {
            Ok(user) => Some(user),
            Err(err) => {
                warn!(error = %err, "ignoring unreadable cached user");
                None
            }
        }
    }

    /// Returns the complete session, or `None` if any part is missing.
    #[must_use]
    pub fn session(&self) -> Option<Session> {
        let (access_token, refresh_token) = self.tokens()?;
        Some(Session {
            access_token,
            refresh_token,
            user: self.load()?,
        })
    }

    /// Removes all session entries.
    ///
    /// # Errors
    /// Returns an error if the backend fails.
    pub fn clear(&self) -> Result<(), StorageError> {
        self.storage.remove_all(&SESSION_KEYS)?;
        debug!("session cleared");
        Ok(())
    }

    /// The current access token, provided the pair is intact.
    #[must_use]
    pub fn access_token(&self) -> Option<String> {
        self.tokens().map(|(access, _)| access)
    }

    /// The current refresh token, provided the pair is intact.
    #[must_use]
    pub fn refresh_token(&self) -> Option<String> {
        self.tokens().map(|(_, refresh)| refresh)
    }

    /// Whether a complete token pair is stored.
    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        self.tokens().is_some()
    }

    /// Whether the cached user has the admin role.
    #[must_use]
    pub fn is_admin(&self) -> bool {
        self.load().is_some_and(|user| user.is_admin())
    }

    fn tokens(&self) -> Option<(String, String)> {
        let access = self.storage.get(ACCESS_TOKEN_KEY).filter(|t| !t.is_empty());
        let refresh = self.storage.get(REFRESH_TOKEN_KEY).filter(|t| !t.is_empty());
        access.zip(refresh)
    }
}

impl Default for SessionStore {
    fn default() -> Self {
        Self::in_memory()
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::models::UserRole;

    pub(crate) fn user(id: u64, role: UserRole) -> User {
        User {
            id,
            name: format!("user-{id}"),
            email: format!("user{id}@example.com"),
            date_of_birth: "1990-01-01".into(),
            device_id: format!("device-{id}"),
            role,
            created_at: None,
            updated_at: None,
        }
    }

    pub(crate) fn session(id: u64, role: UserRole) -> Session {
        Session {
            access_token: format!("t{id}"),
            refresh_token: format!("r{id}"),
            user: user(id, role),
        }
    }

    #[test]
    fn load_returns_last_saved_user() {
        let store = SessionStore::in_memory();
        for id in 1..=5 {
            store.save(&session(id, UserRole::User)).unwrap();
        }
        assert_eq!(store.load().unwrap().id, 5);
        assert_eq!(store.access_token().as_deref(), Some("t5"));
        assert_eq!(store.refresh_token().as_deref(), Some("r5"));
    }

    #[test]
    fn clear_removes_every_key() {
        let storage = Arc::new(MemoryStorage::default());
        let store = SessionStore::new(storage.clone());
        store.save(&session(1, UserRole::Admin)).unwrap();
        store.clear().unwrap();

        for key in SESSION_KEYS {
            assert!(storage.get(key).is_none(), "{key} should be removed");
        }
        assert!(!store.is_authenticated());
        assert!(store.load().is_none());
    }

    #[test]
    fn replace_tokens_keeps_user() {
        let store = SessionStore::in_memory();
        store.save(&session(1, UserRole::User)).unwrap();
        store
            .replace_tokens(&TokenPair {
                access_token: "t2".into(),
                refresh_token: "r2".into(),
            })
            .unwrap();

        let current = store.session().unwrap();
        assert_eq!(current.access_token, "t2");
        assert_eq!(current.refresh_token, "r2");
        assert_eq!(current.user.id, 1);
    }

    #[test]
    fn half_a_token_pair_is_no_session() {
        let storage = Arc::new(MemoryStorage::default());
        storage
            .set_all(&[(ACCESS_TOKEN_KEY, "orphan".to_string())])
            .unwrap();
        let store = SessionStore::new(storage);

        assert!(!store.is_authenticated());
        assert!(store.access_token().is_none());
        assert!(store.session().is_none());
    }

    #[test]
    fn corrupt_user_is_treated_as_absent() {
        let storage = Arc::new(MemoryStorage::default());
        storage.set_all(&[(USER_KEY, "{not json".to_string())]).unwrap();
        let store = SessionStore::new(storage);
        assert!(store.load().is_none());
        assert!(!store.is_admin());
    }

    #[test]
    fn admin_flag_follows_cached_role() {
        let store = SessionStore::in_memory();
        assert!(!store.is_admin());
        store.save(&session(1, UserRole::User)).unwrap();
        assert!(!store.is_admin());
        store.save(&session(2, UserRole::Admin)).unwrap();
        assert!(store.is_admin());
    }
}
