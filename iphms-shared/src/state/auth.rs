//! Process-wide authentication state.
//!
//! [`AuthContext`] is seeded from the session store once, then changes only
//! through [`login`](AuthContext::login), [`register`](AuthContext::register),
//! [`logout`](AuthContext::logout) and [`session_expired`](AuthContext::session_expired).
//! A background token refresh replaces tokens in the store but never the
//! cached user held here.
//!
//! The context is single-threaded: front ends own it on their UI thread (or the
//! CLI's main task) and observe it through [`AuthContext::subscribe`].

use std::{
    cell::{Cell, RefCell},
    fmt,
    rc::{Rc, Weak},
};

use tracing::{debug, warn};

use crate::{
    client::ApiError,
    models::{AuthResponse, LoginRequest, RegisterRequest, User},
    services::AuthService,
};

pub const LOGIN_FAILED: &str = "Failed to login. Please check your credentials.";
pub const REGISTER_FAILED: &str = "Failed to register. Please try again.";

/// Message for a failed login: the server's explanation when it gave one.
pub fn login_error_message(err: &ApiError) -> String {
    err.user_message(LOGIN_FAILED)
}

pub fn register_error_message(err: &ApiError) -> String {
    err.user_message(REGISTER_FAILED)
}

/// Snapshot of the authentication state.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AuthState {
    pub user: Option<User>,
    pub is_loading: bool,
}

impl AuthState {
    pub fn is_authenticated(&self) -> bool {
        self.user.is_some()
    }

    /// True only for a cached user whose role is admin.
    pub fn is_admin(&self) -> bool {
        self.user.as_ref().is_some_and(User::is_admin)
    }
}

type Listener = Rc<dyn Fn(&AuthState)>;

struct Inner {
    auth: AuthService,
    state: RefCell<AuthState>,
    listeners: RefCell<Vec<(usize, Listener)>>,
    next_listener: Cell<usize>,
}

/// Shared handle to the authentication state; clones observe the same state.
#[derive(Clone)]
pub struct AuthContext {
    inner: Rc<Inner>,
}

impl fmt::Debug for AuthContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AuthContext")
            .field("state", &*self.inner.state.borrow())
            .field("listeners", &self.inner.listeners.borrow().len())
            .finish()
    }
}

impl PartialEq for AuthContext {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.inner, &other.inner)
    }
}

/// Keeps a listener registered until dropped.
#[must_use = "dropping the subscription unregisters the listener"]
pub struct Subscription {
    id: usize,
    inner: Weak<Inner>,
}

impl fmt::Debug for Subscription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Subscription").field("id", &self.id).finish()
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        if let Some(inner) = self.inner.upgrade() {
            inner.listeners.borrow_mut().retain(|(id, _)| *id != self.id);
        }
    }
}

/// Clears the loading flag when dropped, whichever way the operation ends.
struct LoadingGuard<'a> {
    context: &'a AuthContext,
}

impl<'a> LoadingGuard<'a> {
    fn start(context: &'a AuthContext) -> Self {
        context.update(|state| state.is_loading = true);
        Self { context }
    }
}

impl Drop for LoadingGuard<'_> {
    fn drop(&mut self) {
        self.context.update(|state| state.is_loading = false);
    }
}

impl AuthContext {
    /// Build the context and rehydrate it from the session store.
    pub fn new(auth: AuthService) -> Self {
        let user = auth.client().session().session().map(|session| session.user);
        debug!(signed_in = user.is_some(), "auth state rehydrated");
        Self {
            inner: Rc::new(Inner {
                auth,
                state: RefCell::new(AuthState {
                    user,
                    is_loading: false,
                }),
                listeners: RefCell::new(Vec::new()),
                next_listener: Cell::new(0),
            }),
        }
    }

    pub fn service(&self) -> &AuthService {
        &self.inner.auth
    }

    pub fn state(&self) -> AuthState {
        self.inner.state.borrow().clone()
    }

    pub fn user(&self) -> Option<User> {
        self.inner.state.borrow().user.clone()
    }

    pub fn is_loading(&self) -> bool {
        self.inner.state.borrow().is_loading
    }

    pub fn is_authenticated(&self) -> bool {
        self.inner.state.borrow().is_authenticated()
    }

    pub fn is_admin(&self) -> bool {
        self.inner.state.borrow().is_admin()
    }

    /// Call `listener` with every new state until the subscription is dropped.
    pub fn subscribe<F>(&self, listener: F) -> Subscription
    where
        F: Fn(&AuthState) + 'static,
    {
        let id = self.inner.next_listener.get();
        self.inner.next_listener.set(id + 1);
        self.inner
            .listeners
            .borrow_mut()
            .push((id, Rc::new(listener)));
        Subscription {
            id,
            inner: Rc::downgrade(&self.inner),
        }
    }

    fn update(&self, change: impl FnOnce(&mut AuthState)) {
        let snapshot = {
            let mut state = self.inner.state.borrow_mut();
            change(&mut state);
            state.clone()
        };
        let listeners: Vec<Listener> = self
            .inner
            .listeners
            .borrow()
            .iter()
            .map(|(_, listener)| listener.clone())
            .collect();
        for listener in listeners {
            listener(&snapshot);
        }
    }

    fn accept(&self, response: &AuthResponse) -> Result<User, ApiError> {
        self.inner.auth.persist(response)?;
        let user = response.user.clone();
        self.update(|state| state.user = Some(user.clone()));
        Ok(user)
    }

    /// Sign in and cache the returned user.
    ///
    /// # Errors
    /// Returns the service error unchanged; the state is left as it was.
    pub async fn login(&self, request: &LoginRequest) -> Result<User, ApiError> {
        let _loading = LoadingGuard::start(self);
        let response = self.inner.auth.login(request).await?;
        self.accept(&response)
    }

    /// Create an account and sign in with it.
    ///
    /// # Errors
    /// Returns the service error unchanged; the state is left as it was.
    pub async fn register(&self, request: &RegisterRequest) -> Result<User, ApiError> {
        let _loading = LoadingGuard::start(self);
        let response = self.inner.auth.register(request).await?;
        self.accept(&response)
    }

    /// Forget the session. Never fails from the caller's point of view.
    pub fn logout(&self) {
        if let Err(err) = self.inner.auth.logout() {
            warn!(error = %err, "failed to clear stored session on logout");
        }
        self.update(|state| state.user = None);
    }

    /// Drop the cached user after the client discarded an unrecoverable session.
    pub fn session_expired(&self) {
        if self.is_authenticated() {
            debug!("session expired, dropping cached user");
            self.update(|state| state.user = None);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        models::UserRole,
        session::{MemoryStorage, REFRESH_TOKEN_KEY, SessionStorage, SessionStore, tests::session},
        testing::{MockApi, PASSWORD},
    };
    use std::sync::Arc;

    fn recorder(context: &AuthContext) -> (Subscription, Rc<RefCell<Vec<AuthState>>>) {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = seen.clone();
        let subscription = context.subscribe(move |state| sink.borrow_mut().push(state.clone()));
        (subscription, seen)
    }

    #[tokio::test]
    async fn rehydrates_from_store() {
        let api = MockApi::spawn().await;
        let store = SessionStore::in_memory();
        store.save(&session(2, UserRole::Admin)).unwrap();

        let context = AuthContext::new(AuthService::new(api.client(store)));

        assert!(!context.is_loading());
        assert!(context.is_authenticated());
        assert!(context.is_admin());
        assert_eq!(context.user().unwrap().id, 2);
    }

    #[tokio::test]
    async fn cached_user_without_tokens_is_signed_out() {
        let api = MockApi::spawn().await;
        let storage = Arc::new(MemoryStorage::default());
        let store = SessionStore::new(storage.clone());
        store.save(&session(2, UserRole::Admin)).unwrap();
        storage.remove_all(&[REFRESH_TOKEN_KEY]).unwrap();

        let context = AuthContext::new(AuthService::new(api.client(store)));

        assert!(context.user().is_none());
        assert!(!context.is_authenticated());
        assert!(!context.is_admin());
    }

    #[tokio::test]
    async fn login_persists_session_and_toggles_loading() {
        let api = MockApi::spawn().await;
        let store = SessionStore::in_memory();
        let context = AuthContext::new(AuthService::new(api.client(store.clone())));
        let (_subscription, seen) = recorder(&context);

        let user = context
            .login(&LoginRequest {
                email: "user1@example.com".into(),
                password: PASSWORD.into(),
            })
            .await
            .unwrap();

        assert_eq!(user.id, 1);
        assert_eq!(context.user().unwrap().id, 1);
        assert!(!context.is_admin());
        assert_eq!(store.access_token().as_deref(), Some("t1"));
        assert_eq!(store.refresh_token().as_deref(), Some("r1"));
        assert_eq!(store.load().unwrap().id, 1);

        let seen = seen.borrow();
        assert!(seen.first().unwrap().is_loading);
        assert!(!seen.last().unwrap().is_loading);
        assert!(seen.last().unwrap().is_authenticated());
    }

    #[tokio::test]
    async fn failed_login_leaves_state_and_clears_loading() {
        let api = MockApi::spawn().await;
        let context = AuthContext::new(AuthService::new(api.client(SessionStore::in_memory())));
        let (_subscription, seen) = recorder(&context);

        let err = context
            .login(&LoginRequest {
                email: "user1@example.com".into(),
                password: "nope".into(),
            })
            .await
            .unwrap_err();

        assert_eq!(err.server_message(), Some("Invalid credentials"));
        assert!(!context.is_loading());
        assert!(!context.is_authenticated());
        assert_eq!(
            seen.borrow().iter().map(|s| s.is_loading).collect::<Vec<_>>(),
            vec![true, false]
        );
    }

    #[tokio::test]
    async fn logout_clears_store_and_user() {
        let api = MockApi::spawn().await;
        let store = SessionStore::in_memory();
        store.save(&session(1, UserRole::User)).unwrap();
        let context = AuthContext::new(AuthService::new(api.client(store.clone())));

        context.logout();

        assert!(!context.is_authenticated());
        assert!(!store.is_authenticated());
        assert!(store.load().is_none());
    }

    #[tokio::test]
    async fn dropped_subscription_stops_notifications() {
        let api = MockApi::spawn().await;
        let context = AuthContext::new(AuthService::new(api.signed_in_client(1)));
        let (subscription, seen) = recorder(&context);

        context.session_expired();
        drop(subscription);
        context.logout();

        assert_eq!(seen.borrow().len(), 1);
        assert!(!seen.borrow()[0].is_authenticated());
    }

    #[test]
    fn form_messages_prefer_server_text() {
        let rejected = ApiError::from_status(401, r#"{"message":"Invalid credentials"}"#);
        assert_eq!(login_error_message(&rejected), "Invalid credentials");
        let silent = ApiError::from_status(502, "");
        assert_eq!(login_error_message(&silent), LOGIN_FAILED);
        assert_eq!(register_error_message(&silent), REGISTER_FAILED);
    }

    #[test]
    fn admin_requires_admin_role() {
        let mut state = AuthState::default();
        assert!(!state.is_admin());
        state.user = Some(crate::session::tests::user(1, UserRole::User));
        assert!(!state.is_admin());
        state.user = Some(crate::session::tests::user(1, UserRole::Admin));
        assert!(state.is_admin());
    }
}
