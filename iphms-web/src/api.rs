//! Process-wide services bound to the browser session.

use std::{cell::OnceCell, sync::Arc};

use shared::{
    client::ApiClient,
    config::ClientConfig,
    guard::LOGIN_PATH,
    services::{AuthService, UserService, VitalsService},
    session::SessionStore,
    state::AuthContext,
};
use tracing::warn;

use crate::storage::BrowserStorage;

thread_local! {
    static SERVICES: OnceCell<Services> = const { OnceCell::new() };
}

/// Base URL baked in at build time.
pub fn api_base_url() -> String {
    ClientConfig::from_build_env().api_base_url
}

/// The services every page talks to. Cloning is cheap and every clone shares
/// the same session, refresh gate and auth state.
#[derive(Clone, Debug)]
pub struct Services {
    pub auth: AuthContext,
    pub users: UserService,
    pub vitals: VitalsService,
}

impl Services {
    pub fn shared() -> Self {
        SERVICES.with(|cell| cell.get_or_init(Self::build).clone())
    }

    fn build() -> Self {
        let session = SessionStore::new(Arc::new(BrowserStorage));
        let client = ApiClient::new(&api_base_url(), session)
            .with_session_expired_hook(Arc::new(on_session_expired));

        Self {
            auth: AuthContext::new(AuthService::new(client.clone())),
            users: UserService::new(client.clone()),
            vitals: VitalsService::new(client),
        }
    }
}

/// The stored session is already gone; drop the cached user and go to login.
fn on_session_expired() {
    warn!("session expired, redirecting to login");
    if let Some(services) = SERVICES.with(|cell| cell.get().cloned()) {
        services.auth.session_expired();
    }
    if let Some(window) = web_sys::window() {
        let _ = window.location().set_href(LOGIN_PATH);
    }
}
