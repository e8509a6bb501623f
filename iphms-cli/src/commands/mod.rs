pub mod auth;
pub mod completion;
pub mod config;
pub mod users;
pub mod vitals;

mod render;

use std::{
    io::{self, Write},
    sync::Arc,
};

use shared::{
    client::ApiClient,
    config::ClientConfig,
    guard::{self, GuardDecision, RouteAccess},
    services::{AuthService, UserService, VitalsService},
    session::SessionStore,
    state::{AuthContext, FormModel, FormState},
};
use thiserror::Error;
use tracing::warn;

use crate::storage::FileStorage;

/// Why a command refused to run before contacting the server.
#[derive(Debug, Error)]
pub enum AccessError {
    #[error("not signed in; run `iphms auth login` first")]
    NotSignedIn,
    #[error("this command requires an administrator account")]
    AdminRequired,
    #[error("already signed in as {0}; run `iphms auth logout` first")]
    AlreadySignedIn(String),
}

/// Services shared by every command, bound to the file-backed session.
pub struct Context {
    pub config: ClientConfig,
    pub auth: AuthContext,
    pub users: UserService,
    pub vitals: VitalsService,
}

impl Context {
    pub fn new(config: ClientConfig) -> Self {
        let storage = Arc::new(FileStorage::new(config.session_path.clone()));
        let client = ApiClient::new(&config.api_base_url, SessionStore::new(storage))
            .with_session_expired_hook(Arc::new(|| {
                warn!("session expired; run `iphms auth login` to sign in again");
            }));

        Self {
            auth: AuthContext::new(AuthService::new(client.clone())),
            users: UserService::new(client.clone()),
            vitals: VitalsService::new(client),
            config,
        }
    }

    /// Apply the route guard to a command using the cached session.
    pub fn require(&self, access: RouteAccess) -> Result<(), AccessError> {
        let state = self.auth.state();
        match guard::evaluate(access, &state) {
            GuardDecision::Allow => Ok(()),
            GuardDecision::Redirect(_) | GuardDecision::Wait => match (access, &state.user) {
                (RouteAccess::GuestOnly, Some(user)) => {
                    Err(AccessError::AlreadySignedIn(user.email.clone()))
                }
                (RouteAccess::Admin, Some(_)) => Err(AccessError::AdminRequired),
                _ => Err(AccessError::NotSignedIn),
            },
        }
    }
}

/// Read one trimmed line from stdin after printing `message`.
pub(crate) fn prompt(message: &str) -> anyhow::Result<String> {
    print!("{message}");
    io::stdout().flush().ok();
    let mut input = String::new();
    io::stdin().read_line(&mut input)?;
    Ok(input.trim().to_string())
}

/// Collect validation messages in field order for display.
pub(crate) fn validation_failure<M: FormModel>(form: &FormState<M>) -> anyhow::Error {
    let messages: Vec<&str> = form.errors().values().map(String::as_str).collect();
    anyhow::anyhow!(messages.join("\n"))
}
