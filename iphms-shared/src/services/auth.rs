use tracing::info;

use crate::{
    client::{ApiClient, ApiError},
    models::{AuthResponse, LoginRequest, RegisterRequest, TokenPair, User},
    session::Session,
};

/// Register, login and local session bookkeeping.
///
/// `register` and `login` return the server's payload untouched; callers
/// decide when to [`persist`](AuthService::persist) it.
#[derive(Debug, Clone)]
pub struct AuthService {
    client: ApiClient,
}

impl AuthService {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }

    pub fn client(&self) -> &ApiClient {
        &self.client
    }

    /// # Errors
    /// Returns the server's rejection, e.g. a duplicate email.
    pub async fn register(&self, request: &RegisterRequest) -> Result<AuthResponse, ApiError> {
        self.client.post_public("auth/register", request).await
    }

    /// # Errors
    /// Returns the server's rejection for bad credentials.
    pub async fn login(&self, request: &LoginRequest) -> Result<AuthResponse, ApiError> {
        self.client.post_public("auth/login", request).await
    }

    /// Exchange the stored refresh token for a new pair.
    ///
    /// # Errors
    /// See [`ApiClient::refresh_session`].
    pub async fn refresh(&self) -> Result<TokenPair, ApiError> {
        self.client.refresh_session().await
    }

    /// Store the tokens and user from a register or login response.
    ///
    /// # Errors
    /// Returns [`ApiError::Session`] if the backend cannot write.
    pub fn persist(&self, response: &AuthResponse) -> Result<(), ApiError> {
        self.client.session().save(&Session::from(response.clone()))?;
        info!(user_id = response.user.id, "signed in");
        Ok(())
    }

    /// Forget the session locally. The server is not contacted.
    ///
    /// # Errors
    /// Returns [`ApiError::Session`] if the backend cannot remove the entries.
    pub fn logout(&self) -> Result<(), ApiError> {
        self.client.session().clear()?;
        info!("signed out");
        Ok(())
    }

    /// The cached user; never touches the network.
    pub fn current_user(&self) -> Option<User> {
        self.client.session().load()
    }

    pub fn is_authenticated(&self) -> bool {
        self.client.session().is_authenticated()
    }

    pub fn is_admin(&self) -> bool {
        self.client.session().is_admin()
    }
}
