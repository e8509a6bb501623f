//! Authenticated HTTP client for the vitals API.
//!
//! Every request built through [`ApiClient`] carries the stored access token.
//! When the server answers `401`, the client exchanges the refresh token for a
//! new pair exactly once per expiry, even if many requests fail together, and
//! replays the failed request a single time with the new token.

mod error;


pub use error::ApiError;

use std::{fmt, sync::Arc};

use futures::lock::Mutex;
use reqwest::{
    Client, RequestBuilder, Response, StatusCode,
    header::{ACCEPT, AUTHORIZATION},
};
use serde::{Serialize, de::DeserializeOwned};
use tracing::{debug, info, warn};

use crate::{
    models::{ApiEnvelope, TokenPair},
    session::SessionStore,
};

/// Base URL used when nothing else is configured.
pub const DEFAULT_API_URL: &str = "http://localhost:5000";

/// Path of the token refresh endpoint, relative to the base URL.
pub const REFRESH_PATH: &str = "auth/refresh";

/// Callback fired after a failed refresh has cleared the session.
pub type SessionExpiredHook = Arc<dyn Fn() + Send + Sync>;

/// API client bound to one base URL and one session store.
#[derive(Clone)]
pub struct ApiClient {
    base_url: String,
    client: Client,
    session: SessionStore,
    refresh_gate: Arc<Mutex<()>>,
    on_session_expired: Option<SessionExpiredHook>,
}

impl fmt::Debug for ApiClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ApiClient")
            .field("base_url", &self.base_url)
            .field("session", &self.session)
            .field("on_session_expired", &self.on_session_expired.is_some())
            .finish_non_exhaustive()
    }
}

impl ApiClient {
    /// Create a client for `base_url` that reads and writes tokens in `session`.
    pub fn new(base_url: &str, session: SessionStore) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client: Client::new(),
            session,
            refresh_gate: Arc::new(Mutex::new(())),
            on_session_expired: None,
        }
    }

    /// Register the callback fired when the session is torn down after a
    /// failed refresh. Front ends use it to send the user to the login screen.
    #[must_use]
    pub fn with_session_expired_hook(mut self, hook: SessionExpiredHook) -> Self {
        self.on_session_expired = Some(hook);
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// The session store this client authenticates with.
    pub fn session(&self) -> &SessionStore {
        &self.session
    }

    pub fn api_url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    fn authorize(request: RequestBuilder, token: Option<&str>) -> RequestBuilder {
        let request = request.header(ACCEPT, "application/json");
        match token {
            Some(token) => request.header(AUTHORIZATION, format!("Bearer {token}")),
            None => request,
        }
    }

    /// Send the request produced by `build`, refreshing credentials on `401`.
    ///
    /// `build` is called once per attempt because a sent [`RequestBuilder`]
    /// cannot be reused. A request is replayed at most once; a second `401`
    /// is returned to the caller unchanged.
    ///
    /// # Errors
    /// Returns [`ApiError::Transport`] when the server cannot be reached and
    /// [`ApiError::RefreshFailed`] when the session had to be discarded.
    pub async fn send_with_refresh<F>(&self, build: F) -> Result<Response, ApiError>
    where
        F: Fn() -> RequestBuilder,
    {
        let mut token = self.session.access_token();
        let mut retried = false;

        loop {
            let response = Self::authorize(build(), token.as_deref()).send().await?;
            if response.status() != StatusCode::UNAUTHORIZED || retried {
                return Ok(response);
            }

            retried = true;
            let original = Self::error_from(response).await;
            token = Some(self.refreshed_access_token(token.as_deref(), original).await?);
            debug!("replaying request with refreshed access token");
        }
    }

    /// Send a request that must not trigger a refresh, such as login.
    ///
    /// # Errors
    /// Returns [`ApiError::Transport`] when the server cannot be reached.
    pub async fn send_public(&self, request: RequestBuilder) -> Result<Response, ApiError> {
        Ok(Self::authorize(request, None).send().await?)
    }

    /// Obtain a usable access token after `stale` was rejected.
    ///
    /// Callers queue on the refresh gate. Whoever finds the stored token still
    /// equal to the one that failed performs the refresh; everyone after that
    /// picks up the rotated token without another network call.
    async fn refreshed_access_token(
        &self,
        stale: Option<&str>,
        original: ApiError,
    ) -> Result<String, ApiError> {
        let _gate = self.refresh_gate.lock().await;

        match self.session.access_token() {
            Some(current) if stale != Some(current.as_str()) => {
                debug!("access token already rotated by a concurrent request");
                return Ok(current);
            }
            // Torn down while queued: the request holding the gate already
            // failed its refresh and fired the hook.
            None if stale.is_some() => {
                debug!("session ended by a concurrent refresh failure");
                return Err(ApiError::RefreshFailed(Box::new(original)));
            }
            _ => {}
        }

        let Some(refresh_token) = self.session.refresh_token() else {
            info!("request unauthorized and no refresh token is stored");
            self.expire_session();
            return Err(original);
        };

        match self.request_token_refresh(&refresh_token).await {
            Ok(tokens) => {
                if let Err(err) = self.session.replace_tokens(&tokens) {
                    warn!(error = %err, "failed to persist refreshed tokens");
                    self.expire_session();
                    return Err(ApiError::RefreshFailed(Box::new(err.into())));
                }
                info!("access token refreshed");
                Ok(tokens.access_token)
            }
            Err(err) => {
                warn!(error = %err, "token refresh rejected, ending session");
                self.expire_session();
                Err(ApiError::RefreshFailed(Box::new(err)))
            }
        }
    }

    /// Rotate the token pair on demand, outside of any failed request.
    ///
    /// Shares the refresh gate with the interceptor, so an explicit refresh
    /// never races one triggered by a `401`.
    ///
    /// # Errors
    /// Returns [`ApiError::Unauthorized`] when no session is stored and
    /// [`ApiError::RefreshFailed`] when the server rejects the refresh token.
    pub async fn refresh_session(&self) -> Result<TokenPair, ApiError> {
        let _gate = self.refresh_gate.lock().await;

        let Some(refresh_token) = self.session.refresh_token() else {
            return Err(ApiError::Unauthorized {
                message: Some("No refresh token available".to_string()),
            });
        };

        match self.request_token_refresh(&refresh_token).await {
            Ok(tokens) => {
                self.session.replace_tokens(&tokens)?;
                info!("access token refreshed on request");
                Ok(tokens)
            }
            Err(err) => {
                warn!(error = %err, "token refresh rejected, ending session");
                self.expire_session();
                Err(ApiError::RefreshFailed(Box::new(err)))
            }
        }
    }

    /// Exchange `refresh_token` for a new pair.
    ///
    /// Sent directly so a rejected refresh can never recurse into another one.
    async fn request_token_refresh(&self, refresh_token: &str) -> Result<TokenPair, ApiError> {
        let response = self
            .client
            .post(self.api_url(REFRESH_PATH))
            .header(ACCEPT, "application/json")
            .header(AUTHORIZATION, format!("Bearer {refresh_token}"))
            .json(&serde_json::json!({}))
            .send()
            .await?;
        Self::decode(response).await
    }

    fn expire_session(&self) {
        if let Err(err) = self.session.clear() {
            warn!(error = %err, "failed to clear expired session");
        }
        if let Some(hook) = &self.on_session_expired {
            hook();
        }
    }

    async fn error_from(response: Response) -> ApiError {
        let status = response.status().as_u16();
        match response.text().await {
            Ok(body) => ApiError::from_status(status, &body),
            Err(err) => err.into(),
        }
    }

    /// Unwrap the envelope of a response, mapping failures to [`ApiError`].
    ///
    /// # Errors
    /// Returns an error for non-success statuses, `status: false` envelopes
    /// and bodies that do not match `T`.
    pub async fn decode<T>(response: Response) -> Result<T, ApiError>
    where
        T: DeserializeOwned,
    {
        let status = response.status();
        let body = response.text().await?;
        if !status.is_success() {
            return Err(ApiError::from_status(status.as_u16(), &body));
        }

        let value: serde_json::Value =
            serde_json::from_str(&body).map_err(|err| ApiError::Decode(err.to_string()))?;
        if value.get("status").and_then(serde_json::Value::as_bool) == Some(false) {
            let message = value
                .get("message")
                .and_then(serde_json::Value::as_str)
                .unwrap_or_default()
                .to_string();
            return Err(ApiError::Rejected { message });
        }

        let envelope: ApiEnvelope<T> =
            serde_json::from_value(value).map_err(|err| ApiError::Decode(err.to_string()))?;
        Ok(envelope.data)
    }

    /// GET `path` and return the envelope payload.
    ///
    /// # Errors
    /// See [`ApiClient::send_with_refresh`] and [`ApiClient::decode`].
    pub async fn get<T>(&self, path: &str) -> Result<T, ApiError>
    where
        T: DeserializeOwned,
    {
        self.get_with_query(path, &[]).await
    }

    /// GET `path` with query parameters.
    ///
    /// # Errors
    /// See [`ApiClient::send_with_refresh`] and [`ApiClient::decode`].
    pub async fn get_with_query<T>(
        &self,
        path: &str,
        query: &[(&str, String)],
    ) -> Result<T, ApiError>
    where
        T: DeserializeOwned,
    {
        let url = self.api_url(path);
        let response = self
            .send_with_refresh(move || self.client.get(url.clone()).query(query))
            .await?;
        Self::decode(response).await
    }

    /// POST a JSON body to `path`.
    ///
    /// # Errors
    /// See [`ApiClient::send_with_refresh`] and [`ApiClient::decode`].
    pub async fn post<B, T>(&self, path: &str, body: &B) -> Result<T, ApiError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let url = self.api_url(path);
        let response = self
            .send_with_refresh(move || self.client.post(url.clone()).json(body))
            .await?;
        Self::decode(response).await
    }

    /// POST a JSON body to `path` without credentials or refresh handling.
    ///
    /// # Errors
    /// See [`ApiClient::decode`].
    pub async fn post_public<B, T>(&self, path: &str, body: &B) -> Result<T, ApiError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let request = self.client.post(self.api_url(path)).json(body);
        let response = self.send_public(request).await?;
        Self::decode(response).await
    }

    /// PATCH a JSON body to `path`.
    ///
    /// # Errors
    /// See [`ApiClient::send_with_refresh`] and [`ApiClient::decode`].
    pub async fn patch<B, T>(&self, path: &str, body: &B) -> Result<T, ApiError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let url = self.api_url(path);
        let response = self
            .send_with_refresh(move || self.client.patch(url.clone()).json(body))
            .await?;
        Self::decode(response).await
    }

    /// DELETE `path`. The response body is ignored on success.
    ///
    /// # Errors
    /// See [`ApiClient::send_with_refresh`].
    pub async fn delete(&self, path: &str) -> Result<(), ApiError> {
        let url = self.api_url(path);
        let response = self
            .send_with_refresh(move || self.client.delete(url.clone()))
            .await?;
        if response.status().is_success() {
            Ok(())
        } else {
            Err(Self::error_from(response).await)
        }
    }
}
