use thiserror::Error;

use crate::{models::ErrorBody, session::StorageError};

/// Errors surfaced by [`ApiClient`](super::ApiClient) and the services built on it.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The request never produced an HTTP response.
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("unauthorized: {}", .message.as_deref().unwrap_or("missing or expired credentials"))]
    Unauthorized { message: Option<String> },

    #[error("forbidden: {}", .message.as_deref().unwrap_or("insufficient permissions"))]
    Forbidden { message: Option<String> },

    #[error("not found: {}", .message.as_deref().unwrap_or("resource does not exist"))]
    NotFound { message: Option<String> },

    #[error("request failed with status {status}: {}", .message.as_deref().unwrap_or("no details"))]
    Status { status: u16, message: Option<String> },

    /// The server answered with a success code but `status: false`.
    #[error("request rejected: {message}")]
    Rejected { message: String },

    #[error("unexpected response body: {0}")]
    Decode(String),

    /// Client-side validation failed; nothing was sent.
    #[error("{0}")]
    Validation(String),

    /// The access token expired and obtaining a new one failed.
    #[error("token refresh failed: {0}")]
    RefreshFailed(#[source] Box<ApiError>),

    #[error(transparent)]
    Session(#[from] StorageError),
}

impl ApiError {
    /// Builds the error for a non-success response from its status and body text.
    #[must_use]
    pub fn from_status(status: u16, body: &str) -> Self {
        let message = ErrorBody::parse(body).into_message();
        match status {
            401 => Self::Unauthorized { message },
            403 => Self::Forbidden { message },
            404 => Self::NotFound { message },
            _ => Self::Status { status, message },
        }
    }

    /// HTTP status associated with the error, if any.
    #[must_use]
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Transport(err) => err.status().map(|status| status.as_u16()),
            Self::Unauthorized { .. } => Some(401),
            Self::Forbidden { .. } => Some(403),
            Self::NotFound { .. } => Some(404),
            Self::Status { status, .. } => Some(*status),
            Self::RefreshFailed(inner) => inner.status(),
            Self::Rejected { .. } | Self::Decode(_) | Self::Validation(_) | Self::Session(_) => None,
        }
    }

    /// The message the server attached to the failure, if any.
    #[must_use]
    pub fn server_message(&self) -> Option<&str> {
        match self {
            Self::Unauthorized { message }
            | Self::Forbidden { message }
            | Self::NotFound { message }
            | Self::Status { message, .. } => message.as_deref(),
            Self::Rejected { message } => Some(message.as_str()).filter(|m| !m.is_empty()),
            Self::RefreshFailed(inner) => inner.server_message(),
            Self::Transport(_) | Self::Decode(_) | Self::Validation(_) | Self::Session(_) => None,
        }
    }

    /// Text to show a person: the server's message when present, otherwise `fallback`.
    #[must_use]
    pub fn user_message(&self, fallback: &str) -> String {
        self.server_message().unwrap_or(fallback).to_string()
    }

    #[must_use]
    pub fn is_unauthorized(&self) -> bool {
        matches!(self, Self::Unauthorized { .. })
    }

    #[must_use]
    pub fn is_forbidden(&self) -> bool {
        matches!(self, Self::Forbidden { .. })
    }

    #[must_use]
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    /// True when the session was torn down because the refresh failed.
    #[must_use]
    pub fn is_session_expired(&self) -> bool {
        matches!(self, Self::RefreshFailed(_))
    }
}
