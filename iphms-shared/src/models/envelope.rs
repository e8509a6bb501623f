use serde::{Deserialize, Serialize};

/// Wrapper every API response body is delivered in.
///
/// Only `data` is consumed by callers; `status` and `message` are inspected
/// when a request is rejected.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ApiEnvelope<T> {
    /// Whether the server considers the request successful.
    pub status: bool,

    /// Human readable summary supplied by the server.
    #[serde(default)]
    pub message: String,

    /// The payload.
    pub data: T,
}

impl<T> ApiEnvelope<T> {
    /// Wraps `data` in a successful envelope.
    pub fn ok(data: T) -> Self {
        Self {
            status: true,
            message: String::new(),
            data,
        }
    }
}

/// Lenient view of an error response body.
///
/// Error bodies follow the envelope shape but `data` is usually absent, and
/// some failures (proxies, crashed handlers) return no JSON at all.
#[derive(Debug, Clone, Default, Deserialize, PartialEq, Eq)]
pub struct ErrorBody {
    /// Envelope status flag, when present.
    #[serde(default)]
    pub status: Option<bool>,

    /// Server-provided message, when present.
    #[serde(default)]
    pub message: Option<String>,
}

impl ErrorBody {
    /// Parses an error body, falling back to an empty one for non-JSON text.
    #[must_use]
    pub fn parse(text: &str) -> Self {
        serde_json::from_str(text).unwrap_or_default()
    }

    /// Returns the server message when it is present and not blank.
    #[must_use]
    pub fn into_message(self) -> Option<String> {
        self.message.filter(|message| !message.trim().is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn envelope_missing_message_defaults_to_empty() {
        let envelope: ApiEnvelope<u32> =
            serde_json::from_value(json!({ "status": true, "data": 7 })).unwrap();
        assert!(envelope.status);
        assert!(envelope.message.is_empty());
        assert_eq!(envelope.data, 7);
    }

    #[test]
    fn error_body_extracts_message() {
        let body = ErrorBody::parse(r#"{"status":false,"message":"Email already registered"}"#);
        assert_eq!(body.status, Some(false));
        assert_eq!(body.into_message().as_deref(), Some("Email already registered"));
    }

    #[test]
    fn error_body_tolerates_plain_text() {
        let body = ErrorBody::parse("502 Bad Gateway");
        assert_eq!(body, ErrorBody::default());
        assert!(body.into_message().is_none());
    }

    #[test]
    fn blank_message_is_ignored() {
        let body = ErrorBody::parse(r#"{"message":"   "}"#);
        assert!(body.into_message().is_none());
    }
}
