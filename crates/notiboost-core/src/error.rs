use serde_json::Value;
use thiserror::Error;

/// Result type alias for NotiBoost operations
pub type Result<T> = std::result::Result<T, NotiboostError>;

/// Errors that can occur when using the NotiBoost API
#[derive(Error, Debug)]
pub enum NotiboostError {
    /// Client misconfiguration, detected before any network activity
    #[error("configuration error: {0}")]
    Config(String),

    /// API returned a non-retryable error response
    #[error("API error ({status}): {message}")]
    Api {
        /// HTTP status code
        status: u16,
        /// Server-supplied message, or `HTTP <status>`
        message: String,
        /// Parsed response body, if the server sent JSON
        body: Option<Value>,
    },

    /// Every attempt timed out
    #[error("request timed out after {timeout_ms} ms")]
    Timeout {
        /// Per-attempt timeout in milliseconds
        timeout_ms: u64,
    },

    /// Connection could not be established
    #[error("connection failed: {0}")]
    Connection(String),

    /// Any other transport-level failure
    #[error("HTTP request failed: {0}")]
    Http(String),

    /// JSON serialization/deserialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Coarse classification of a [`NotiboostError`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// Raised while building the client or the request
    Config,
    /// The server answered with a fatal status
    Api,
    /// Timeout, DNS, connection or body read failure
    Transport,
    /// Payload could not be encoded or decoded
    Serialization,
}

impl NotiboostError {
    /// Build an API error from a status code and the parsed response body.
    ///
    /// The message is taken from the body's `message` field, then `error`,
    /// and falls back to `HTTP <status>`.
    #[must_use]
    pub fn from_response(status: u16, body: Option<Value>) -> Self {
        let message = body
            .as_ref()
            .and_then(|v| {
                v.get("message")
                    .or_else(|| v.get("error"))
                    .and_then(Value::as_str)
            })
            .map_or_else(|| format!("HTTP {status}"), String::from);

        Self::Api {
            status,
            message,
            body,
        }
    }

    /// Returns the error classification
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::Config(_) => ErrorKind::Config,
            Self::Api { .. } => ErrorKind::Api,
            Self::Timeout { .. } | Self::Connection(_) | Self::Http(_) => ErrorKind::Transport,
            Self::Json(_) => ErrorKind::Serialization,
        }
    }

    /// Returns true if the failure class is one the client retries
    #[must_use]
    pub const fn is_retryable(&self) -> bool {
        match self {
            Self::Api { status, .. } => *status == 429,
            Self::Timeout { .. } | Self::Connection(_) | Self::Http(_) => true,
            Self::Config(_) | Self::Json(_) => false,
        }
    }

    /// Returns the HTTP status code if this is an API error
    #[must_use]
    pub const fn status_code(&self) -> Option<u16> {
        match self {
            Self::Api { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Returns the parsed server error body, if any
    #[must_use]
    pub const fn body(&self) -> Option<&Value> {
        match self {
            Self::Api { body, .. } => body.as_ref(),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn api_error_uses_server_message() {
        let err = NotiboostError::from_response(
            422,
            Some(json!({"message": "event_name is required", "code": "invalid"})),
        );

        assert_eq!(err.status_code(), Some(422));
        assert_eq!(err.kind(), ErrorKind::Api);
        assert_eq!(err.to_string(), "API error (422): event_name is required");
        assert_eq!(err.body().unwrap()["code"], "invalid");
    }

    #[test]
    fn api_error_falls_back_to_error_field() {
        let err = NotiboostError::from_response(401, Some(json!({"error": "bad key"})));
        assert_eq!(err.to_string(), "API error (401): bad key");
    }

    #[test]
    fn api_error_without_body_uses_generic_message() {
        let err = NotiboostError::from_response(503, None);

        match &err {
            NotiboostError::Api { message, body, .. } => {
                assert_eq!(message, "HTTP 503");
                assert!(body.is_none());
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn classification() {
        assert!(NotiboostError::Timeout { timeout_ms: 10 }.is_retryable());
        assert!(NotiboostError::from_response(429, None).is_retryable());
        assert!(!NotiboostError::from_response(500, None).is_retryable());
        assert!(!NotiboostError::Config("missing key".into()).is_retryable());
        assert_eq!(
            NotiboostError::Connection("reset".into()).kind(),
            ErrorKind::Transport
        );
        assert_eq!(NotiboostError::Http("dns".into()).status_code(), None);
    }
}
