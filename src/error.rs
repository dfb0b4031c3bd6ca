//! Client error types
//!
//! Every failure of a backend call ends up as one `ClientError`. The
//! dispatcher turns each variant into exactly one user-facing notification
//! via [`ClientError::notification_message`].

use serde_json::Value;

use crate::envelope::{Envelope, render_message};

/// Client-wide error type
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    /// The backend ran the request and reported a failure in the envelope
    #[error("Domain error: {message}")]
    Domain {
        /// Value of the envelope's `error` field
        code: Option<String>,
        /// Message taken from `data`, else from `error`
        message: String,
        /// The envelope exactly as received
        envelope: Envelope,
    },

    /// The backend answered with a non-2xx status
    #[error("HTTP error {status}: {status_text}")]
    Http {
        status: u16,
        status_text: String,
        payload: Option<Value>,
    },

    /// No response was received at all
    #[error("Network error: {0}")]
    Network(String),

    /// The request could not be built or sent
    #[error("Request error: {0}")]
    Request(String),

    /// The envelope succeeded but `data` did not match the expected record
    #[error("Decode error: {0}")]
    Decode(String),

    /// A request record failed client-side validation
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Configuration error: {0}")]
    Configuration(String),
}

impl ClientError {
    /// Get the error code for this error type
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::Domain { .. } => "DOMAIN_ERROR",
            Self::Http { .. } => "HTTP_ERROR",
            Self::Network(_) => "NETWORK_ERROR",
            Self::Request(_) => "REQUEST_ERROR",
            Self::Decode(_) => "DECODE_ERROR",
            Self::Validation(_) => "VALIDATION_ERROR",
            Self::Configuration(_) => "CONFIGURATION_ERROR",
        }
    }

    /// HTTP status when the server answered with one
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Http { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Text shown to the user for this failure.
    ///
    /// HTTP failures prefer the payload's `data`, then its `error`, then
    /// `Error <status>: <statusText>`. Network failures carry the
    /// dispatcher's configured text.
    pub fn notification_message(&self) -> String {
        match self {
            Self::Domain { message, .. } => message.clone(),
            Self::Http {
                status,
                status_text,
                payload,
            } => payload
                .as_ref()
                .and_then(payload_message)
                .unwrap_or_else(|| format!("Error {}: {}", status, status_text)),
            Self::Network(message) => message.clone(),
            Self::Request(message) => message.clone(),
            Self::Decode(message) => message.clone(),
            Self::Validation(message) => message.clone(),
            Self::Configuration(message) => message.clone(),
        }
    }

    /// True when the backend reported that the session has expired
    pub fn is_login_required(&self, prefix: &str) -> bool {
        matches!(self, Self::Domain { message, .. } if message.starts_with(prefix))
    }
}

/// Structured message inside an error payload, if any
fn payload_message(payload: &Value) -> Option<String> {
    let object = payload.as_object()?;
    ["data", "error"]
        .iter()
        .filter_map(|key| object.get(*key))
        .find_map(render_message)
}

impl From<validator::ValidationErrors> for ClientError {
    fn from(err: validator::ValidationErrors) -> Self {
        ClientError::Validation(err.to_string())
    }
}

impl From<serde_json::Error> for ClientError {
    fn from(err: serde_json::Error) -> Self {
        ClientError::Decode(err.to_string())
    }
}

impl From<crate::config::ConfigError> for ClientError {
    fn from(err: crate::config::ConfigError) -> Self {
        ClientError::Configuration(err.to_string())
    }
}

/// Result type alias using ClientError
pub type ClientResult<T> = Result<T, ClientError>;

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_http_message_prefers_payload_data() {
        let err = ClientError::Http {
            status: 500,
            status_text: "Internal Server Error".to_string(),
            payload: Some(json!({"error": "error", "data": "X"})),
        };
        assert_eq!(err.notification_message(), "X");
    }

    #[test]
    fn test_http_message_falls_back_to_error_field() {
        let err = ClientError::Http {
            status: 400,
            status_text: "Bad Request".to_string(),
            payload: Some(json!({"error": "invalid-params"})),
        };
        assert_eq!(err.notification_message(), "invalid-params");
    }

    #[test]
    fn test_http_message_falls_back_to_status() {
        let err = ClientError::Http {
            status: 502,
            status_text: "Bad Gateway".to_string(),
            payload: Some(Value::String("<html>".to_string())),
        };
        assert_eq!(err.notification_message(), "Error 502: Bad Gateway");

        let err = ClientError::Http {
            status: 404,
            status_text: "Not Found".to_string(),
            payload: None,
        };
        assert_eq!(err.notification_message(), "Error 404: Not Found");
    }

    #[test]
    fn test_error_codes() {
        assert_eq!(ClientError::Network("x".into()).error_code(), "NETWORK_ERROR");
        assert_eq!(ClientError::Validation("x".into()).error_code(), "VALIDATION_ERROR");
        assert_eq!(ClientError::Network("x".into()).status(), None);
    }
}
