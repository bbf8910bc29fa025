//! Error handling for the fracture-flooding gateway
//!
//! `GatewayError` is the crate-wide error. HTTP handlers translate it into
//! the `{error}` envelope through [`crate::api_errors::AppError`].

use reqwest::StatusCode;
use thiserror::Error;

/// Main error type for the gateway and its clients
#[derive(Error, Debug)]
pub enum GatewayError {
    #[error("Configuration error: {message}")]
    Config { message: String },

    /// No usable response could be obtained from the remote side.
    #[error("Network operation failed: {operation}")]
    Transport {
        operation: String,
        #[source]
        source: reqwest::Error,
    },

    /// The remote side answered, but its body was not the JSON we expected.
    #[error("Malformed response from {operation}")]
    MalformedResponse {
        operation: String,
        #[source]
        source: serde_json::Error,
    },

    /// The remote side processed the request and reported a failure.
    #[error("Upstream returned {status}: {}", message.as_deref().unwrap_or("no message"))]
    Upstream {
        status: StatusCode,
        message: Option<String>,
    },
}

pub type GatewayResult<T> = Result<T, GatewayError>;

impl GatewayError {
    /// Create a configuration error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Create a transport error
    pub fn transport(operation: impl Into<String>, source: reqwest::Error) -> Self {
        Self::Transport {
            operation: operation.into(),
            source,
        }
    }

    /// Create a malformed-response error
    pub fn malformed(operation: impl Into<String>, source: serde_json::Error) -> Self {
        Self::MalformedResponse {
            operation: operation.into(),
            source,
        }
    }

    /// Create an upstream-reported failure
    pub fn upstream(status: StatusCode, message: Option<String>) -> Self {
        Self::Upstream { status, message }
    }

    /// True when no response at all was obtained, or the one obtained was unreadable.
    pub fn is_transport(&self) -> bool {
        matches!(
            self,
            GatewayError::Transport { .. } | GatewayError::MalformedResponse { .. }
        )
    }

    /// Message suitable for showing to a dashboard user.
    ///
    /// Upstream-reported text is shown as-is; everything else collapses to the
    /// error's display form.
    pub fn user_message(&self) -> String {
        match self {
            GatewayError::Upstream {
                message: Some(message),
                ..
            } => message.clone(),
            GatewayError::Upstream {
                status,
                message: None,
            } => format!("Prediction request failed with status {}", status.as_u16()),
            other => other.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_creation() {
        let config_err = GatewayError::config("prediction_api_url must be set");
        assert!(config_err.to_string().contains("Configuration error"));

        let upstream = GatewayError::upstream(StatusCode::BAD_REQUEST, Some("Missing".into()));
        assert!(upstream.to_string().contains("400"));
        assert!(!upstream.is_transport());
    }

    #[test]
    fn test_error_chaining() {
        use std::error::Error;

        let json_err = serde_json::from_str::<serde_json::Value>("{not json").unwrap_err();
        let err = GatewayError::malformed("/predict", json_err);

        assert!(err.source().is_some());
        assert!(err.is_transport());
    }

    #[test]
    fn user_message_prefers_upstream_text() {
        let err = GatewayError::upstream(StatusCode::INTERNAL_SERVER_ERROR, Some("Backend error".into()));
        assert_eq!(err.user_message(), "Backend error");

        let bare = GatewayError::upstream(StatusCode::BAD_GATEWAY, None);
        assert_eq!(bare.user_message(), "Prediction request failed with status 502");
    }
}
