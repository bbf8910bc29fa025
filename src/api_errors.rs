use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::errors::GatewayError;

/// Error returned by gateway handlers. Always rendered as `{"error": "..."}`.
#[derive(Debug, Error)]
pub enum AppError {
    /// Rejected locally, before any upstream call.
    #[error("{0}")]
    BadRequest(String),
    /// The prediction service answered with a non-2xx status.
    #[error("{message}")]
    Upstream { status: StatusCode, message: String },
    /// No usable answer from the prediction service.
    #[error("{0}")]
    Unreachable(String),
}

/// Per-route wording for upstream failures.
#[derive(Debug, Clone, Copy)]
pub struct RouteMessages {
    /// Used when the upstream error body carries no `error` string.
    pub fallback: &'static str,
    /// Fixed text for every transport failure.
    pub unreachable: &'static str,
}

pub const PREDICT_MESSAGES: RouteMessages = RouteMessages {
    fallback: "Prediction failed",
    unreachable:
        "Failed to connect to prediction service. Please ensure the prediction backend is running.",
};

pub const TEST_SERVICE_UNREACHABLE: &str =
    "Failed to connect to test service. Please ensure the prediction backend is running.";

impl AppError {
    pub fn bad_request(msg: impl Into<String>) -> Self {
        Self::BadRequest(msg.into())
    }

    pub fn invalid_action() -> Self {
        Self::BadRequest("Invalid action".into())
    }

    /// Map a gateway error into the envelope for a given route.
    ///
    /// Transport and malformed-body failures collapse into `messages.unreachable`;
    /// the underlying cause is logged here and never returned to the caller.
    pub fn from_gateway(err: GatewayError, messages: RouteMessages) -> Self {
        match err {
            GatewayError::Upstream { status, message } => {
                let status = StatusCode::from_u16(status.as_u16())
                    .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
                let message = message.unwrap_or_else(|| messages.fallback.to_string());
                tracing::warn!(status = status.as_u16(), %message, "upstream reported failure");
                AppError::Upstream { status, message }
            }
            other => {
                tracing::error!(error = ?other, "prediction service unreachable");
                AppError::Unreachable(messages.unreachable.to_string())
            }
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::Upstream { status, .. } => *status,
            AppError::Unreachable(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

/// Wire shape of every error the gateway returns.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrBody {
    pub error: String,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let code = self.status();
        (code, Json(ErrBody { error: self.to_string() })).into_response()
    }
}
