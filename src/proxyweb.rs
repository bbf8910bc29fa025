//! Gateway routes: the predict proxy, the test-operations proxy and health checks.

use std::collections::HashMap;
use std::sync::Arc;

use axum::{
    body::Bytes,
    extract::{Query, State},
    http::{header, StatusCode},
    response::{IntoResponse, Json, Response},
    routing::{get, post},
    Router,
};
use serde_json::{json, Value};
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{info_span, warn, Instrument, Span};
use uuid::Uuid;

use crate::api_errors::{AppError, PREDICT_MESSAGES};
use crate::app_state::AppState;
use crate::test_actions::TestAction;

/// Build the gateway router over shared state.
pub fn build_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/api/predict", post(predict))
        .route("/api/test", get(test_read).post(test_write))
        .route("/healthz", get(healthz))
        .route("/readyz", get(readyz))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

fn request_span(route: &'static str) -> Span {
    info_span!(
        "proxy",
        route,
        request_id = %Uuid::new_v4(),
        action = tracing::field::Empty
    )
}

/// Upstream bytes are already known to be JSON; hand them back untouched.
fn json_passthrough(bytes: Bytes) -> Response {
    ([(header::CONTENT_TYPE, "application/json")], bytes).into_response()
}

fn parse_body(body: &Bytes) -> Result<Value, AppError> {
    serde_json::from_slice(body).map_err(|_| AppError::bad_request("Invalid request body"))
}

#[axum::debug_handler]
async fn predict(State(st): State<Arc<AppState>>, body: Bytes) -> Result<Response, AppError> {
    async move {
        let features = parse_body(&body)?;
        let bytes = st
            .upstream
            .post_json("/predict", &features)
            .await
            .map_err(|e| AppError::from_gateway(e, PREDICT_MESSAGES))?;
        Ok(json_passthrough(bytes))
    }
    .instrument(request_span("predict"))
    .await
}

async fn test_read(
    State(st): State<Arc<AppState>>,
    Query(params): Query<HashMap<String, String>>,
) -> Result<Response, AppError> {
    async move {
        let action = TestAction::for_read(params.get("action").map(String::as_str))
            .ok_or_else(AppError::invalid_action)?;
        Span::current().record("action", action.as_str());

        let limit = match params.get("limit").map(|s| s.trim()).filter(|s| !s.is_empty()) {
            Some(raw) => raw
                .parse::<u32>()
                .map_err(|_| AppError::bad_request("Invalid limit"))?,
            None => st.config.default_test_limit,
        };

        let bytes = st
            .upstream
            .get(action.upstream_path(), &[("limit", limit.to_string())])
            .await
            .map_err(|e| AppError::from_gateway(e, action.messages()))?;
        Ok(json_passthrough(bytes))
    }
    .instrument(request_span("test"))
    .await
}

async fn test_write(State(st): State<Arc<AppState>>, body: Bytes) -> Result<Response, AppError> {
    async move {
        let Value::Object(mut payload) = parse_body(&body)? else {
            return Err(AppError::invalid_action());
        };
        let action = payload.remove("action");
        let action = TestAction::for_write(action.as_ref().and_then(Value::as_str))
            .ok_or_else(AppError::invalid_action)?;
        Span::current().record("action", action.as_str());

        let bytes = st
            .upstream
            .post_json(action.upstream_path(), &Value::Object(payload))
            .await
            .map_err(|e| AppError::from_gateway(e, action.messages()))?;
        Ok(json_passthrough(bytes))
    }
    .instrument(request_span("test"))
    .await
}

async fn healthz() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}

async fn readyz(State(st): State<Arc<AppState>>) -> Response {
    match st.upstream.health().await {
        Ok(upstream) => Json(json!({ "ready": true, "upstream": upstream })).into_response(),
        Err(e) => {
            warn!(error = %e, "prediction service not ready");
            (
                StatusCode::SERVICE_UNAVAILABLE,
                Json(json!({ "ready": false, "error": e.user_message() })),
            )
                .into_response()
        }
    }
}
