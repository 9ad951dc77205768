//! HTTP handlers.
//!
//! `POST /validate` is the OpenDock webhook. Authentication and body decoding happen here, before
//! the pipeline runs; everything after that is decided by `dockcheck-core`.

use crate::AppState;
use api_shared::{
    validate_bearer_token, DataRes, ErrorRes, HealthRes, HealthService, ReadyRes,
    UNAUTHORIZED_MESSAGE,
};
use axum::{
    body::Bytes,
    extract::{rejection::BytesRejection, State},
    http::{header::AUTHORIZATION, HeaderMap, StatusCode},
    response::{IntoResponse, Json, Response},
};
use dockcheck_core::{Outcome, WebhookRequest};
use std::borrow::Cow;

/// Longest request-body excerpt written to the log.
const LOGGED_BODY_CHARS: usize = 500;

#[utoipa::path(
    get,
    path = "/health",
    responses(
        (status = 200, description = "Service and store are healthy", body = HealthRes),
        (status = 503, description = "Purchase-order store is unreachable", body = HealthRes)
    )
)]
/// Health check endpoint
///
/// Reports whether the purchase-order store is reachable, along with the service version.
#[axum::debug_handler]
pub async fn health(State(state): State<AppState>) -> (StatusCode, Json<HealthRes>) {
    let lookup = state.lookup.clone();
    let store_healthy = match tokio::task::spawn_blocking(move || lookup.is_healthy()).await {
        Ok(healthy) => healthy,
        Err(e) => {
            tracing::error!("store health probe failed: {:?}", e);
            false
        }
    };

    let status = if store_healthy {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };
    (status, Json(HealthService::check_health(store_healthy)))
}

#[utoipa::path(
    get,
    path = "/validate",
    responses(
        (status = 200, description = "Validator is ready", body = ReadyRes)
    )
)]
#[axum::debug_handler]
pub async fn validate_ready() -> Json<ReadyRes> {
    Json(HealthService::ready())
}

#[utoipa::path(
    post,
    path = "/validate",
    request_body = WebhookRequest,
    responses(
        (status = 200, description = "Appointment may be confirmed", body = DataRes),
        (status = 400, description = "Malformed request or business rule violation", body = ErrorRes),
        (status = 401, description = "Missing or invalid bearer token", body = ErrorRes),
        (status = 404, description = "No purchase order for the reference", body = ErrorRes),
        (status = 409, description = "Several purchase orders share the reference", body = ErrorRes),
        (status = 413, description = "Request body exceeds the size limit", body = ErrorRes),
        (status = 503, description = "Purchase-order store unavailable", body = ErrorRes)
    )
)]
/// Validate an appointment change
///
/// Checks the bearer token, decodes the webhook body and runs the validation pipeline. The
/// pipeline's outcome decides both the status code and the envelope.
///
/// # Errors
/// Returns `413 Payload Too Large` for bodies over [`crate::MAX_BODY_BYTES`] and
/// `500 Internal Server Error` if the evaluation task itself fails.
#[axum::debug_handler]
pub async fn validate(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Result<Bytes, BytesRejection>,
) -> Response {
    let auth_header = headers.get(AUTHORIZATION).and_then(|v| v.to_str().ok());
    if let Err(e) = validate_bearer_token(auth_header, state.secret_token.as_deref()) {
        tracing::warn!("rejected webhook: {}", e);
        return error_response(StatusCode::UNAUTHORIZED, UNAUTHORIZED_MESSAGE);
    }

    let body = match body {
        Ok(body) => body,
        Err(e) => {
            tracing::warn!("unreadable webhook body: {}", e.body_text());
            return error_response(e.status(), e.body_text());
        }
    };

    tracing::debug!(
        "request body: {}",
        truncate(&String::from_utf8_lossy(&body), LOGGED_BODY_CHARS)
    );

    let request = match WebhookRequest::from_slice(&body) {
        Ok(request) => request,
        Err(e) => {
            tracing::info!("undecodable webhook body: {}", e);
            return error_response(StatusCode::BAD_REQUEST, e.to_string());
        }
    };

    // The lookup may block on a backend, so keep it off the async workers.
    let pipeline = state.pipeline.clone();
    let lookup = state.lookup.clone();
    let evaluation =
        tokio::task::spawn_blocking(move || pipeline.evaluate(&request, &*lookup)).await;

    let outcome = match evaluation {
        Ok(outcome) => outcome,
        Err(e) => {
            tracing::error!("validation task failed: {:?}", e);
            return error_response(StatusCode::INTERNAL_SERVER_ERROR, "Internal server error");
        }
    };

    tracing::info!(
        "outcome {} ({}, retryable: {}): {}",
        outcome.status_code(),
        outcome.category(),
        outcome.category().is_retryable(),
        outcome.message()
    );
    outcome_response(&outcome)
}

pub async fn method_not_allowed() -> Response {
    error_response(StatusCode::METHOD_NOT_ALLOWED, "Method not allowed. Use POST.")
}

fn outcome_response(outcome: &Outcome) -> Response {
    let status =
        StatusCode::from_u16(outcome.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
    if outcome.is_accepted() {
        (status, Json(DataRes::new(outcome.message()))).into_response()
    } else {
        error_response(status, outcome.message())
    }
}

fn error_response(status: StatusCode, message: impl Into<String>) -> Response {
    (status, Json(ErrorRes::new(message))).into_response()
}

fn truncate(s: &str, max_chars: usize) -> Cow<'_, str> {
    match s.char_indices().nth(max_chars) {
        Some((end, _)) => Cow::Owned(format!("{}...", &s[..end])),
        None => Cow::Borrowed(s),
    }
}
