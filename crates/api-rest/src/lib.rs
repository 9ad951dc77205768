//! # API REST
//!
//! REST API implementation for dockcheck.
//!
//! Handles:
//! - HTTP endpoints with axum (`/validate`, `/health`)
//! - bearer-token gate and body decoding in front of the validation pipeline
//! - OpenAPI/Swagger documentation
//!
//! Uses `api-shared` for envelopes and auth, `dockcheck-core` for decisions.

#![warn(rust_2018_idioms)]

use axum::{extract::DefaultBodyLimit, routing::get, Router};
use dockcheck_core::{PurchaseOrderLookup, ValidationPipeline};
use std::sync::Arc;
use tower_http::trace::TraceLayer;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

pub mod handlers;

/// Largest accepted request body.
pub const MAX_BODY_BYTES: usize = 1024 * 1024;

/// Application state shared across handlers.
///
/// The pipeline and the store are shared read-only; each request evaluates independently.
#[derive(Clone)]
pub struct AppState {
    pipeline: Arc<ValidationPipeline>,
    lookup: Arc<dyn PurchaseOrderLookup>,
    secret_token: Option<Arc<str>>,
}

impl AppState {
    pub fn new(
        pipeline: ValidationPipeline,
        lookup: Arc<dyn PurchaseOrderLookup>,
        secret_token: Option<String>,
    ) -> Self {
        Self {
            pipeline: Arc::new(pipeline),
            lookup,
            secret_token: secret_token.filter(|t| !t.is_empty()).map(Arc::from),
        }
    }
}

#[derive(OpenApi)]
#[openapi(
    paths(handlers::health, handlers::validate_ready, handlers::validate),
    components(schemas(
        api_shared::DataRes,
        api_shared::ErrorRes,
        api_shared::HealthRes,
        api_shared::ReadyRes,
        dockcheck_core::WebhookRequest,
        dockcheck_core::AppointmentFields,
    ))
)]
pub struct ApiDoc;

/// Builds the HTTP router.
///
/// Swagger UI is served at `/swagger-ui` with the document at `/api-docs/openapi.json` when
/// `with_swagger` is set.
pub fn build_router(state: AppState, with_swagger: bool) -> Router {
    let mut router = Router::new().route("/health", get(handlers::health)).route(
        "/validate",
        get(handlers::validate_ready)
            .post(handlers::validate)
            .fallback(handlers::method_not_allowed),
    );

    if with_swagger {
        router = router
            .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()));
    }

    router
        .layer(DefaultBodyLimit::max(MAX_BODY_BYTES))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
