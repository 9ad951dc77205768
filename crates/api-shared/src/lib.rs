//! # API Shared
//!
//! Shared definitions for the dockcheck HTTP API.
//!
//! Contains:
//! - response envelopes of the OpenDock webhook protocol
//! - health and readiness responses (`HealthService`)
//! - bearer-token authentication
//!
//! Used by `api-rest`.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

pub mod auth;
pub mod health;

pub use auth::{validate_bearer_token, AuthError, UNAUTHORIZED_MESSAGE};
pub use health::HealthService;

/// Version reported by the health endpoint.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Success envelope: `{"data": "..."}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct DataRes {
    pub data: String,
}

/// Error envelope: `{"errorMessage": "..."}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ErrorRes {
    pub error_message: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct HealthRes {
    pub status: String,
    pub version: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct ReadyRes {
    pub message: String,
    pub status: String,
}

impl DataRes {
    pub fn new(data: impl Into<String>) -> Self {
        Self { data: data.into() }
    }
}

impl ErrorRes {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            error_message: message.into(),
        }
    }
}
