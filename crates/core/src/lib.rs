//! # Dockcheck Core
//!
//! Decision logic for validating OpenDock appointment webhooks against purchase orders.
//!
//! This crate contains:
//! - the webhook payload model and its lenient decoding
//! - the request interpreter and the ordered validation pipeline
//! - the purchase-order lookup contract with stub and file-backed stores
//! - optional business rules and startup configuration
//!
//! **No API concerns**: authentication, HTTP servers and response envelopes belong in `api-rest`
//! and `api-shared`.

pub mod config;
pub mod constants;
pub mod error;
pub mod interpreter;
pub mod outcome;
pub mod pipeline;
pub mod purchase_order;
pub mod repositories;
pub mod rules;
pub mod validation;
pub mod webhook;

pub use config::{StoreConfig, ValidatorConfig};
pub use error::{ValidatorError, ValidatorResult};
pub use interpreter::{interpret, RequestFacts};
pub use outcome::{Classification, Outcome, OutcomeCategory};
pub use pipeline::ValidationPipeline;
pub use purchase_order::PurchaseOrderRecord;
pub use repositories::{
    open_store, FileRepository, LookupFailure, PurchaseOrderLookup, StubRepository,
};
pub use rules::{BusinessRule, BusinessRules};
pub use validation::{is_valid_reference, ReferenceError, ReferenceNumber};
pub use webhook::{Action, AppointmentFields, PayloadError, WebhookRequest};
