//! Constants used throughout the dockcheck core crate.
//!
//! Keeping the protocol strings and defaults in one place keeps the pipeline, the stores and the
//! REST layer in agreement.

/// Maximum length of a purchase-order reference number.
pub const MAX_REFERENCE_LEN: usize = 50;

/// Default port for the REST listener when neither `DOCKCHECK_ADDR` nor `SERVER_PORT` is set.
pub const DEFAULT_PORT: u16 = 8080;

/// Default bind host for the REST listener.
pub const DEFAULT_HOST: &str = "0.0.0.0";

/// Action value for newly created appointments.
pub const ACTION_CREATE: &str = "create";

/// Action value for updates to existing appointments.
pub const ACTION_UPDATE: &str = "update";

/// Appointment statuses that mark a cancellation (compared case-insensitively).
pub const CANCELLED_STATUSES: [&str; 2] = ["cancelled", "canceled"];

/// Purchase-order statuses that count as open (compared case-insensitively).
pub const OPEN_ORDER_STATUSES: [&str; 3] = ["open", "active", "pending"];

/// Location code used by the stub store.
pub const STUB_LOCATION_CODE: &str = "CRS-WH1";
