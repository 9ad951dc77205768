//! Purchase-order stores.
//!
//! The pipeline reaches purchase orders only through [`PurchaseOrderLookup`], so the stub and the
//! file-backed store are interchangeable, and a real enterprise backend can be added as one more
//! implementation without touching the pipeline.

use crate::config::StoreConfig;
use crate::error::ValidatorResult;
use crate::purchase_order::PurchaseOrderRecord;
use crate::validation::ReferenceNumber;
use std::sync::Arc;

pub mod file;
pub mod stub;

pub use file::FileRepository;
pub use stub::StubRepository;

/// A backend error while resolving a reference number.
///
/// The cause is a short description for the caller, never a full internal trace.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{cause}")]
pub struct LookupFailure {
    pub cause: String,
}

impl LookupFailure {
    pub fn new(cause: impl Into<String>) -> Self {
        Self {
            cause: cause.into(),
        }
    }
}

/// Resolves a reference number to zero, one or many purchase orders.
///
/// Calls are synchronous and may block. Implementations own their own concurrency safety and any
/// timeout policy. The order of multiple matches carries no meaning.
pub trait PurchaseOrderLookup: Send + Sync {
    /// Finds every purchase order with the given reference number.
    ///
    /// # Errors
    ///
    /// Returns a [`LookupFailure`] on any backend error (connectivity, driver, query).
    fn find_by_reference(
        &self,
        reference: &ReferenceNumber,
    ) -> Result<Vec<PurchaseOrderRecord>, LookupFailure>;

    /// Whether the backend is currently reachable.
    fn is_healthy(&self) -> bool {
        true
    }
}

impl<T: PurchaseOrderLookup + ?Sized> PurchaseOrderLookup for Arc<T> {
    fn find_by_reference(
        &self,
        reference: &ReferenceNumber,
    ) -> Result<Vec<PurchaseOrderRecord>, LookupFailure> {
        (**self).find_by_reference(reference)
    }

    fn is_healthy(&self) -> bool {
        (**self).is_healthy()
    }
}

/// Opens the store selected by configuration.
///
/// # Arguments
/// * `config` - Store selection resolved at startup
///
/// # Returns
/// A shared lookup handle for the request handlers.
///
/// # Errors
///
/// Returns the loading error of a file-backed store.
pub fn open_store(config: &StoreConfig) -> ValidatorResult<Arc<dyn PurchaseOrderLookup>> {
    match config {
        StoreConfig::Stub => {
            tracing::info!("using stub purchase-order store");
            Ok(Arc::new(StubRepository::new()))
        }
        StoreConfig::File(path) => Ok(Arc::new(FileRepository::load(path)?)),
    }
}
