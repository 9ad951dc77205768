//! Purchase orders loaded from a YAML file at startup.
//!
//! The file is a plain list of records:
//!
//! ```yaml
//! - reference_number: PO-1001
//!   vendor_id: V100
//!   vendor_name: ACME Supplier
//!   order_date: 2024-03-01
//!   expected_date: 2024-03-15
//!   status: Open
//!   location_code: CRS-WH1
//! ```
//!
//! Duplicate reference numbers are kept, so the pipeline sees them as an ambiguous match.

use super::{LookupFailure, PurchaseOrderLookup};
use crate::error::{ValidatorError, ValidatorResult};
use crate::purchase_order::PurchaseOrderRecord;
use crate::validation::ReferenceNumber;
use std::collections::HashMap;
use std::path::Path;

#[derive(Debug, Clone, Default)]
pub struct FileRepository {
    by_reference: HashMap<String, Vec<PurchaseOrderRecord>>,
}

impl FileRepository {
    /// Reads and indexes the store file at `path`.
    ///
    /// # Errors
    ///
    /// Returns [`ValidatorError::StoreRead`] if the file cannot be read and
    /// [`ValidatorError::StoreParse`] if it is not a YAML list of records.
    pub fn load(path: &Path) -> ValidatorResult<Self> {
        let contents = std::fs::read_to_string(path).map_err(|source| ValidatorError::StoreRead {
            path: path.to_path_buf(),
            source,
        })?;
        let records: Vec<PurchaseOrderRecord> =
            serde_yaml::from_str(&contents).map_err(|source| ValidatorError::StoreParse {
                path: path.to_path_buf(),
                source,
            })?;

        let repo = Self::from_records(records);
        if repo.is_empty() {
            tracing::warn!("purchase-order store {} holds no records", path.display());
        } else {
            tracing::info!(
                "loaded {} purchase order(s) from {}",
                repo.len(),
                path.display()
            );
        }
        Ok(repo)
    }

    pub fn from_records(records: impl IntoIterator<Item = PurchaseOrderRecord>) -> Self {
        let mut by_reference: HashMap<String, Vec<PurchaseOrderRecord>> = HashMap::new();
        for record in records {
            by_reference
                .entry(record.reference_number.clone())
                .or_default()
                .push(record);
        }
        Self { by_reference }
    }

    pub fn len(&self) -> usize {
        self.by_reference.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.by_reference.is_empty()
    }
}

impl PurchaseOrderLookup for FileRepository {
    fn find_by_reference(
        &self,
        reference: &ReferenceNumber,
    ) -> Result<Vec<PurchaseOrderRecord>, LookupFailure> {
        let records = self
            .by_reference
            .get(reference.as_str())
            .cloned()
            .unwrap_or_default();
        tracing::debug!("file store found {} record(s) for {}", records.len(), reference);
        Ok(records)
    }
}
