//! In-memory stand-in for the enterprise purchase-order database.
//!
//! Canned references:
//! - `PO-001` through `PO-010`: one open order each
//! - `NOTFOUND` (any case): no orders
//! - `MULTI`: two orders
//! - `ERROR` (any case): simulated backend failure
//! - anything else: one generic open order
//!
//! Canned orders are dated when the stub is built; generic orders are dated on each lookup.

use super::{LookupFailure, PurchaseOrderLookup};
use crate::constants::STUB_LOCATION_CODE;
use crate::purchase_order::PurchaseOrderRecord;
use crate::validation::ReferenceNumber;
use chrono::{Days, NaiveDate};
use std::collections::HashMap;

const SIMULATED_ERROR_REFERENCE: &str = "ERROR";
const NOT_FOUND_REFERENCE: &str = "NOTFOUND";

#[derive(Debug, Clone)]
pub struct StubRepository {
    /// `None` follows the local clock.
    fixed_today: Option<NaiveDate>,
    canned: HashMap<String, Vec<PurchaseOrderRecord>>,
}

impl StubRepository {
    /// Creates a stub whose order and expected dates are relative to the local date.
    pub fn new() -> Self {
        Self {
            fixed_today: None,
            ..Self::with_today(local_today())
        }
    }

    /// Creates a stub with a fixed notion of today.
    pub fn with_today(today: NaiveDate) -> Self {
        let mut canned = HashMap::new();

        for i in 1..=10 {
            let reference = format!("PO-{i:03}");
            let record = mock_order(today, &reference, &format!("ACME Supplier {i}"), "Open");
            canned.insert(reference, vec![record]);
        }

        canned.insert(NOT_FOUND_REFERENCE.to_string(), Vec::new());
        canned.insert(
            "MULTI".to_string(),
            vec![
                mock_order(today, "MULTI", "Vendor A", "Open"),
                mock_order(today, "MULTI", "Vendor B", "Pending"),
            ],
        );

        Self {
            fixed_today: Some(today),
            canned,
        }
    }

    fn today(&self) -> NaiveDate {
        self.fixed_today.unwrap_or_else(local_today)
    }
}

impl Default for StubRepository {
    fn default() -> Self {
        Self::new()
    }
}

impl PurchaseOrderLookup for StubRepository {
    fn find_by_reference(
        &self,
        reference: &ReferenceNumber,
    ) -> Result<Vec<PurchaseOrderRecord>, LookupFailure> {
        tracing::debug!("stub lookup for reference {}", reference);

        if reference
            .as_str()
            .eq_ignore_ascii_case(SIMULATED_ERROR_REFERENCE)
        {
            return Err(LookupFailure::new("simulated database connection error"));
        }

        if let Some(records) = self.canned.get(reference.as_str()) {
            tracing::debug!("stub found {} record(s) for {}", records.len(), reference);
            return Ok(records.clone());
        }

        if reference.as_str().eq_ignore_ascii_case(NOT_FOUND_REFERENCE) {
            return Ok(Vec::new());
        }

        tracing::debug!("stub created generic order for {}", reference);
        Ok(vec![mock_order(
            self.today(),
            reference.as_str(),
            "Generic Vendor",
            "Open",
        )])
    }
}

fn local_today() -> NaiveDate {
    chrono::Local::now().date_naive()
}

fn mock_order(
    today: NaiveDate,
    reference: &str,
    vendor_name: &str,
    status: &str,
) -> PurchaseOrderRecord {
    PurchaseOrderRecord {
        reference_number: reference.to_string(),
        vendor_id: format!("V-{reference}"),
        vendor_name: vendor_name.to_string(),
        order_date: today.checked_sub_days(Days::new(7)),
        expected_date: today.checked_add_days(Days::new(3)),
        status: status.to_string(),
        location_code: STUB_LOCATION_CODE.to_string(),
    }
}
