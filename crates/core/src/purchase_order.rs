use crate::constants::OPEN_ORDER_STATUSES;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// A purchase order as held by the enterprise system.
///
/// Records are snapshots owned by the store; the pipeline only reads them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PurchaseOrderRecord {
    pub reference_number: String,
    #[serde(default)]
    pub vendor_id: String,
    #[serde(default)]
    pub vendor_name: String,
    #[serde(default)]
    pub order_date: Option<NaiveDate>,
    #[serde(default)]
    pub expected_date: Option<NaiveDate>,
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub location_code: String,
}

impl PurchaseOrderRecord {
    /// Returns true if the order status is `open`, `active` or `pending` (any case).
    pub fn is_open(&self) -> bool {
        OPEN_ORDER_STATUSES
            .iter()
            .any(|s| self.status.eq_ignore_ascii_case(s))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(status: &str) -> PurchaseOrderRecord {
        PurchaseOrderRecord {
            reference_number: "PO-001".into(),
            vendor_id: "V1".into(),
            vendor_name: "ACME".into(),
            order_date: None,
            expected_date: None,
            status: status.into(),
            location_code: "CRS-WH1".into(),
        }
    }

    #[test]
    fn test_is_open_statuses() {
        for status in ["Open", "ACTIVE", "pending"] {
            assert!(record(status).is_open(), "{status} should be open");
        }
        for status in ["Closed", "Cancelled", "", "opened"] {
            assert!(!record(status).is_open(), "{status} should not be open");
        }
    }

    #[test]
    fn test_deserialize_with_defaults() {
        let yaml = "reference_number: PO-777\nexpected_date: 2024-03-15\n";
        let parsed: PurchaseOrderRecord = serde_yaml::from_str(yaml).unwrap();

        assert_eq!(parsed.reference_number, "PO-777");
        assert_eq!(
            parsed.expected_date,
            NaiveDate::from_ymd_opt(2024, 3, 15)
        );
        assert_eq!(parsed.status, "");
        assert!(!parsed.is_open());
    }
}
