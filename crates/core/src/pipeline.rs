//! The validation decision pipeline.
//!
//! Checks run in a fixed order and the first terminal result wins:
//!
//! 1. required shape (`action` and `appointmentFields` present)
//! 2. cancellation bypass
//! 3. reference number present
//! 4. reference number format
//! 5. purchase-order lookup (at most one call)
//! 6. business rules
//!
//! The cancellation bypass sits before every reference check, so a cancelled appointment is
//! accepted even when its reference number is missing or malformed, and the store is never asked.

use crate::interpreter::interpret;
use crate::outcome::Outcome;
use crate::repositories::PurchaseOrderLookup;
use crate::rules::BusinessRules;
use crate::validation::ReferenceNumber;
use crate::webhook::WebhookRequest;

/// Decides whether an appointment change may be confirmed.
///
/// Holds no per-request state, so one pipeline can serve concurrent requests.
#[derive(Debug, Default)]
pub struct ValidationPipeline {
    rules: BusinessRules,
}

impl ValidationPipeline {
    pub fn new(rules: BusinessRules) -> Self {
        Self { rules }
    }

    pub fn rules(&self) -> &BusinessRules {
        &self.rules
    }

    /// Evaluates one decoded request against the purchase-order store.
    ///
    /// # Arguments
    /// * `request` - Decoded webhook payload, possibly with missing sub-fields
    /// * `lookup` - Purchase-order store; called at most once
    ///
    /// # Returns
    /// The terminal [`Outcome`]. Backend failures become `LookupUnavailable` rather than errors.
    pub fn evaluate(&self, request: &WebhookRequest, lookup: &dyn PurchaseOrderLookup) -> Outcome {
        let facts = interpret(request);

        if !facts.has_required_shape {
            return Outcome::malformed("missing action or newFields");
        }

        if facts.is_cancellation {
            tracing::info!("cancellation accepted without lookup");
            return Outcome::accepted("cancellations are always permitted");
        }

        let Some(raw_reference) = facts.reference_number else {
            return Outcome::malformed("missing reference number");
        };

        let reference = match ReferenceNumber::parse(&raw_reference) {
            Ok(reference) => reference,
            Err(e) => {
                tracing::debug!("reference {:?} rejected: {}", raw_reference, e);
                return Outcome::malformed(format!(
                    "invalid reference number format: {raw_reference}"
                ));
            }
        };

        let mut orders = match lookup.find_by_reference(&reference) {
            Ok(orders) => orders,
            Err(failure) => {
                tracing::warn!("purchase-order lookup failed for {}: {}", reference, failure);
                return Outcome::lookup_unavailable(format!("backend error: {}", failure.cause));
            }
        };

        if orders.len() > 1 {
            return Outcome::ambiguous(format!(
                "multiple records found for reference {reference}"
            ));
        }
        let Some(order) = orders.pop() else {
            return Outcome::not_found(format!("no record found for reference {reference}"));
        };

        // Extension point: enabled business rules run here, after a unique match.
        if let Some(violation) = self.rules.first_violation(request, &order) {
            return Outcome::rule_violation(violation);
        }

        Outcome::accepted(format!("reference {reference} is valid"))
    }
}
