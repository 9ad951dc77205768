//! Business rules applied to a uniquely matched purchase order.
//!
//! This is the extension point of the pipeline. Rules run in order after the lookup has produced
//! exactly one record, and the first failing rule decides the outcome. No rule is enforced by
//! default; [`BusinessRules::from_names`] switches individual rules on from configuration.
//!
//! Cancellations never reach this stage.

use crate::error::{ValidatorError, ValidatorResult};
use crate::purchase_order::PurchaseOrderRecord;
use crate::webhook::WebhookRequest;
use chrono::NaiveDate;
use std::fmt;

/// A single check against the matched purchase order.
pub trait BusinessRule: Send + Sync {
    /// Stable name used in configuration.
    fn name(&self) -> &'static str;

    /// Returns `Err` with a message for the scheduler when the request breaks the rule.
    fn check(&self, request: &WebhookRequest, order: &PurchaseOrderRecord) -> Result<(), String>;
}

/// Only open, active or pending orders may be scheduled.
#[derive(Debug, Clone, Copy, Default)]
pub struct OpenStatusRule;

impl OpenStatusRule {
    pub const NAME: &'static str = "open_status";
}

impl BusinessRule for OpenStatusRule {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn check(&self, _request: &WebhookRequest, order: &PurchaseOrderRecord) -> Result<(), String> {
        if order.is_open() {
            return Ok(());
        }
        Err(format!(
            "reference {} has status '{}' and is not available for scheduling; only open orders can be scheduled",
            order.reference_number, order.status
        ))
    }
}

/// Appointments may not start before the order's expected delivery date.
///
/// Skipped when either date is missing or the appointment start cannot be read.
#[derive(Debug, Clone, Copy, Default)]
pub struct ExpectedDateRule;

impl ExpectedDateRule {
    pub const NAME: &'static str = "expected_date";
}

impl BusinessRule for ExpectedDateRule {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn check(&self, request: &WebhookRequest, order: &PurchaseOrderRecord) -> Result<(), String> {
        let Some(expected) = order.expected_date else {
            return Ok(());
        };
        let appointment = request
            .appointment_fields
            .as_ref()
            .and_then(|f| f.start.as_deref())
            .and_then(parse_appointment_date);

        match appointment {
            Some(date) if date < expected => Err(format!(
                "appointment must be on or after the expected delivery date {} for reference {}",
                expected, order.reference_number
            )),
            _ => Ok(()),
        }
    }
}

/// Reads the calendar date of an ISO 8601 date or date-time.
fn parse_appointment_date(start: &str) -> Option<NaiveDate> {
    let date_part = match start.split_once('T') {
        Some((date, _)) => date,
        None => start,
    };
    NaiveDate::parse_from_str(date_part, "%Y-%m-%d").ok()
}

/// The ordered set of enabled rules.
#[derive(Default)]
pub struct BusinessRules {
    rules: Vec<Box<dyn BusinessRule>>,
}

impl BusinessRules {
    /// No rules: every uniquely matched order is accepted.
    pub fn none() -> Self {
        Self::default()
    }

    /// Builds the rule set from configured names, keeping their order.
    ///
    /// # Errors
    ///
    /// Returns [`ValidatorError::UnknownRule`] for a name that matches no rule.
    pub fn from_names<S: AsRef<str>>(names: &[S]) -> ValidatorResult<Self> {
        let mut rules = Self::none();
        for name in names {
            let rule: Box<dyn BusinessRule> = match name.as_ref() {
                OpenStatusRule::NAME => Box::new(OpenStatusRule),
                ExpectedDateRule::NAME => Box::new(ExpectedDateRule),
                other => return Err(ValidatorError::UnknownRule(other.to_string())),
            };
            rules = rules.with_rule(rule);
        }
        Ok(rules)
    }

    pub fn with_rule(mut self, rule: Box<dyn BusinessRule>) -> Self {
        self.rules.push(rule);
        self
    }

    /// Runs every rule in order and returns the first violation message.
    pub fn first_violation(
        &self,
        request: &WebhookRequest,
        order: &PurchaseOrderRecord,
    ) -> Option<String> {
        self.rules.iter().find_map(|rule| {
            rule.check(request, order)
                .err()
                .inspect(|_| tracing::info!("business rule '{}' rejected the request", rule.name()))
        })
    }

    pub fn names(&self) -> Vec<&'static str> {
        self.rules.iter().map(|r| r.name()).collect()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

impl fmt::Debug for BusinessRules {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.names()).finish()
    }
}
