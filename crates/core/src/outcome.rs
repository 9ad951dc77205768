//! Validation outcomes.
//!
//! Every call to the pipeline ends in exactly one [`Outcome`]. Rejections are ordinary values,
//! not errors: the category says why, the message says it in words a scheduler can act on.

use std::fmt;

/// Whether the appointment change may go ahead.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Classification {
    Accepted,
    Rejected,
}

/// Why an outcome was reached.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutcomeCategory {
    MalformedRequest,
    NotFound,
    AmbiguousMatch,
    LookupUnavailable,
    BusinessRuleViolation,
    Accepted,
}

impl OutcomeCategory {
    /// The HTTP status code the transport must answer with.
    pub fn status_code(self) -> u16 {
        match self {
            OutcomeCategory::Accepted => 200,
            OutcomeCategory::MalformedRequest => 400,
            OutcomeCategory::NotFound => 404,
            OutcomeCategory::AmbiguousMatch => 409,
            OutcomeCategory::LookupUnavailable => 503,
            OutcomeCategory::BusinessRuleViolation => 400,
        }
    }

    /// Only backend outages are worth retrying.
    pub fn is_retryable(self) -> bool {
        matches!(self, OutcomeCategory::LookupUnavailable)
    }
}

impl fmt::Display for OutcomeCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            OutcomeCategory::MalformedRequest => "malformed_request",
            OutcomeCategory::NotFound => "not_found",
            OutcomeCategory::AmbiguousMatch => "ambiguous_match",
            OutcomeCategory::LookupUnavailable => "lookup_unavailable",
            OutcomeCategory::BusinessRuleViolation => "business_rule_violation",
            OutcomeCategory::Accepted => "accepted",
        };
        f.write_str(name)
    }
}

/// The terminal result of one validation call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Outcome {
    category: OutcomeCategory,
    message: String,
}

impl Outcome {
    pub fn accepted(message: impl Into<String>) -> Self {
        Self::new(OutcomeCategory::Accepted, message)
    }

    pub fn malformed(message: impl Into<String>) -> Self {
        Self::new(OutcomeCategory::MalformedRequest, message)
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(OutcomeCategory::NotFound, message)
    }

    pub fn ambiguous(message: impl Into<String>) -> Self {
        Self::new(OutcomeCategory::AmbiguousMatch, message)
    }

    pub fn lookup_unavailable(message: impl Into<String>) -> Self {
        Self::new(OutcomeCategory::LookupUnavailable, message)
    }

    pub fn rule_violation(message: impl Into<String>) -> Self {
        Self::new(OutcomeCategory::BusinessRuleViolation, message)
    }

    fn new(category: OutcomeCategory, message: impl Into<String>) -> Self {
        Self {
            category,
            message: message.into(),
        }
    }

    /// Accepted exactly when the category is [`OutcomeCategory::Accepted`].
    pub fn classification(&self) -> Classification {
        match self.category {
            OutcomeCategory::Accepted => Classification::Accepted,
            _ => Classification::Rejected,
        }
    }

    pub fn is_accepted(&self) -> bool {
        self.classification() == Classification::Accepted
    }

    pub fn category(&self) -> OutcomeCategory {
        self.category
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn status_code(&self) -> u16 {
        self.category.status_code()
    }
}
