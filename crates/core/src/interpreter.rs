//! Extracts the decision facts from a webhook payload.

use crate::webhook::{Action, WebhookRequest};

/// What the pipeline needs to know about a request, and nothing else.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestFacts {
    /// An update whose new status is cancelled or canceled.
    pub is_cancellation: bool,
    /// From `appointmentFields`, falling back to `existingAppointment`; `None` if both are empty.
    pub reference_number: Option<String>,
    /// Both `action` and `appointmentFields` are present.
    pub has_required_shape: bool,
}

/// Derives [`RequestFacts`] from a decoded payload.
///
/// # Arguments
/// * `request` - Decoded webhook payload
///
/// # Returns
/// The facts; absent or empty fields degrade to `None` or `false`, never to an error.
pub fn interpret(request: &WebhookRequest) -> RequestFacts {
    let action = request.action();
    let new_fields = request.appointment_fields.as_ref();

    let has_required_shape = action.is_some() && new_fields.is_some();

    let is_cancellation =
        action == Some(Action::Update) && new_fields.is_some_and(|f| f.is_cancelled());

    let reference_number = new_fields
        .and_then(|f| f.reference())
        .or_else(|| {
            request
                .existing_appointment
                .as_ref()
                .and_then(|f| f.reference())
        })
        .map(str::to_owned);

    RequestFacts {
        is_cancellation,
        reference_number,
        has_required_shape,
    }
}
