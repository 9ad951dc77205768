//! OpenDock webhook payload.
//!
//! The payload is a passive data holder. Decoding never validates: a field of the wrong JSON type,
//! or a fields block that is not an object, is held as `None` and left for the pipeline to judge.
//! Only a body that is not a JSON object at all is refused here.
//!
//! Example payload:
//!
//! ```json
//! {
//!   "action": "create",
//!   "appointmentFields": { "refNumber": "PO12345", "start": "2024-03-15T10:00:00Z", "status": "Scheduled" },
//!   "existingAppointment": { "refNumber": "PO12345" }
//! }
//! ```

use crate::constants::{ACTION_CREATE, ACTION_UPDATE, CANCELLED_STATUSES};
use serde::Deserialize;
use serde_json::Value;
use utoipa::ToSchema;

#[derive(Debug, thiserror::Error)]
pub enum PayloadError {
    #[error("missing request body")]
    Missing,
    #[error("invalid JSON: {0}")]
    InvalidJson(#[from] serde_json::Error),
    #[error("request body must be a JSON object")]
    NotAnObject,
}

/// The kind of change OpenDock is asking to make.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Create,
    Update,
    Unrecognized,
}

impl Action {
    /// Classifies a raw action value, ignoring ASCII case.
    pub fn from_raw(raw: &str) -> Self {
        if raw.eq_ignore_ascii_case(ACTION_CREATE) {
            Action::Create
        } else if raw.eq_ignore_ascii_case(ACTION_UPDATE) {
            Action::Update
        } else {
            Action::Unrecognized
        }
    }
}

/// An incoming appointment change as sent by the scheduling platform.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct WebhookRequest {
    /// `create` or `update`.
    #[serde(default, deserialize_with = "lenient::string")]
    pub action: Option<String>,
    /// New or updated appointment data.
    #[serde(default, deserialize_with = "lenient::fields")]
    pub appointment_fields: Option<AppointmentFields>,
    /// Previous appointment data, sent with updates.
    #[serde(default, deserialize_with = "lenient::fields")]
    pub existing_appointment: Option<AppointmentFields>,
}

/// One appointment fields block. Only `refNumber`, `status` and `start` feed decisions.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AppointmentFields {
    #[serde(default, deserialize_with = "lenient::string")]
    pub ref_number: Option<String>,
    /// ISO 8601 start, e.g. `2024-03-15T10:00:00Z`.
    #[serde(default, deserialize_with = "lenient::string")]
    pub start: Option<String>,
    #[serde(default, deserialize_with = "lenient::string")]
    pub end: Option<String>,
    #[serde(default, deserialize_with = "lenient::string")]
    pub load_type_id: Option<String>,
    /// Free text such as `Scheduled` or `Cancelled`.
    #[serde(default, deserialize_with = "lenient::string")]
    pub status: Option<String>,
    #[serde(default, deserialize_with = "lenient::string")]
    pub dock_id: Option<String>,
    #[serde(default, deserialize_with = "lenient::string")]
    pub warehouse_id: Option<String>,
}

impl WebhookRequest {
    /// Decodes a raw request body.
    ///
    /// # Errors
    ///
    /// Returns [`PayloadError::Missing`] for an empty body or a JSON `null`,
    /// [`PayloadError::InvalidJson`] when the bytes are not JSON, and
    /// [`PayloadError::NotAnObject`] for any other top-level JSON value.
    pub fn from_slice(body: &[u8]) -> Result<Self, PayloadError> {
        if body.iter().all(u8::is_ascii_whitespace) {
            return Err(PayloadError::Missing);
        }

        match serde_json::from_slice::<Value>(body)? {
            Value::Null => Err(PayloadError::Missing),
            value @ Value::Object(_) => Ok(serde_json::from_value(value)?),
            _ => Err(PayloadError::NotAnObject),
        }
    }

    /// The classified action, or `None` when the action is absent or empty.
    pub fn action(&self) -> Option<Action> {
        self.action
            .as_deref()
            .filter(|a| !a.is_empty())
            .map(Action::from_raw)
    }
}

impl AppointmentFields {
    /// Returns true if the status marks the appointment as cancelled.
    pub fn is_cancelled(&self) -> bool {
        self.status.as_deref().is_some_and(|status| {
            CANCELLED_STATUSES
                .iter()
                .any(|c| status.eq_ignore_ascii_case(c))
        })
    }

    /// The reference number, if present and non-empty.
    pub fn reference(&self) -> Option<&str> {
        self.ref_number.as_deref().filter(|r| !r.is_empty())
    }
}

mod lenient {
    use super::AppointmentFields;
    use serde::{Deserialize, Deserializer};
    use serde_json::Value;

    pub(super) fn string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
    where
        D: Deserializer<'de>,
    {
        Ok(match Value::deserialize(deserializer)? {
            Value::String(s) => Some(s),
            _ => None,
        })
    }

    pub(super) fn fields<'de, D>(deserializer: D) -> Result<Option<AppointmentFields>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = Value::deserialize(deserializer)?;
        if !value.is_object() {
            return Ok(None);
        }
        Ok(serde_json::from_value(value).ok())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decodes_full_payload() {
        let body = br#"{
            "action": "create",
            "appointmentFields": {
                "refNumber": "PO12345",
                "start": "2024-03-15T10:00:00Z",
                "status": "Scheduled",
                "dockId": "dock-1"
            },
            "existingAppointment": { "refNumber": "PO99999" },
            "someOtherField": [1, 2, 3]
        }"#;

        let req = WebhookRequest::from_slice(body).unwrap();
        let fields = req.appointment_fields.as_ref().unwrap();

        assert_eq!(req.action(), Some(Action::Create));
        assert_eq!(fields.ref_number.as_deref(), Some("PO12345"));
        assert_eq!(fields.start.as_deref(), Some("2024-03-15T10:00:00Z"));
        assert_eq!(fields.dock_id.as_deref(), Some("dock-1"));
        assert_eq!(
            req.existing_appointment.unwrap().ref_number.as_deref(),
            Some("PO99999")
        );
    }

    #[test]
    fn test_wrong_types_are_absent_not_errors() {
        let body = br#"{
            "action": 7,
            "appointmentFields": { "refNumber": 12345, "status": null },
            "existingAppointment": "not-an-object"
        }"#;

        let req = WebhookRequest::from_slice(body).unwrap();

        assert_eq!(req.action, None);
        assert_eq!(req.appointment_fields, Some(AppointmentFields::default()));
        assert_eq!(req.existing_appointment, None);
    }

    #[test]
    fn test_empty_object_decodes_to_all_absent() {
        let req = WebhookRequest::from_slice(b"{}").unwrap();
        assert_eq!(req, WebhookRequest::default());
    }

    #[test]
    fn test_missing_body() {
        assert!(matches!(
            WebhookRequest::from_slice(b""),
            Err(PayloadError::Missing)
        ));
        assert!(matches!(
            WebhookRequest::from_slice(b"  \n"),
            Err(PayloadError::Missing)
        ));
        assert!(matches!(
            WebhookRequest::from_slice(b"null"),
            Err(PayloadError::Missing)
        ));
    }

    #[test]
    fn test_invalid_json() {
        let err = WebhookRequest::from_slice(b"{\"action\": ").unwrap_err();

        assert!(matches!(err, PayloadError::InvalidJson(_)));
        assert!(err.to_string().starts_with("invalid JSON: "));
    }

    #[test]
    fn test_non_object_body() {
        let bodies: [&[u8]; 4] = [b"[1, 2]", b"\"create\"", b"42", b"true"];
        for body in bodies {
            assert!(matches!(
                WebhookRequest::from_slice(body),
                Err(PayloadError::NotAnObject)
            ));
        }
    }

    #[test]
    fn test_action_classification() {
        assert_eq!(Action::from_raw("CREATE"), Action::Create);
        assert_eq!(Action::from_raw("Update"), Action::Update);
        assert_eq!(Action::from_raw("delete"), Action::Unrecognized);

        let req = WebhookRequest {
            action: Some(String::new()),
            ..Default::default()
        };
        assert_eq!(req.action(), None);
    }

    #[test]
    fn test_is_cancelled_spellings() {
        let with_status = |s: &str| AppointmentFields {
            status: Some(s.into()),
            ..Default::default()
        };

        assert!(with_status("cancelled").is_cancelled());
        assert!(with_status("Canceled").is_cancelled());
        assert!(with_status("CANCELLED").is_cancelled());
        assert!(!with_status("Scheduled").is_cancelled());
        assert!(!with_status("cancel").is_cancelled());
        assert!(!AppointmentFields::default().is_cancelled());
    }
}
