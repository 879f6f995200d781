//! Contact details and visitor messages.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use serde_json::json;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::{Validate, ValidationError};

use super::{blank_as_none, min_chars, one_of, to_row, Entity};
use crate::storage::{OrderBy, Row, Table};

/// A way to reach the owner, listed in the contact section.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ContactInfo {
    pub id: Uuid,
    /// "email", "phone" or "location".
    #[serde(rename = "type")]
    pub kind: String,
    pub label: String,
    pub value: String,
    pub href: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate, ToSchema)]
pub struct ContactInfoForm {
    #[serde(rename = "type", default)]
    #[validate(custom(function = "validate_contact_kind"))]
    pub kind: String,
    #[serde(default)]
    #[validate(custom(function = "validate_label"))]
    pub label: String,
    #[serde(default)]
    #[validate(custom(function = "validate_value"))]
    pub value: String,
    #[serde(default, deserialize_with = "blank_as_none")]
    pub href: Option<String>,
}

fn validate_contact_kind(value: &str) -> Result<(), ValidationError> {
    one_of(
        value,
        &["email", "phone", "location"],
        "Type must be email, phone or location",
    )
}

impl Entity for ContactInfo {
    const TABLE: Table = Table::ContactInfo;
    const LABEL: &'static str = "Contact info";
    const ORDER: &'static [OrderBy] = &[OrderBy::asc("created_at")];

    type Form = ContactInfoForm;

    fn id(&self) -> Uuid {
        self.id
    }

    fn fields(form: ContactInfoForm) -> Row {
        to_row(json!({
            "type": form.kind,
            "label": form.label.trim(),
            "value": form.value.trim(),
            "href": form.href,
        }))
    }
}

/// A message left through the public contact form.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ContactSubmission {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub message: String,
    pub created_at: DateTime<Utc>,
}

impl ContactSubmission {
    /// Received within the last 24 hours.
    pub fn is_recent(&self, now: DateTime<Utc>) -> bool {
        now - self.created_at < Duration::hours(24)
    }
}

/// Public contact form.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate, ToSchema)]
pub struct ContactSubmissionForm {
    #[serde(default)]
    #[validate(custom(function = "validate_name"))]
    pub name: String,
    #[serde(default)]
    #[validate(email(message = "Please enter a valid email address"))]
    pub email: String,
    #[serde(default)]
    #[validate(custom(function = "validate_message"))]
    pub message: String,
}

impl ContactSubmissionForm {
    pub fn into_row(self) -> Row {
        to_row(json!({
            "name": self.name.trim(),
            "email": self.email.trim(),
            "message": self.message.trim(),
        }))
    }
}

/// A submission as listed in the admin inbox.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct InboxMessage {
    #[serde(flatten)]
    pub submission: ContactSubmission,
    pub is_recent: bool,
}

impl InboxMessage {
    pub fn new(submission: ContactSubmission, now: DateTime<Utc>) -> Self {
        let is_recent = submission.is_recent(now);
        Self {
            submission,
            is_recent,
        }
    }
}

fn validate_label(value: &str) -> Result<(), ValidationError> {
    min_chars(value, 1, "Label is required")
}

fn validate_value(value: &str) -> Result<(), ValidationError> {
    min_chars(value, 1, "Value is required")
}

fn validate_name(value: &str) -> Result<(), ValidationError> {
    min_chars(value, 2, "Name must be at least 2 characters")
}

fn validate_message(value: &str) -> Result<(), ValidationError> {
    min_chars(value, 10, "Message must be at least 10 characters")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn submission(age: Duration) -> ContactSubmission {
        ContactSubmission {
            id: Uuid::new_v4(),
            name: "Ada".into(),
            email: "ada@example.com".into(),
            message: "Hello there, nice site".into(),
            created_at: Utc::now() - age,
        }
    }

    #[test]
    fn test_is_recent() {
        let now = Utc::now();
        assert!(submission(Duration::hours(2)).is_recent(now));
        assert!(!submission(Duration::hours(25)).is_recent(now));
    }

    #[test]
    fn test_inbox_message_serializes_flat() {
        let message = InboxMessage::new(submission(Duration::minutes(5)), Utc::now());
        let value = serde_json::to_value(&message).unwrap();
        assert_eq!(value["name"], json!("Ada"));
        assert_eq!(value["is_recent"], json!(true));
    }

    #[test]
    fn test_contact_form_validation() {
        let form = ContactSubmissionForm {
            name: "A".into(),
            email: "not-an-email".into(),
            message: "hi".into(),
        };
        let errors = form.validate().unwrap_err();
        let fields = errors.field_errors();
        assert_eq!(fields.len(), 3);
    }

    #[test]
    fn test_contact_info_kind() {
        let form = ContactInfoForm {
            kind: "fax".into(),
            label: "Fax".into(),
            value: "123".into(),
            href: None,
        };
        assert_eq!(form.validate().unwrap_err().field_errors().len(), 1);
    }
}
