//! Work experience timeline entries.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::json;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::{Validate, ValidationError};

use super::{blank_as_none, end_date_for, min_chars, to_row, Entity};
use crate::storage::{OrderBy, Row, Table};

/// A position held at a company.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct Experience {
    pub id: Uuid,
    pub company: String,
    pub position: String,
    pub description: Option<String>,
    pub location: Option<String>,
    pub start_date: String,
    /// Always empty while `is_current` is set.
    pub end_date: Option<String>,
    #[serde(default)]
    pub is_current: bool,
    #[serde(default)]
    pub sort_order: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate, ToSchema)]
pub struct ExperienceForm {
    #[serde(default)]
    #[validate(custom(function = "validate_company"))]
    pub company: String,
    #[serde(default)]
    #[validate(custom(function = "validate_position"))]
    pub position: String,
    #[serde(default, deserialize_with = "blank_as_none")]
    pub description: Option<String>,
    #[serde(default, deserialize_with = "blank_as_none")]
    pub location: Option<String>,
    #[serde(default)]
    #[validate(custom(function = "validate_start_date"))]
    pub start_date: String,
    #[serde(default, deserialize_with = "blank_as_none")]
    pub end_date: Option<String>,
    #[serde(default)]
    pub is_current: bool,
}

impl Entity for Experience {
    const TABLE: Table = Table::Experiences;
    const LABEL: &'static str = "Experience";
    const ORDER: &'static [OrderBy] = &[OrderBy::asc("sort_order")];

    type Form = ExperienceForm;

    fn id(&self) -> Uuid {
        self.id
    }

    fn fields(form: ExperienceForm) -> Row {
        to_row(json!({
            "company": form.company.trim(),
            "position": form.position.trim(),
            "description": form.description,
            "location": form.location,
            "start_date": form.start_date.trim(),
            "end_date": end_date_for(form.is_current, form.end_date),
            "is_current": form.is_current,
        }))
    }
}

fn validate_company(value: &str) -> Result<(), ValidationError> {
    min_chars(value, 2, "Company must be at least 2 characters")
}

fn validate_position(value: &str) -> Result<(), ValidationError> {
    min_chars(value, 2, "Position must be at least 2 characters")
}

fn validate_start_date(value: &str) -> Result<(), ValidationError> {
    min_chars(value, 1, "Start date is required")
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::Value;

    #[test]
    fn test_current_position_has_no_end_date() {
        let form = ExperienceForm {
            company: "Acme".into(),
            position: "Engineer".into(),
            start_date: "2022-01".into(),
            end_date: Some("2023-06".into()),
            is_current: true,
            ..Default::default()
        };
        let row = Experience::fields(form);
        assert_eq!(row["end_date"], Value::Null);
        assert_eq!(row["is_current"], json!(true));
    }

    #[test]
    fn test_start_date_required() {
        let form = ExperienceForm {
            company: "Acme".into(),
            position: "Engineer".into(),
            ..Default::default()
        };
        let errors = form.validate().unwrap_err();
        assert!(errors.field_errors().contains_key("start_date"));
    }

    #[test]
    fn test_missing_keys_fail_validation_not_parsing() {
        let form: ExperienceForm = serde_json::from_value(json!({ "company": " Acme " })).unwrap();
        let errors = form.validate().unwrap_err();
        let fields = errors.field_errors();
        assert!(!fields.contains_key("company"));
        assert!(fields.contains_key("position"));
        assert!(fields.contains_key("start_date"));
    }
}
