//! Education timeline entries.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::json;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::{Validate, ValidationError};

use super::{blank_as_none, end_date_for, min_chars, to_row, Entity};
use crate::storage::{OrderBy, Row, Table};

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct Education {
    pub id: Uuid,
    pub institution: String,
    pub degree: String,
    pub field_of_study: Option<String>,
    pub gpa: Option<String>,
    pub description: Option<String>,
    pub start_date: String,
    pub end_date: Option<String>,
    #[serde(default)]
    pub is_current: bool,
    #[serde(default)]
    pub sort_order: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate, ToSchema)]
pub struct EducationForm {
    #[serde(default)]
    #[validate(custom(function = "validate_institution"))]
    pub institution: String,
    #[serde(default)]
    #[validate(custom(function = "validate_degree"))]
    pub degree: String,
    #[serde(default, deserialize_with = "blank_as_none")]
    pub field_of_study: Option<String>,
    #[serde(default, deserialize_with = "blank_as_none")]
    pub gpa: Option<String>,
    #[serde(default, deserialize_with = "blank_as_none")]
    pub description: Option<String>,
    #[serde(default)]
    #[validate(custom(function = "validate_start_date"))]
    pub start_date: String,
    #[serde(default, deserialize_with = "blank_as_none")]
    pub end_date: Option<String>,
    #[serde(default)]
    pub is_current: bool,
}

impl Entity for Education {
    const TABLE: Table = Table::Educations;
    const LABEL: &'static str = "Education";
    const ORDER: &'static [OrderBy] = &[OrderBy::asc("sort_order")];

    type Form = EducationForm;

    fn id(&self) -> Uuid {
        self.id
    }

    fn fields(form: EducationForm) -> Row {
        to_row(json!({
            "institution": form.institution.trim(),
            "degree": form.degree.trim(),
            "field_of_study": form.field_of_study,
            "gpa": form.gpa,
            "description": form.description,
            "start_date": form.start_date.trim(),
            "end_date": end_date_for(form.is_current, form.end_date),
            "is_current": form.is_current,
        }))
    }
}

fn validate_institution(value: &str) -> Result<(), ValidationError> {
    min_chars(value, 2, "Institution must be at least 2 characters")
}

fn validate_degree(value: &str) -> Result<(), ValidationError> {
    min_chars(value, 2, "Degree must be at least 2 characters")
}

fn validate_start_date(value: &str) -> Result<(), ValidationError> {
    min_chars(value, 1, "Start date is required")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_finished_degree_keeps_end_date() {
        let form: EducationForm = serde_json::from_value(json!({
            "institution": "MIT",
            "degree": "BSc",
            "start_date": "2015-09",
            "end_date": "2019-06",
            "gpa": "",
        }))
        .unwrap();
        assert!(form.validate().is_ok());

        let row = Education::fields(form);
        assert_eq!(row["end_date"], json!("2019-06"));
        assert_eq!(row["gpa"], serde_json::Value::Null);
    }
}
