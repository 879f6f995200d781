//! Headline statistics ("Years Experience 5+").

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::{Validate, ValidationError};

use super::{min_chars, to_row, Entity};
use crate::storage::{OrderBy, Row, Table};

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct Stat {
    pub id: Uuid,
    pub label: String,
    /// Display value, free text ("50+").
    pub value: String,
    #[serde(default)]
    pub sort_order: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate, ToSchema)]
pub struct StatForm {
    #[serde(default)]
    #[validate(custom(function = "validate_label"))]
    pub label: String,
    #[serde(default)]
    #[validate(custom(function = "validate_value"))]
    pub value: String,
    #[serde(default)]
    #[validate(range(min = 0, message = "Sort order cannot be negative"))]
    pub sort_order: Option<i64>,
}

impl Entity for Stat {
    const TABLE: Table = Table::Stats;
    const LABEL: &'static str = "Stat";
    const ORDER: &'static [OrderBy] = &[OrderBy::asc("sort_order")];

    type Form = StatForm;

    fn id(&self) -> Uuid {
        self.id
    }

    fn fields(form: StatForm) -> Row {
        let mut row = to_row(json!({
            "label": form.label.trim(),
            "value": form.value.trim(),
        }));
        if let Some(order) = form.sort_order {
            row.insert("sort_order".to_string(), Value::from(order));
        }
        row
    }
}

fn validate_label(value: &str) -> Result<(), ValidationError> {
    min_chars(value, 1, "Label is required")
}

fn validate_value(value: &str) -> Result<(), ValidationError> {
    min_chars(value, 1, "Value is required")
}
