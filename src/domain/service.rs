//! Services offered, shown in the about section.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::{Validate, ValidationError};

use super::{min_chars, one_of, to_row, Entity};
use crate::storage::{OrderBy, Row, Table};

/// Icons a service card can use.
pub const SERVICE_ICONS: [&str; 5] = ["Code", "Palette", "Zap", "Monitor", "Smartphone"];

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct Service {
    pub id: Uuid,
    pub title: String,
    pub description: String,
    pub icon_name: String,
    #[serde(default)]
    pub sort_order: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate, ToSchema)]
pub struct ServiceForm {
    #[serde(default)]
    #[validate(custom(function = "validate_title"))]
    pub title: String,
    #[serde(default)]
    #[validate(custom(function = "validate_description"))]
    pub description: String,
    #[serde(default)]
    #[validate(custom(function = "validate_icon"))]
    pub icon_name: String,
    /// Explicit position; new services go last when omitted.
    #[serde(default)]
    #[validate(range(min = 0, message = "Sort order cannot be negative"))]
    pub sort_order: Option<i64>,
}

fn validate_icon(value: &str) -> Result<(), ValidationError> {
    one_of(value, &SERVICE_ICONS, "Please select an icon")
}

impl Entity for Service {
    const TABLE: Table = Table::Services;
    const LABEL: &'static str = "Service";
    const ORDER: &'static [OrderBy] = &[OrderBy::asc("sort_order")];

    type Form = ServiceForm;

    fn id(&self) -> Uuid {
        self.id
    }

    fn fields(form: ServiceForm) -> Row {
        let mut row = to_row(json!({
            "title": form.title.trim(),
            "description": form.description.trim(),
            "icon_name": form.icon_name,
        }));
        if let Some(order) = form.sort_order {
            row.insert("sort_order".to_string(), Value::from(order));
        }
        row
    }
}

fn validate_title(value: &str) -> Result<(), ValidationError> {
    min_chars(value, 1, "Title is required")
}

fn validate_description(value: &str) -> Result<(), ValidationError> {
    min_chars(value, 1, "Description is required")
}
