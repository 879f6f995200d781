//! Portfolio projects.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::{Validate, ValidationError};

use super::{blank_as_none, min_chars, to_row, Entity};
use crate::storage::{OrderBy, Row, Table};

/// A project shown in the portfolio grid.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct Project {
    /// Unique identifier.
    pub id: Uuid,
    pub title: String,
    pub description: Option<String>,
    /// Technologies, in display order.
    #[serde(default)]
    pub tech_stack: Vec<String>,
    /// Public URLs of uploaded images.
    #[serde(default)]
    pub image_urls: Vec<String>,
    pub live_url: Option<String>,
    pub github_url: Option<String>,
    /// Featured projects get a badge on the public page.
    #[serde(default)]
    pub featured: bool,
    #[serde(default)]
    pub sort_order: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Project editor form.
///
/// `tech_stack` is entered as comma-separated text.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate, ToSchema)]
pub struct ProjectForm {
    #[serde(default)]
    #[validate(custom(function = "validate_title"))]
    pub title: String,
    #[serde(default, deserialize_with = "blank_as_none")]
    #[validate(length(min = 10, message = "Description must be at least 10 characters"))]
    pub description: Option<String>,
    #[serde(default)]
    pub tech_stack: String,
    #[serde(default, deserialize_with = "blank_as_none")]
    #[validate(url(message = "Must be a valid URL"))]
    pub live_url: Option<String>,
    #[serde(default, deserialize_with = "blank_as_none")]
    #[validate(url(message = "Must be a valid URL"))]
    pub github_url: Option<String>,
    #[serde(default)]
    pub featured: bool,
}

/// Split comma-separated technologies, dropping blanks.
pub fn split_tech_stack(input: &str) -> Vec<String> {
    input
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

impl Entity for Project {
    const TABLE: Table = Table::Projects;
    const LABEL: &'static str = "Project";
    const ORDER: &'static [OrderBy] = &[OrderBy::asc("sort_order")];

    type Form = ProjectForm;

    fn id(&self) -> Uuid {
        self.id
    }

    fn fields(form: ProjectForm) -> Row {
        to_row(json!({
            "title": form.title.trim(),
            "description": form.description,
            "tech_stack": split_tech_stack(&form.tech_stack),
            "live_url": form.live_url,
            "github_url": form.github_url,
            "featured": form.featured,
        }))
    }

    fn insert_fields(form: ProjectForm, existing: &[Self]) -> Row {
        let mut row = Self::fields(form);
        row.insert("image_urls".to_string(), Value::Array(Vec::new()));
        row.insert(
            "sort_order".to_string(),
            Value::from(existing.len() as i64),
        );
        row
    }
}

fn validate_title(value: &str) -> Result<(), ValidationError> {
    min_chars(value, 2, "Title must be at least 2 characters")
}
