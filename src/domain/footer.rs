//! Footer entries: social links and the copyright line.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::{Validate, ValidationError};

use super::{blank_as_none, min_chars, one_of, to_row, Entity};
use crate::storage::{OrderBy, Row, Table};

/// Icons the public footer knows how to draw.
pub const FOOTER_ICONS: [&str; 6] = ["Github", "Linkedin", "Mail", "Facebook", "Twitter", "Instagram"];

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct FooterItem {
    pub id: Uuid,
    /// "social" or "copyright".
    #[serde(rename = "type")]
    pub kind: String,
    pub label: String,
    pub value: String,
    pub href: Option<String>,
    pub icon_name: Option<String>,
    #[serde(default)]
    pub sort_order: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl FooterItem {
    pub fn is_copyright(&self) -> bool {
        self.kind == "copyright"
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate, ToSchema)]
pub struct FooterItemForm {
    #[serde(rename = "type", default)]
    #[validate(custom(function = "validate_kind"))]
    pub kind: String,
    #[serde(default)]
    #[validate(custom(function = "validate_label"))]
    pub label: String,
    #[serde(default)]
    #[validate(custom(function = "validate_value"))]
    pub value: String,
    #[serde(default, deserialize_with = "blank_as_none")]
    pub href: Option<String>,
    #[serde(default, deserialize_with = "blank_as_none")]
    #[validate(custom(function = "validate_icon"))]
    pub icon_name: Option<String>,
}

fn validate_kind(value: &str) -> Result<(), ValidationError> {
    one_of(value, &["social", "copyright"], "Type must be social or copyright")
}

fn validate_icon(value: &str) -> Result<(), ValidationError> {
    one_of(value, &FOOTER_ICONS, "Please select an icon")
}

/// One row of the footer editor, submitted with the batch save.
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct FooterEdit {
    pub id: Uuid,
    #[serde(default)]
    #[validate(custom(function = "validate_label"))]
    pub label: String,
    #[serde(default)]
    #[validate(custom(function = "validate_value"))]
    pub value: String,
    #[serde(default, deserialize_with = "blank_as_none")]
    pub href: Option<String>,
    #[serde(default, deserialize_with = "blank_as_none")]
    #[validate(custom(function = "validate_icon"))]
    pub icon_name: Option<String>,
}

impl FooterEdit {
    /// Fields of `current` this edit changes. Empty when nothing differs.
    pub fn changes(&self, current: &FooterItem) -> Row {
        let mut patch = Row::new();
        let label = self.label.trim();
        if label != current.label {
            patch.insert("label".to_string(), Value::from(label));
        }
        let value = self.value.trim();
        if value != current.value {
            patch.insert("value".to_string(), Value::from(value));
        }
        if self.href != current.href {
            patch.insert("href".to_string(), json!(self.href));
        }
        if self.icon_name != current.icon_name {
            patch.insert("icon_name".to_string(), json!(self.icon_name));
        }
        patch
    }
}

/// Batch save payload for the footer editor.
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct FooterBatch {
    #[validate(nested)]
    pub items: Vec<FooterEdit>,
}

impl Entity for FooterItem {
    const TABLE: Table = Table::FooterInfo;
    const LABEL: &'static str = "Footer item";
    const ORDER: &'static [OrderBy] = &[OrderBy::asc("sort_order")];

    type Form = FooterItemForm;

    fn id(&self) -> Uuid {
        self.id
    }

    fn fields(form: FooterItemForm) -> Row {
        to_row(json!({
            "type": form.kind,
            "label": form.label.trim(),
            "value": form.value.trim(),
            "href": form.href,
            "icon_name": form.icon_name,
        }))
    }
}

fn validate_label(value: &str) -> Result<(), ValidationError> {
    min_chars(value, 1, "Label is required")
}

fn validate_value(value: &str) -> Result<(), ValidationError> {
    min_chars(value, 1, "Value is required")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item() -> FooterItem {
        FooterItem {
            id: Uuid::new_v4(),
            kind: "social".into(),
            label: "GitHub".into(),
            value: "GitHub".into(),
            href: Some("https://github.com".into()),
            icon_name: Some("Github".into()),
            sort_order: 0,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    fn edit(current: &FooterItem) -> FooterEdit {
        FooterEdit {
            id: current.id,
            label: current.label.clone(),
            value: current.value.clone(),
            href: current.href.clone(),
            icon_name: current.icon_name.clone(),
        }
    }

    #[test]
    fn test_unchanged_edit_has_no_changes() {
        let current = item();
        assert!(edit(&current).changes(&current).is_empty());
    }

    #[test]
    fn test_changes_only_differing_fields() {
        let current = item();
        let mut e = edit(&current);
        e.href = Some("https://github.com/me".into());
        let patch = e.changes(&current);
        assert_eq!(patch.len(), 1);
        assert_eq!(patch["href"], json!("https://github.com/me"));
    }

    #[test]
    fn test_clearing_href_patches_null() {
        let current = item();
        let e: FooterEdit = serde_json::from_value(json!({
            "id": current.id,
            "label": "GitHub",
            "value": "GitHub",
            "href": "",
            "icon_name": "Github",
        }))
        .unwrap();
        let patch = e.changes(&current);
        assert_eq!(patch["href"], Value::Null);
    }

    #[test]
    fn test_form_type_round_trips_as_type() {
        let form: FooterItemForm = serde_json::from_value(json!({
            "type": "copyright",
            "label": "Copyright",
            "value": "Jane Doe. All rights reserved.",
        }))
        .unwrap();
        assert!(form.validate().is_ok());
        assert_eq!(FooterItem::fields(form)["type"], json!("copyright"));
    }

    #[test]
    fn test_unknown_icon_rejected() {
        let form = FooterItemForm {
            kind: "social".into(),
            label: "Site".into(),
            value: "Site".into(),
            href: None,
            icon_name: Some("Rocket".into()),
        };
        assert!(form.validate().unwrap_err().field_errors().contains_key("icon_name"));
    }
}
