//! Domain types for Portfolio Core.
//!
//! One module per content table: the stored record, the form an admin submits,
//! and the rules that turn a validated form into the columns that get written.

mod contact;
mod education;
mod experience;
mod footer;
mod profile;
mod project;
mod service;
mod skill;
mod stat;

use std::borrow::Cow;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use uuid::Uuid;
use validator::{Validate, ValidationError};

use crate::storage::{OrderBy, Row, Table};

pub use contact::*;
pub use education::*;
pub use experience::*;
pub use footer::*;
pub use profile::*;
pub use project::*;
pub use service::*;
pub use skill::*;
pub use stat::*;

/// A record type managed through the generic list/create/update/delete cycle.
pub trait Entity: Serialize + DeserializeOwned + Clone + Send + Sync + 'static {
    /// Backing table.
    const TABLE: Table;
    /// Singular display name, e.g. "Experience".
    const LABEL: &'static str;
    /// List order.
    const ORDER: &'static [OrderBy];

    /// Admin form for this record.
    type Form: Validate + Send + 'static;

    fn id(&self) -> Uuid;

    /// Columns written for a validated form (update payload).
    fn fields(form: Self::Form) -> Row;

    /// Columns written when the form creates a new row.
    ///
    /// Tables with a `sort_order` column append: the new row gets the current row count
    /// unless the form set an explicit position.
    fn insert_fields(form: Self::Form, existing: &[Self]) -> Row {
        let mut row = Self::fields(form);
        if Self::TABLE.column("sort_order").is_some() && !row.contains_key("sort_order") {
            row.insert("sort_order".to_string(), Value::from(existing.len() as i64));
        }
        row
    }
}

/// Build a row from a JSON object literal.
pub(crate) fn to_row(value: Value) -> Row {
    match value {
        Value::Object(map) => map,
        other => {
            let mut row = Row::new();
            row.insert("value".to_string(), other);
            row
        }
    }
}

/// Decode a stored row into a record.
pub fn from_row<T: DeserializeOwned>(row: Row) -> crate::error::PortfolioResult<T> {
    Ok(serde_json::from_value(Value::Object(row))?)
}

/// Deserialize optional form text, treating blank input as absent.
pub(crate) fn blank_as_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value: Option<String> = Option::deserialize(deserializer)?;
    Ok(value.and_then(|s| {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(trimmed.to_string())
        }
    }))
}

/// Membership check for enumerated form fields.
pub(crate) fn one_of(
    value: &str,
    allowed: &[&str],
    message: &'static str,
) -> Result<(), ValidationError> {
    if allowed.contains(&value) {
        Ok(())
    } else {
        let mut err = ValidationError::new("one_of");
        err.message = Some(Cow::Borrowed(message));
        Err(err)
    }
}

/// Minimum length of required form text, counted after trimming.
pub(crate) fn min_chars(value: &str, min: usize, message: &'static str) -> Result<(), ValidationError> {
    if value.trim().chars().count() >= min {
        Ok(())
    } else {
        let mut err = ValidationError::new("length");
        err.message = Some(Cow::Borrowed(message));
        err.add_param(Cow::Borrowed("min"), &min);
        Err(err)
    }
}

/// Stored end date for a period that may still be ongoing.
pub(crate) fn end_date_for(is_current: bool, end_date: Option<String>) -> Option<String> {
    if is_current {
        None
    } else {
        end_date
    }
}
