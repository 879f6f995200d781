//! Query descriptions for the generic table interface.

use serde_json::Value;

/// A row as the store sees it: column name to JSON value.
pub type Row = serde_json::Map<String, Value>;

/// Sort direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Asc,
    Desc,
}

/// One `ORDER BY` term.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OrderBy {
    pub column: &'static str,
    pub direction: Direction,
}

impl OrderBy {
    pub const fn asc(column: &'static str) -> Self {
        Self {
            column,
            direction: Direction::Asc,
        }
    }

    pub const fn desc(column: &'static str) -> Self {
        Self {
            column,
            direction: Direction::Desc,
        }
    }
}

/// Equality match on a single column.
#[derive(Debug, Clone, PartialEq)]
pub struct Filter {
    pub column: &'static str,
    pub value: Value,
}

impl Filter {
    pub fn eq(column: &'static str, value: impl Into<Value>) -> Self {
        Self {
            column,
            value: value.into(),
        }
    }

    /// Match on the row identifier.
    pub fn id(id: impl Into<Value>) -> Self {
        Self::eq("id", id)
    }
}

/// A `select` call: optional equality filter plus ordering.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Select {
    pub filter: Option<Filter>,
    pub order: Vec<OrderBy>,
}

impl Select {
    /// Every row, in storage order.
    pub fn all() -> Self {
        Self::default()
    }

    /// Every row, ordered by the given terms.
    pub fn ordered(order: &[OrderBy]) -> Self {
        Self {
            filter: None,
            order: order.to_vec(),
        }
    }

    /// Rows where `column = value`.
    pub fn eq(column: &'static str, value: impl Into<Value>) -> Self {
        Self {
            filter: Some(Filter::eq(column, value)),
            order: Vec::new(),
        }
    }

    pub fn order_by(mut self, order: OrderBy) -> Self {
        self.order.push(order);
        self
    }
}
