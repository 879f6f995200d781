//! Storage layer for Portfolio Core.
//!
//! Content lives in one SQLite table per entity behind the generic
//! [`TableStore`] interface; uploaded media goes through [`ObjectStore`].

mod object;
mod query;
mod repository;
mod schema;

#[cfg(test)]
pub mod testing;

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::{SecondsFormat, Utc};
use tokio::sync::Mutex;

use crate::error::{PortfolioError, PortfolioResult};

pub use object::{LocalObjectStore, ObjectStore};
pub use query::{Direction, Filter, OrderBy, Row, Select};
pub use repository::ContentRepository;
pub use schema::{Column, ColumnKind, Table, MANAGED_COLUMNS};

/// Generic row-level access to the content tables.
///
/// Every call is a single table operation; an `Err` means no data was produced.
#[async_trait]
pub trait TableStore: Send + Sync {
    /// Fetch rows, optionally filtered by one equality match, in the requested order.
    async fn select(&self, table: Table, query: &Select) -> PortfolioResult<Vec<Row>>;

    /// Insert one row and return it as stored (with id and timestamps).
    async fn insert(&self, table: Table, row: Row) -> PortfolioResult<Row>;

    /// Apply `patch` to every row matching `filter` and return the updated rows.
    async fn update(&self, table: Table, filter: &Filter, patch: Row)
        -> PortfolioResult<Vec<Row>>;

    /// Delete every row matching `filter`, returning how many were removed.
    async fn delete(&self, table: Table, filter: &Filter) -> PortfolioResult<u64>;

    /// Check the store is reachable.
    async fn ping(&self) -> PortfolioResult<()>;

    /// Fetch exactly one row.
    async fn select_single(&self, table: Table, query: &Select) -> PortfolioResult<Row> {
        let mut rows = self.select(table, query).await?;
        match rows.len() {
            1 => Ok(rows.remove(0)),
            0 => Err(PortfolioError::NotFound(format!("No {} row found", table))),
            n => Err(PortfolioError::BadRequest(format!(
                "Expected a single {} row, found {}",
                table, n
            ))),
        }
    }
}

/// Per-table write locks.
///
/// A write and the refetch that follows it hold the table's lock, so the list a
/// write returns is never interleaved with another write on the same table.
#[derive(Clone)]
pub struct TableLocks {
    locks: Arc<HashMap<Table, Arc<Mutex<()>>>>,
}

impl TableLocks {
    pub fn new() -> Self {
        let locks = Table::ALL
            .into_iter()
            .map(|t| (t, Arc::new(Mutex::new(()))))
            .collect();
        Self {
            locks: Arc::new(locks),
        }
    }

    /// Wait for exclusive write access to `table`.
    pub async fn lock(&self, table: Table) -> tokio::sync::OwnedMutexGuard<()> {
        // Every table is registered in `new`.
        let lock = self.locks[&table].clone();
        lock.lock_owned().await
    }
}

impl Default for TableLocks {
    fn default() -> Self {
        Self::new()
    }
}

/// Current time in the fixed-width format timestamps are stored in.
pub fn timestamp() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Micros, true)
}
