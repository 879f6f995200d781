//! Test doubles for the storage layer.

use std::sync::Arc;

use async_trait::async_trait;
use sqlx::sqlite::SqlitePoolOptions;
use tokio::sync::Mutex;

use crate::error::{PortfolioError, PortfolioResult};
use crate::storage::{ContentRepository, Filter, Row, Select, Table, TableStore};

/// A fresh in-memory repository with the schema applied.
pub async fn memory_repository() -> ContentRepository {
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .connect("sqlite::memory:")
        .await
        .expect("Failed to create test database");
    let repo = ContentRepository::new(pool);
    repo.init_schema().await.expect("Failed to init schema");
    repo
}

/// Kind of store call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Op {
    Select,
    Insert,
    Update,
    Delete,
}

/// A recorded store call.
#[derive(Debug, Clone)]
pub struct Call {
    pub op: Op,
    pub table: Table,
    pub filter: Option<Filter>,
    pub payload: Option<Row>,
}

/// Wraps the in-memory repository and records every call made through it.
///
/// Tables listed in `failing` return a database error for every call.
#[derive(Clone)]
pub struct RecordingStore {
    inner: ContentRepository,
    calls: Arc<Mutex<Vec<Call>>>,
    failing: Arc<Mutex<Vec<Table>>>,
}

impl RecordingStore {
    pub async fn new() -> Self {
        Self {
            inner: memory_repository().await,
            calls: Arc::new(Mutex::new(Vec::new())),
            failing: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Make every call against `table` fail.
    pub async fn fail_table(&self, table: Table) {
        self.failing.lock().await.push(table);
    }

    pub async fn calls(&self) -> Vec<Call> {
        self.calls.lock().await.clone()
    }

    /// Calls of one kind.
    pub async fn calls_of(&self, op: Op) -> Vec<Call> {
        self.calls().await.into_iter().filter(|c| c.op == op).collect()
    }

    /// Forget everything recorded so far.
    pub async fn reset(&self) {
        self.calls.lock().await.clear();
    }

    async fn record(
        &self,
        op: Op,
        table: Table,
        filter: Option<&Filter>,
        payload: Option<&Row>,
    ) -> PortfolioResult<()> {
        self.calls.lock().await.push(Call {
            op,
            table,
            filter: filter.cloned(),
            payload: payload.cloned(),
        });
        if self.failing.lock().await.contains(&table) {
            return Err(PortfolioError::Database(sqlx::Error::Protocol(format!(
                "{} is unavailable",
                table
            ))));
        }
        Ok(())
    }
}

#[async_trait]
impl TableStore for RecordingStore {
    async fn select(&self, table: Table, query: &Select) -> PortfolioResult<Vec<Row>> {
        self.record(Op::Select, table, query.filter.as_ref(), None)
            .await?;
        self.inner.select(table, query).await
    }

    async fn insert(&self, table: Table, row: Row) -> PortfolioResult<Row> {
        self.record(Op::Insert, table, None, Some(&row)).await?;
        self.inner.insert(table, row).await
    }

    async fn update(
        &self,
        table: Table,
        filter: &Filter,
        patch: Row,
    ) -> PortfolioResult<Vec<Row>> {
        self.record(Op::Update, table, Some(filter), Some(&patch))
            .await?;
        self.inner.update(table, filter, patch).await
    }

    async fn delete(&self, table: Table, filter: &Filter) -> PortfolioResult<u64> {
        self.record(Op::Delete, table, Some(filter), None).await?;
        self.inner.delete(table, filter).await
    }

    async fn ping(&self) -> PortfolioResult<()> {
        self.inner.ping().await
    }
}
