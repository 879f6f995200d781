//! Content management operations.
//!
//! Every admin write follows the same cycle: validate the form, write one row, then
//! refetch the full list so the caller can redraw from what is actually stored.
//! A form that fails validation never reaches the store.

mod footer;
mod inbox;
mod profile;

use std::marker::PhantomData;
use std::sync::Arc;

use serde_json::Value;
use uuid::Uuid;
use validator::Validate;

use crate::domain::{from_row, Entity, Project};
use crate::error::{PortfolioError, PortfolioResult};
use crate::storage::{Filter, Row, Select, TableLocks, TableStore};

pub use footer::{FooterManager, FooterSaved};
pub use inbox::Inbox;
pub use profile::ProfileManager;

/// Result of a write: the affected record plus the refetched list.
#[derive(Debug, Clone)]
pub struct Written<T> {
    pub record: T,
    pub records: Vec<T>,
}

/// List/create/update/delete for one content table.
pub struct EntityManager<E> {
    store: Arc<dyn TableStore>,
    locks: TableLocks,
    _entity: PhantomData<fn() -> E>,
}

impl<E> Clone for EntityManager<E> {
    fn clone(&self) -> Self {
        Self {
            store: self.store.clone(),
            locks: self.locks.clone(),
            _entity: PhantomData,
        }
    }
}

impl<E: Entity> EntityManager<E> {
    pub fn new(store: Arc<dyn TableStore>, locks: TableLocks) -> Self {
        Self {
            store,
            locks,
            _entity: PhantomData,
        }
    }

    /// Every record, in display order.
    pub async fn list(&self) -> PortfolioResult<Vec<E>> {
        let rows = self
            .store
            .select(E::TABLE, &Select::ordered(E::ORDER))
            .await?;
        rows.into_iter().map(from_row).collect()
    }

    pub async fn get(&self, id: Uuid) -> PortfolioResult<E> {
        let row = self
            .store
            .select_single(E::TABLE, &Select::eq("id", id.to_string()))
            .await
            .map_err(|e| not_found_as::<E>(e, id))?;
        from_row(row)
    }

    /// Validate and insert a new record.
    pub async fn create(&self, form: E::Form) -> PortfolioResult<Written<E>> {
        form.validate()?;

        let _guard = self.locks.lock(E::TABLE).await;
        let existing = self.list().await?;
        let row = self
            .store
            .insert(E::TABLE, E::insert_fields(form, &existing))
            .await?;
        let record: E = from_row(row)?;

        tracing::info!(table = %E::TABLE, id = %record.id(), "Record created");

        let records = self.list().await?;
        Ok(Written { record, records })
    }

    /// Validate and overwrite the editable fields of an existing record.
    pub async fn update(&self, id: Uuid, form: E::Form) -> PortfolioResult<Written<E>> {
        form.validate()?;

        let _guard = self.locks.lock(E::TABLE).await;
        self.write(id, E::fields(form)).await
    }

    /// Delete a record. Nothing is touched unless the caller confirmed.
    pub async fn delete(&self, id: Uuid, confirmed: bool) -> PortfolioResult<Vec<E>> {
        if !confirmed {
            return Err(PortfolioError::BadRequest(format!(
                "Deleting this {} must be confirmed",
                E::LABEL.to_lowercase()
            )));
        }

        let _guard = self.locks.lock(E::TABLE).await;
        self.store
            .delete(E::TABLE, &Filter::id(id.to_string()))
            .await
            .map_err(|e| not_found_as::<E>(e, id))?;

        tracing::info!(table = %E::TABLE, id = %id, "Record deleted");

        self.list().await
    }

    /// Apply a patch and refetch. Callers hold the table lock.
    async fn write(&self, id: Uuid, patch: Row) -> PortfolioResult<Written<E>> {
        let mut rows = self
            .store
            .update(E::TABLE, &Filter::id(id.to_string()), patch)
            .await
            .map_err(|e| not_found_as::<E>(e, id))?;
        let row = rows
            .pop()
            .ok_or_else(|| PortfolioError::NotFound(format!("{} {} not found", E::LABEL, id)))?;
        let record: E = from_row(row)?;

        tracing::info!(table = %E::TABLE, id = %id, "Record updated");

        let records = self.list().await?;
        Ok(Written { record, records })
    }
}

fn not_found_as<E: Entity>(err: PortfolioError, id: Uuid) -> PortfolioError {
    match err {
        PortfolioError::NotFound(_) => {
            PortfolioError::NotFound(format!("{} {} not found", E::LABEL, id))
        }
        other => other,
    }
}

impl EntityManager<Project> {
    /// Append uploaded image URLs to a project's gallery.
    pub async fn append_images(
        &self,
        id: Uuid,
        urls: Vec<String>,
    ) -> PortfolioResult<Written<Project>> {
        let _guard = self.locks.lock(Project::TABLE).await;
        let project = self.get(id).await?;

        let mut image_urls = project.image_urls;
        image_urls.extend(urls);

        let mut patch = Row::new();
        patch.insert(
            "image_urls".to_string(),
            Value::Array(image_urls.into_iter().map(Value::String).collect()),
        );
        self.write(id, patch).await
    }
}
