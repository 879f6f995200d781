//! Footer batch save.
//!
//! The footer editor submits every row at once. Only rows whose fields differ from
//! the stored snapshot are written, each with just the changed fields, and the
//! per-row updates run concurrently.

use std::collections::HashMap;
use std::sync::Arc;

use futures::future::join_all;
use uuid::Uuid;
use validator::Validate;

use crate::domain::{FooterBatch, FooterItem};
use crate::error::{PortfolioError, PortfolioResult};
use crate::manager::EntityManager;
use crate::storage::{Filter, Table, TableLocks, TableStore};

/// Outcome of a batch save.
#[derive(Debug, Clone)]
pub struct FooterSaved {
    /// Rows actually written.
    pub updated: usize,
    pub items: Vec<FooterItem>,
}

#[derive(Clone)]
pub struct FooterManager {
    store: Arc<dyn TableStore>,
    locks: TableLocks,
    items: EntityManager<FooterItem>,
}

impl FooterManager {
    pub fn new(store: Arc<dyn TableStore>, locks: TableLocks) -> Self {
        Self {
            items: EntityManager::new(store.clone(), locks.clone()),
            store,
            locks,
        }
    }

    /// Per-row operations (create, single update, delete).
    pub fn items(&self) -> &EntityManager<FooterItem> {
        &self.items
    }

    pub async fn save_all(&self, batch: FooterBatch) -> PortfolioResult<FooterSaved> {
        batch.validate()?;

        let _guard = self.locks.lock(Table::FooterInfo).await;
        let snapshot: HashMap<Uuid, FooterItem> = self
            .items
            .list()
            .await?
            .into_iter()
            .map(|item| (item.id, item))
            .collect();

        let mut patches = Vec::new();
        for edit in &batch.items {
            let current = snapshot.get(&edit.id).ok_or_else(|| {
                PortfolioError::NotFound(format!("Footer item {} not found", edit.id))
            })?;
            let patch = edit.changes(current);
            if !patch.is_empty() {
                patches.push((edit.id, patch));
            }
        }

        let updated = patches.len();
        let writes = patches.into_iter().map(|(id, patch)| {
            let store = self.store.clone();
            async move {
                store
                    .update(Table::FooterInfo, &Filter::id(id.to_string()), patch)
                    .await
            }
        });
        let results = join_all(writes).await;

        if let Some(err) = results.into_iter().find_map(Result::err) {
            tracing::warn!(updated, error = %err, "Footer batch save failed");
            return Err(err);
        }

        tracing::info!(updated, "Footer saved");

        let items = self.items.list().await?;
        Ok(FooterSaved { updated, items })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{FooterEdit, FooterItemForm};
    use crate::storage::testing::{Op, RecordingStore};
    use serde_json::json;

    async fn seeded() -> (RecordingStore, FooterManager, Vec<FooterItem>) {
        let store = RecordingStore::new().await;
        let footer = FooterManager::new(Arc::new(store.clone()), TableLocks::new());
        for (label, icon) in [
            ("GitHub", Some("Github")),
            ("LinkedIn", Some("Linkedin")),
            ("Email", Some("Mail")),
            ("Copyright", None),
        ] {
            footer
                .items()
                .create(FooterItemForm {
                    kind: if icon.is_some() { "social" } else { "copyright" }.into(),
                    label: label.into(),
                    value: label.into(),
                    href: icon.map(|_| format!("https://example.com/{}", label.to_lowercase())),
                    icon_name: icon.map(str::to_string),
                })
                .await
                .unwrap();
        }
        let items = footer.items().list().await.unwrap();
        store.reset().await;
        (store, footer, items)
    }

    fn unchanged(item: &FooterItem) -> FooterEdit {
        FooterEdit {
            id: item.id,
            label: item.label.clone(),
            value: item.value.clone(),
            href: item.href.clone(),
            icon_name: item.icon_name.clone(),
        }
    }

    #[tokio::test]
    async fn test_only_changed_rows_are_written() {
        let (store, footer, items) = seeded().await;

        let mut edits: Vec<FooterEdit> = items.iter().map(unchanged).collect();
        edits[0].href = Some("https://github.com/jane".into());
        edits[1].label = "LinkedIn Profile".into();
        edits[3].value = "Jane Doe. All rights reserved.".into();

        let saved = footer.save_all(FooterBatch { items: edits }).await.unwrap();

        assert_eq!(saved.updated, 3);
        let updates = store.calls_of(Op::Update).await;
        assert_eq!(updates.len(), 3);
        for call in &updates {
            assert_eq!(call.payload.as_ref().unwrap().len(), 1);
        }
        let href_patch = updates
            .iter()
            .find(|c| c.filter == Some(Filter::id(items[0].id.to_string())))
            .unwrap();
        assert_eq!(
            href_patch.payload.as_ref().unwrap()["href"],
            json!("https://github.com/jane")
        );

        assert_eq!(saved.items[1].label, "LinkedIn Profile");
        assert_eq!(saved.items[2].label, "Email");
    }

    #[tokio::test]
    async fn test_nothing_changed_writes_nothing() {
        let (store, footer, items) = seeded().await;
        let edits = items.iter().map(unchanged).collect();

        let saved = footer.save_all(FooterBatch { items: edits }).await.unwrap();

        assert_eq!(saved.updated, 0);
        assert!(store.calls_of(Op::Update).await.is_empty());
    }

    #[tokio::test]
    async fn test_invalid_row_blocks_whole_batch() {
        let (store, footer, items) = seeded().await;
        let mut edits: Vec<FooterEdit> = items.iter().map(unchanged).collect();
        edits[0].href = Some("https://github.com/jane".into());
        edits[2].label = String::new();

        let err = footer
            .save_all(FooterBatch { items: edits })
            .await
            .unwrap_err();

        match err {
            PortfolioError::Validation(fields) => {
                assert!(fields.contains_key("items[2].label"));
            }
            other => panic!("unexpected error: {other:?}"),
        }
        assert!(store.calls().await.is_empty());
    }

    #[tokio::test]
    async fn test_batch_checks_icons_and_blank_text() {
        let (store, footer, items) = seeded().await;
        let mut edits: Vec<FooterEdit> = items.iter().map(unchanged).collect();
        edits[1].icon_name = Some("Rocket".into());
        edits[3].label = "   ".into();

        let err = footer
            .save_all(FooterBatch { items: edits })
            .await
            .unwrap_err();

        match err {
            PortfolioError::Validation(fields) => {
                assert!(fields.contains_key("items[1].icon_name"));
                assert!(fields.contains_key("items[3].label"));
            }
            other => panic!("unexpected error: {other:?}"),
        }
        assert!(store.calls_of(Op::Update).await.is_empty());
        assert_eq!(
            footer.items().list().await.unwrap()[1].icon_name.as_deref(),
            Some("Linkedin")
        );
    }

    #[tokio::test]
    async fn test_unknown_row_is_not_found() {
        let (store, footer, items) = seeded().await;
        let mut edits: Vec<FooterEdit> = items.iter().map(unchanged).collect();
        edits[0].id = Uuid::new_v4();

        let err = footer
            .save_all(FooterBatch { items: edits })
            .await
            .unwrap_err();
        assert!(matches!(err, PortfolioError::NotFound(_)));
        assert!(store.calls_of(Op::Update).await.is_empty());
    }
}
