//! Contact form submissions.

use std::sync::Arc;

use chrono::Utc;
use uuid::Uuid;
use validator::Validate;

use crate::domain::{from_row, ContactSubmission, ContactSubmissionForm, InboxMessage};
use crate::error::{PortfolioError, PortfolioResult};
use crate::storage::{Filter, OrderBy, Select, Table, TableLocks, TableStore};

/// Visitor messages: written by the public contact form, read and pruned by admins.
#[derive(Clone)]
pub struct Inbox {
    store: Arc<dyn TableStore>,
    locks: TableLocks,
}

impl Inbox {
    pub fn new(store: Arc<dyn TableStore>, locks: TableLocks) -> Self {
        Self { store, locks }
    }

    pub async fn submit(&self, form: ContactSubmissionForm) -> PortfolioResult<ContactSubmission> {
        form.validate()?;

        let row = self
            .store
            .insert(Table::ContactSubmissions, form.into_row())
            .await?;
        let submission: ContactSubmission = from_row(row)?;

        tracing::info!(id = %submission.id, "Contact message received");
        Ok(submission)
    }

    /// Newest first.
    pub async fn list(&self) -> PortfolioResult<Vec<InboxMessage>> {
        let rows = self
            .store
            .select(
                Table::ContactSubmissions,
                &Select::ordered(&[OrderBy::desc("created_at")]),
            )
            .await?;
        let now = Utc::now();
        rows.into_iter()
            .map(|row| Ok(InboxMessage::new(from_row(row)?, now)))
            .collect()
    }

    pub async fn delete(&self, id: Uuid, confirmed: bool) -> PortfolioResult<Vec<InboxMessage>> {
        if !confirmed {
            return Err(PortfolioError::BadRequest(
                "Deleting this message must be confirmed".to_string(),
            ));
        }

        let _guard = self.locks.lock(Table::ContactSubmissions).await;
        self.store
            .delete(Table::ContactSubmissions, &Filter::id(id.to_string()))
            .await
            .map_err(|e| match e {
                PortfolioError::NotFound(_) => {
                    PortfolioError::NotFound(format!("Message {} not found", id))
                }
                other => other,
            })?;

        tracing::info!(id = %id, "Contact message deleted");
        self.list().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::testing::RecordingStore;

    fn form(name: &str) -> ContactSubmissionForm {
        ContactSubmissionForm {
            name: name.into(),
            email: "visitor@example.com".into(),
            message: "I would like to work with you.".into(),
        }
    }

    #[tokio::test]
    async fn test_submit_and_list_newest_first() {
        let store = RecordingStore::new().await;
        let inbox = Inbox::new(Arc::new(store), TableLocks::new());

        inbox.submit(form("First")).await.unwrap();
        inbox.submit(form("Second")).await.unwrap();

        let messages = inbox.list().await.unwrap();
        let names: Vec<_> = messages
            .iter()
            .map(|m| m.submission.name.as_str())
            .collect();
        assert_eq!(names, vec!["Second", "First"]);
        assert!(messages.iter().all(|m| m.is_recent));
    }

    #[tokio::test]
    async fn test_invalid_submission_rejected() {
        let store = RecordingStore::new().await;
        let inbox = Inbox::new(Arc::new(store.clone()), TableLocks::new());

        let err = inbox
            .submit(ContactSubmissionForm {
                name: "Al".into(),
                email: "nope".into(),
                message: "I would like to work with you.".into(),
            })
            .await
            .unwrap_err();
        assert!(matches!(err, PortfolioError::Validation(_)));
        assert!(store.calls().await.is_empty());
    }

    #[tokio::test]
    async fn test_delete_message() {
        let store = RecordingStore::new().await;
        let inbox = Inbox::new(Arc::new(store), TableLocks::new());
        let submission = inbox.submit(form("Visitor")).await.unwrap();

        assert!(inbox.delete(submission.id, false).await.is_err());
        let remaining = inbox.delete(submission.id, true).await.unwrap();
        assert!(remaining.is_empty());

        let err = inbox.delete(submission.id, true).await.unwrap_err();
        assert!(matches!(err, PortfolioError::NotFound(_)));
    }
}
