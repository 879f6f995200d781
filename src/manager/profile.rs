//! Profile upsert, one row per admin user.

use std::sync::Arc;

use serde_json::Value;
use validator::Validate;

use crate::domain::{from_row, Profile, ProfileForm};
use crate::error::{PortfolioError, PortfolioResult};
use crate::storage::{Filter, Row, Select, Table, TableLocks, TableStore};

#[derive(Clone)]
pub struct ProfileManager {
    store: Arc<dyn TableStore>,
    locks: TableLocks,
}

impl ProfileManager {
    pub fn new(store: Arc<dyn TableStore>, locks: TableLocks) -> Self {
        Self { store, locks }
    }

    /// The profile owned by `user_id`, if one was saved.
    pub async fn get(&self, user_id: &str) -> PortfolioResult<Option<Profile>> {
        let rows = self
            .store
            .select(Table::Profiles, &Select::eq("user_id", user_id))
            .await?;
        rows.into_iter().next().map(from_row).transpose()
    }

    /// The profile shown on the public site: the first one saved.
    pub async fn primary(&self) -> PortfolioResult<Option<Profile>> {
        let rows = self
            .store
            .select(
                Table::Profiles,
                &Select::ordered(&[crate::storage::OrderBy::asc("created_at")]),
            )
            .await?;
        rows.into_iter().next().map(from_row).transpose()
    }

    /// Validate and save the profile, creating it on first save.
    pub async fn save(&self, user_id: &str, form: ProfileForm) -> PortfolioResult<Profile> {
        form.validate()?;

        let _guard = self.locks.lock(Table::Profiles).await;
        self.upsert(user_id, form.into_row()).await
    }

    /// Point the profile at a newly uploaded photo.
    pub async fn set_photo(&self, user_id: &str, url: String) -> PortfolioResult<Profile> {
        let _guard = self.locks.lock(Table::Profiles).await;
        if self.get(user_id).await?.is_none() {
            return Err(PortfolioError::NotFound(
                "Save your profile before uploading a photo".to_string(),
            ));
        }

        let mut patch = Row::new();
        patch.insert("profile_photo_url".to_string(), Value::String(url));
        self.upsert(user_id, patch).await
    }

    async fn upsert(&self, user_id: &str, mut fields: Row) -> PortfolioResult<Profile> {
        let row = match self.get(user_id).await? {
            Some(_) => {
                let mut rows = self
                    .store
                    .update(Table::Profiles, &Filter::eq("user_id", user_id), fields)
                    .await?;
                rows.pop().ok_or_else(|| {
                    PortfolioError::NotFound(format!("Profile for {} not found", user_id))
                })?
            }
            None => {
                fields.insert("user_id".to_string(), Value::from(user_id));
                self.store.insert(Table::Profiles, fields).await?
            }
        };

        tracing::info!(user_id, "Profile saved");
        from_row(row)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::testing::{Op, RecordingStore};

    async fn setup() -> (RecordingStore, ProfileManager) {
        let store = RecordingStore::new().await;
        let manager = ProfileManager::new(Arc::new(store.clone()), TableLocks::new());
        (store, manager)
    }

    fn form(name: &str) -> ProfileForm {
        ProfileForm {
            name: name.into(),
            tagline: Some("Full Stack Developer".into()),
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn test_first_save_inserts_then_updates() {
        let (store, profiles) = setup().await;

        let created = profiles.save("admin", form("Jane Doe")).await.unwrap();
        assert_eq!(created.user_id, "admin");
        assert_eq!(store.calls_of(Op::Insert).await.len(), 1);

        let updated = profiles.save("admin", form("Jane Q. Doe")).await.unwrap();
        assert_eq!(updated.id, created.id);
        assert_eq!(updated.name, "Jane Q. Doe");
        assert_eq!(store.calls_of(Op::Insert).await.len(), 1);
        assert_eq!(store.calls_of(Op::Update).await.len(), 1);
    }

    #[tokio::test]
    async fn test_invalid_profile_not_saved() {
        let (store, profiles) = setup().await;
        let err = profiles.save("admin", form("J")).await.unwrap_err();
        assert!(matches!(err, PortfolioError::Validation(_)));
        assert!(store.calls().await.is_empty());
    }

    #[tokio::test]
    async fn test_photo_requires_profile() {
        let (_store, profiles) = setup().await;
        let err = profiles
            .set_photo("admin", "http://x/p.jpg".into())
            .await
            .unwrap_err();
        assert!(matches!(err, PortfolioError::NotFound(_)));

        profiles.save("admin", form("Jane Doe")).await.unwrap();
        let profile = profiles
            .set_photo("admin", "http://x/p.jpg".into())
            .await
            .unwrap();
        assert_eq!(profile.profile_photo_url.as_deref(), Some("http://x/p.jpg"));
        assert_eq!(profile.name, "Jane Doe");
    }

    #[tokio::test]
    async fn test_primary_is_first_saved() {
        let (_store, profiles) = setup().await;
        assert!(profiles.primary().await.unwrap().is_none());

        profiles.save("first", form("First Owner")).await.unwrap();
        profiles.save("second", form("Second Owner")).await.unwrap();
        let primary = profiles.primary().await.unwrap().unwrap();
        assert_eq!(primary.name, "First Owner");
    }
}
