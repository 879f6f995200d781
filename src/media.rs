//! Media uploads.
//!
//! Files go to object storage first; the public URLs are then written onto the owning
//! row. A failed upload fails the whole request and nothing is rolled back.

use std::path::Path;
use std::sync::Arc;

use chrono::Utc;
use futures::future::try_join_all;
use uuid::Uuid;

use crate::domain::{Profile, Project};
use crate::error::{PortfolioError, PortfolioResult};
use crate::manager::{EntityManager, ProfileManager, Written};
use crate::storage::{ObjectStore, TableLocks, TableStore};

pub const PROFILE_PHOTOS: &str = "profile-photos";
pub const PORTFOLIO_IMAGES: &str = "portfolio-images";

/// A file received from the client.
#[derive(Debug, Clone)]
pub struct Upload {
    pub file_name: Option<String>,
    pub content_type: Option<String>,
    pub bytes: Vec<u8>,
}

impl Upload {
    /// File extension for the stored object, lowercased.
    fn extension(&self) -> PortfolioResult<String> {
        let from_name = self
            .file_name
            .as_deref()
            .and_then(|name| Path::new(name).extension())
            .and_then(|ext| ext.to_str())
            .filter(|ext| !ext.is_empty() && ext.chars().all(|c| c.is_ascii_alphanumeric()))
            .map(str::to_lowercase);

        let from_type = || match self.content_type.as_deref() {
            Some("image/jpeg") => Some("jpg".to_string()),
            Some("image/png") => Some("png".to_string()),
            Some("image/gif") => Some("gif".to_string()),
            Some("image/webp") => Some("webp".to_string()),
            Some("image/svg+xml") => Some("svg".to_string()),
            _ => None,
        };

        from_name.or_else(from_type).ok_or_else(|| {
            PortfolioError::BadRequest("Cannot tell the file type of the upload".to_string())
        })
    }

    fn check(&self) -> PortfolioResult<()> {
        if self.bytes.is_empty() {
            return Err(PortfolioError::BadRequest("Uploaded file is empty".to_string()));
        }
        if let Some(content_type) = &self.content_type {
            if !content_type.starts_with("image/") {
                return Err(PortfolioError::BadRequest(format!(
                    "Only images can be uploaded, got {}",
                    content_type
                )));
            }
        }
        Ok(())
    }
}

#[derive(Clone)]
pub struct MediaService {
    objects: Arc<dyn ObjectStore>,
    profiles: ProfileManager,
    projects: EntityManager<Project>,
}

impl MediaService {
    pub fn new(store: Arc<dyn TableStore>, objects: Arc<dyn ObjectStore>, locks: TableLocks) -> Self {
        Self {
            objects,
            profiles: ProfileManager::new(store.clone(), locks.clone()),
            projects: EntityManager::new(store, locks),
        }
    }

    /// Store a new profile photo and point the profile at it.
    pub async fn upload_profile_photo(
        &self,
        user_id: &str,
        upload: Upload,
    ) -> PortfolioResult<Profile> {
        upload.check()?;
        if self.profiles.get(user_id).await?.is_none() {
            return Err(PortfolioError::NotFound(
                "Save your profile before uploading a photo".to_string(),
            ));
        }

        let key = format!(
            "{}-{}.{}",
            user_id,
            Utc::now().timestamp_millis(),
            upload.extension()?
        );
        self.objects
            .upload(PROFILE_PHOTOS, &key, upload.bytes)
            .await?;
        let url = self.objects.public_url(PROFILE_PHOTOS, &key);

        tracing::info!(user_id, key = %key, "Profile photo uploaded");
        self.profiles.set_photo(user_id, url).await
    }

    /// Store project images concurrently and append their URLs to the gallery.
    pub async fn upload_project_images(
        &self,
        project_id: Uuid,
        uploads: Vec<Upload>,
    ) -> PortfolioResult<Written<Project>> {
        if uploads.is_empty() {
            return Err(PortfolioError::BadRequest("No files were uploaded".to_string()));
        }
        for upload in &uploads {
            upload.check()?;
        }
        self.projects.get(project_id).await?;

        let millis = Utc::now().timestamp_millis();
        let mut keyed = Vec::with_capacity(uploads.len());
        for upload in uploads {
            let key = format!(
                "{}-{}-{}.{}",
                project_id,
                millis,
                Uuid::new_v4().simple(),
                upload.extension()?
            );
            keyed.push((key, upload.bytes));
        }

        let urls = try_join_all(keyed.into_iter().map(|(key, bytes)| {
            let objects = self.objects.clone();
            async move {
                objects.upload(PORTFOLIO_IMAGES, &key, bytes).await?;
                Ok::<_, PortfolioError>(objects.public_url(PORTFOLIO_IMAGES, &key))
            }
        }))
        .await?;

        tracing::info!(project_id = %project_id, count = urls.len(), "Project images uploaded");
        self.projects.append_images(project_id, urls).await
    }
}
