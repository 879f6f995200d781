//! Multipart upload handlers.

use axum::{
    extract::{Multipart, Path, State},
    Extension, Json,
};
use uuid::Uuid;

use crate::api::types::{Notice, ProfileResponse, WriteResponse};
use crate::auth::Claims;
use crate::domain::Project;
use crate::error::{PortfolioError, PortfolioResult};
use crate::media::Upload;
use crate::AppState;

/// Collect every file part named `field`.
async fn read_files(multipart: &mut Multipart, field: &str) -> PortfolioResult<Vec<Upload>> {
    let mut uploads = Vec::new();
    while let Some(part) = multipart
        .next_field()
        .await
        .map_err(|e| PortfolioError::BadRequest(e.to_string()))?
    {
        if part.name() != Some(field) {
            continue;
        }
        let file_name = part.file_name().map(str::to_string);
        let content_type = part.content_type().map(str::to_string);
        let bytes = part
            .bytes()
            .await
            .map_err(|e| PortfolioError::BadRequest(e.to_string()))?;
        uploads.push(Upload {
            file_name,
            content_type,
            bytes: bytes.to_vec(),
        });
    }
    Ok(uploads)
}

/// Upload a new profile photo (multipart field `file`).
///
/// POST /v1/admin/profile/photo
#[utoipa::path(
    post,
    path = "/v1/admin/profile/photo",
    request_body(content_type = "multipart/form-data", description = "Image in field `file`"),
    responses(
        (status = 200, description = "Photo stored", body = ProfileResponse),
        (status = 400, description = "Missing or unsupported file"),
        (status = 404, description = "No profile saved yet"),
        (status = 500, description = "Upload failed")
    ),
    security(("bearer_auth" = [])),
    tag = "profile"
)]
pub async fn upload_profile_photo(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    mut multipart: Multipart,
) -> PortfolioResult<Json<ProfileResponse>> {
    claims.require_editor()?;
    let upload = read_files(&mut multipart, "file")
        .await?
        .into_iter()
        .next()
        .ok_or_else(|| PortfolioError::BadRequest("Missing required 'file' field".to_string()))?;

    let profile = state.media.upload_profile_photo(&claims.sub, upload).await?;
    Ok(Json(ProfileResponse {
        data: profile,
        notice: Notice::success("Profile photo uploaded successfully"),
    }))
}

/// Upload project images (repeated multipart field `files`).
///
/// POST /v1/admin/projects/{id}/images
#[utoipa::path(
    post,
    path = "/v1/admin/projects/{id}/images",
    params(("id" = Uuid, Path, description = "Project ID")),
    request_body(content_type = "multipart/form-data", description = "Images in repeated field `files`"),
    responses(
        (status = 200, description = "Images appended", body = WriteResponse<Project>),
        (status = 400, description = "Missing or unsupported file"),
        (status = 404, description = "Project not found"),
        (status = 500, description = "Upload failed")
    ),
    security(("bearer_auth" = [])),
    tag = "projects"
)]
pub async fn upload_project_images(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    Path(id): Path<Uuid>,
    mut multipart: Multipart,
) -> PortfolioResult<Json<WriteResponse<Project>>> {
    claims.require_editor()?;
    let uploads = read_files(&mut multipart, "files").await?;
    let count = uploads.len();

    let written = state.media.upload_project_images(id, uploads).await?;
    Ok(Json(WriteResponse {
        data: written.record,
        rows: written.records,
        notice: Notice::success(format!("{} image(s) uploaded successfully", count)),
    }))
}
