//! Admin dashboard handlers.
//!
//! Every content table gets the same four handlers (list, create, update, delete),
//! generated per table by `content_handlers!`. Writes require an editor role and answer
//! with the written row, the refetched list and a notice.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Extension, Json,
};
use uuid::Uuid;

use crate::api::types::*;
use crate::auth::Claims;
use crate::domain::*;
use crate::error::PortfolioResult;
use crate::AppState;

macro_rules! content_handlers {
    (
        $module:ident,
        $entity:ident,
        $form:ident,
        field = $field:ident,
        tag = $tag:tt,
        collection = $collection:tt,
        item = $item:tt
    ) => {
        pub mod $module {
            use super::*;

            #[utoipa::path(
                get,
                path = $collection,
                responses((status = 200, description = "All rows in display order", body = Vec<$entity>)),
                security(("bearer_auth" = [])),
                tag = $tag
            )]
            pub async fn list(State(state): State<AppState>) -> PortfolioResult<Json<Vec<$entity>>> {
                Ok(Json(state.$field.list().await?))
            }

            #[utoipa::path(
                post,
                path = $collection,
                request_body = $form,
                responses(
                    (status = 201, description = "Row created", body = WriteResponse<$entity>),
                    (status = 403, description = "Viewer cannot edit"),
                    (status = 422, description = "Invalid form")
                ),
                security(("bearer_auth" = [])),
                tag = $tag
            )]
            pub async fn create(
                State(state): State<AppState>,
                Extension(claims): Extension<Claims>,
                Json(form): Json<$form>,
            ) -> PortfolioResult<(StatusCode, Json<WriteResponse<$entity>>)> {
                claims.require_editor()?;
                let written = state.$field.create(form).await?;
                Ok((
                    StatusCode::CREATED,
                    Json(WriteResponse {
                        data: written.record,
                        rows: written.records,
                        notice: Notice::created(<$entity as Entity>::LABEL),
                    }),
                ))
            }

            #[utoipa::path(
                put,
                path = $item,
                params(("id" = Uuid, Path, description = "Row ID")),
                request_body = $form,
                responses(
                    (status = 200, description = "Row updated", body = WriteResponse<$entity>),
                    (status = 404, description = "Row not found"),
                    (status = 422, description = "Invalid form")
                ),
                security(("bearer_auth" = [])),
                tag = $tag
            )]
            pub async fn update(
                State(state): State<AppState>,
                Extension(claims): Extension<Claims>,
                Path(id): Path<Uuid>,
                Json(form): Json<$form>,
            ) -> PortfolioResult<Json<WriteResponse<$entity>>> {
                claims.require_editor()?;
                let written = state.$field.update(id, form).await?;
                Ok(Json(WriteResponse {
                    data: written.record,
                    rows: written.records,
                    notice: Notice::updated(<$entity as Entity>::LABEL),
                }))
            }

            #[utoipa::path(
                delete,
                path = $item,
                params(
                    ("id" = Uuid, Path, description = "Row ID"),
                    ("confirm" = Option<bool>, Query, description = "Must be true")
                ),
                responses(
                    (status = 200, description = "Row deleted", body = DeleteResponse<$entity>),
                    (status = 400, description = "Delete not confirmed"),
                    (status = 404, description = "Row not found")
                ),
                security(("bearer_auth" = [])),
                tag = $tag
            )]
            pub async fn remove(
                State(state): State<AppState>,
                Extension(claims): Extension<Claims>,
                Path(id): Path<Uuid>,
                Query(query): Query<DeleteQuery>,
            ) -> PortfolioResult<Json<DeleteResponse<$entity>>> {
                claims.require_editor()?;
                let rows = state.$field.delete(id, query.confirm).await?;
                Ok(Json(DeleteResponse {
                    rows,
                    notice: Notice::deleted(<$entity as Entity>::LABEL),
                }))
            }
        }
    };
}

content_handlers!(
    projects,
    Project,
    ProjectForm,
    field = projects,
    tag = "projects",
    collection = "/v1/admin/projects",
    item = "/v1/admin/projects/{id}"
);

content_handlers!(
    experiences,
    Experience,
    ExperienceForm,
    field = experiences,
    tag = "experience",
    collection = "/v1/admin/experiences",
    item = "/v1/admin/experiences/{id}"
);

content_handlers!(
    educations,
    Education,
    EducationForm,
    field = educations,
    tag = "education",
    collection = "/v1/admin/educations",
    item = "/v1/admin/educations/{id}"
);

content_handlers!(
    skills,
    Skill,
    SkillForm,
    field = skills,
    tag = "skills",
    collection = "/v1/admin/skills",
    item = "/v1/admin/skills/{id}"
);

content_handlers!(
    services,
    Service,
    ServiceForm,
    field = services,
    tag = "about",
    collection = "/v1/admin/services",
    item = "/v1/admin/services/{id}"
);

content_handlers!(
    stats,
    Stat,
    StatForm,
    field = stats,
    tag = "about",
    collection = "/v1/admin/stats",
    item = "/v1/admin/stats/{id}"
);

content_handlers!(
    contact_info,
    ContactInfo,
    ContactInfoForm,
    field = contact_info,
    tag = "contact",
    collection = "/v1/admin/contact-info",
    item = "/v1/admin/contact-info/{id}"
);

content_handlers!(
    footer_items,
    FooterItem,
    FooterItemForm,
    field = footer_items,
    tag = "footer",
    collection = "/v1/admin/footer",
    item = "/v1/admin/footer/{id}"
);

// ==================== Skills ====================

/// Skills grouped by category, as the public page shows them.
///
/// GET /v1/admin/skills/grouped
#[utoipa::path(
    get,
    path = "/v1/admin/skills/grouped",
    responses((status = 200, description = "Skills by category", body = Vec<SkillGroup>)),
    security(("bearer_auth" = [])),
    tag = "skills"
)]
pub async fn grouped_skills(State(state): State<AppState>) -> PortfolioResult<Json<Vec<SkillGroup>>> {
    Ok(Json(group_skills(state.skills.list().await?)))
}

// ==================== Footer ====================

/// Save every footer row at once. Only changed rows are written.
///
/// PUT /v1/admin/footer
#[utoipa::path(
    put,
    path = "/v1/admin/footer",
    request_body = FooterBatch,
    responses(
        (status = 200, description = "Footer saved", body = FooterSaveResponse),
        (status = 404, description = "A row no longer exists"),
        (status = 422, description = "Invalid row")
    ),
    security(("bearer_auth" = [])),
    tag = "footer"
)]
pub async fn save_footer(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    Json(batch): Json<FooterBatch>,
) -> PortfolioResult<Json<FooterSaveResponse>> {
    claims.require_editor()?;
    let saved = state.footer.save_all(batch).await?;
    Ok(Json(FooterSaveResponse {
        updated: saved.updated,
        rows: saved.items,
        notice: Notice::success("Footer information updated successfully"),
    }))
}

// ==================== Profile ====================

/// The viewer's own profile, or null before the first save.
///
/// GET /v1/admin/profile
#[utoipa::path(
    get,
    path = "/v1/admin/profile",
    responses((status = 200, description = "Viewer's profile", body = Option<Profile>)),
    security(("bearer_auth" = [])),
    tag = "profile"
)]
pub async fn get_profile(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
) -> PortfolioResult<Json<Option<Profile>>> {
    Ok(Json(state.profiles.get(&claims.sub).await?))
}

/// Create or update the viewer's profile.
///
/// PUT /v1/admin/profile
#[utoipa::path(
    put,
    path = "/v1/admin/profile",
    request_body = ProfileForm,
    responses(
        (status = 200, description = "Profile saved", body = ProfileResponse),
        (status = 422, description = "Invalid form")
    ),
    security(("bearer_auth" = [])),
    tag = "profile"
)]
pub async fn save_profile(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    Json(form): Json<ProfileForm>,
) -> PortfolioResult<Json<ProfileResponse>> {
    claims.require_editor()?;
    let profile = state.profiles.save(&claims.sub, form).await?;
    Ok(Json(ProfileResponse {
        data: profile,
        notice: Notice::updated("Profile"),
    }))
}

// ==================== Messages ====================

/// Contact form submissions, newest first.
///
/// GET /v1/admin/messages
#[utoipa::path(
    get,
    path = "/v1/admin/messages",
    responses((status = 200, description = "Inbox", body = Vec<InboxMessage>)),
    security(("bearer_auth" = [])),
    tag = "messages"
)]
pub async fn list_messages(State(state): State<AppState>) -> PortfolioResult<Json<Vec<InboxMessage>>> {
    Ok(Json(state.inbox.list().await?))
}

/// DELETE /v1/admin/messages/{id}
#[utoipa::path(
    delete,
    path = "/v1/admin/messages/{id}",
    params(
        ("id" = Uuid, Path, description = "Message ID"),
        ("confirm" = Option<bool>, Query, description = "Must be true")
    ),
    responses(
        (status = 200, description = "Message deleted", body = DeleteResponse<InboxMessage>),
        (status = 400, description = "Delete not confirmed"),
        (status = 404, description = "Message not found")
    ),
    security(("bearer_auth" = [])),
    tag = "messages"
)]
pub async fn delete_message(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    Path(id): Path<Uuid>,
    Query(query): Query<DeleteQuery>,
) -> PortfolioResult<Json<DeleteResponse<InboxMessage>>> {
    claims.require_editor()?;
    let rows = state.inbox.delete(id, query.confirm).await?;
    Ok(Json(DeleteResponse {
        rows,
        notice: Notice::deleted("Message"),
    }))
}
