//! HTTP request handlers for health, authentication and the public site.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use uuid::Uuid;

use crate::api::types::*;
use crate::auth::{Claims, JwtManager, UserStore};
use crate::domain::ContactSubmissionForm;
use crate::error::{PortfolioError, PortfolioResult};
use crate::sections::{AboutView, ContactCard, FooterView, HeroView, HomePage, ProjectCard};
use crate::AppState;

/// Authentication state for login endpoint.
#[derive(Clone)]
pub struct AuthState {
    pub jwt_manager: JwtManager,
    pub user_store: UserStore,
}

/// Health check endpoint.
///
/// GET /v1/health
#[utoipa::path(
    get,
    path = "/v1/health",
    responses(
        (status = 200, description = "Service is healthy", body = HealthResponse)
    ),
    tag = "health"
)]
pub async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    let db_status = match state.store.ping().await {
        Ok(()) => "connected".to_string(),
        Err(e) => format!("error: {}", e),
    };

    Json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        database: db_status,
        timestamp: chrono::Utc::now().to_rfc3339(),
    })
}

// ==================== Authentication Endpoints ====================

/// Login to obtain a JWT token.
///
/// POST /v1/auth/login
#[utoipa::path(
    post,
    path = "/v1/auth/login",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Login successful", body = LoginResponse),
        (status = 401, description = "Invalid credentials")
    ),
    tag = "auth"
)]
pub async fn login(
    State(auth_state): State<AuthState>,
    Json(request): Json<LoginRequest>,
) -> PortfolioResult<Json<LoginResponse>> {
    let user = auth_state
        .user_store
        .authenticate(&request.email, &request.password)
        .ok_or_else(|| {
            tracing::warn!(email = %request.email, "Failed login attempt");
            PortfolioError::Unauthorized("Invalid email or password".to_string())
        })?;

    let token = auth_state
        .jwt_manager
        .generate_token(&user.id, &user.email, user.role)?;

    tracing::info!(
        user_id = %user.id,
        email = %user.email,
        role = ?user.role,
        "User logged in"
    );

    Ok(Json(LoginResponse {
        token,
        user: UserInfo {
            id: user.id.clone(),
            email: user.email.clone(),
            role: format!("{:?}", user.role).to_lowercase(),
        },
        expires_in: auth_state.jwt_manager.token_duration_hours() * 3600,
    }))
}

/// Get the current viewer.
///
/// GET /v1/auth/me
#[utoipa::path(
    get,
    path = "/v1/auth/me",
    responses(
        (status = 200, description = "Current user info", body = UserInfo),
        (status = 401, description = "Not authenticated")
    ),
    security(("bearer_auth" = [])),
    tag = "auth"
)]
pub async fn get_current_user(axum::Extension(claims): axum::Extension<Claims>) -> Json<UserInfo> {
    Json(UserInfo {
        id: claims.sub,
        email: claims.email,
        role: format!("{:?}", claims.role).to_lowercase(),
    })
}

// ==================== Public Site ====================

/// Everything the landing page shows.
///
/// GET /v1/public/home
#[utoipa::path(
    get,
    path = "/v1/public/home",
    responses((status = 200, description = "Landing page content", body = HomePage)),
    tag = "public"
)]
pub async fn home(State(state): State<AppState>) -> Json<HomePage> {
    Json(state.sections.home().await)
}

/// GET /v1/public/hero
#[utoipa::path(
    get,
    path = "/v1/public/hero",
    responses((status = 200, description = "Hero section", body = HeroView)),
    tag = "public"
)]
pub async fn hero(State(state): State<AppState>) -> Json<HeroView> {
    Json(state.sections.hero().await)
}

/// GET /v1/public/about
#[utoipa::path(
    get,
    path = "/v1/public/about",
    responses((status = 200, description = "About section with services and stats", body = AboutView)),
    tag = "public"
)]
pub async fn about(State(state): State<AppState>) -> Json<AboutView> {
    Json(state.sections.about().await)
}

/// GET /v1/public/projects
#[utoipa::path(
    get,
    path = "/v1/public/projects",
    responses((status = 200, description = "Project gallery", body = Vec<ProjectCard>)),
    tag = "public"
)]
pub async fn projects(State(state): State<AppState>) -> Json<Vec<ProjectCard>> {
    Json(state.sections.projects().await)
}

/// GET /v1/public/projects/{id}
#[utoipa::path(
    get,
    path = "/v1/public/projects/{id}",
    params(("id" = Uuid, Path, description = "Project ID")),
    responses(
        (status = 200, description = "Project detail", body = ProjectCard),
        (status = 404, description = "Project not found")
    ),
    tag = "public"
)]
pub async fn project(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> PortfolioResult<Json<ProjectCard>> {
    Ok(Json(state.sections.project(id).await?))
}

/// GET /v1/public/contact-info
#[utoipa::path(
    get,
    path = "/v1/public/contact-info",
    responses((status = 200, description = "Contact details", body = Vec<ContactCard>)),
    tag = "public"
)]
pub async fn contact_info(State(state): State<AppState>) -> Json<Vec<ContactCard>> {
    Json(state.sections.contact_info().await)
}

/// GET /v1/public/footer
#[utoipa::path(
    get,
    path = "/v1/public/footer",
    responses((status = 200, description = "Footer links and copyright line", body = FooterView)),
    tag = "public"
)]
pub async fn footer(State(state): State<AppState>) -> Json<FooterView> {
    Json(state.sections.footer().await)
}

/// Leave a message through the contact form.
///
/// POST /v1/public/contact
#[utoipa::path(
    post,
    path = "/v1/public/contact",
    request_body = ContactSubmissionForm,
    responses(
        (status = 201, description = "Message received", body = ContactResponse),
        (status = 422, description = "Invalid form")
    ),
    tag = "public"
)]
pub async fn submit_contact(
    State(state): State<AppState>,
    Json(form): Json<ContactSubmissionForm>,
) -> PortfolioResult<(StatusCode, Json<ContactResponse>)> {
    state.inbox.submit(form).await?;
    Ok((
        StatusCode::CREATED,
        Json(ContactResponse {
            notice: Notice {
                title: "Message sent".to_string(),
                description: "Thanks for reaching out. I'll get back to you soon.".to_string(),
            },
        }),
    ))
}
