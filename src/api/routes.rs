//! Route definitions for the API.

use std::path::PathBuf;

use axum::{
    extract::DefaultBodyLimit,
    middleware,
    routing::{delete, get, post, put},
    Router,
};
use tower_http::cors::{Any, CorsLayer};
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;
use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};
use utoipa_swagger_ui::SwaggerUi;

use crate::api::handlers::{self, AuthState};
use crate::api::{admin, uploads};
use crate::auth::{optional_jwt, require_jwt, JwtManager};
use crate::AppState;

/// Upload request bodies may carry several images.
const UPLOAD_BODY_LIMIT: usize = 20 * 1024 * 1024;

/// Security scheme modifier for OpenAPI.
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .build(),
                ),
            );
        }
    }
}

/// OpenAPI documentation.
#[derive(OpenApi)]
#[openapi(
    paths(
        handlers::health_check,
        handlers::login,
        handlers::get_current_user,
        handlers::home,
        handlers::hero,
        handlers::about,
        handlers::projects,
        handlers::project,
        handlers::contact_info,
        handlers::footer,
        handlers::submit_contact,
        admin::get_profile,
        admin::save_profile,
        uploads::upload_profile_photo,
        admin::projects::list,
        admin::projects::create,
        admin::projects::update,
        admin::projects::remove,
        uploads::upload_project_images,
        admin::experiences::list,
        admin::experiences::create,
        admin::experiences::update,
        admin::experiences::remove,
        admin::educations::list,
        admin::educations::create,
        admin::educations::update,
        admin::educations::remove,
        admin::skills::list,
        admin::skills::create,
        admin::skills::update,
        admin::skills::remove,
        admin::grouped_skills,
        admin::services::list,
        admin::services::create,
        admin::services::update,
        admin::services::remove,
        admin::stats::list,
        admin::stats::create,
        admin::stats::update,
        admin::stats::remove,
        admin::contact_info::list,
        admin::contact_info::create,
        admin::contact_info::update,
        admin::contact_info::remove,
        admin::footer_items::list,
        admin::footer_items::create,
        admin::footer_items::update,
        admin::footer_items::remove,
        admin::save_footer,
        admin::list_messages,
        admin::delete_message,
    ),
    components(schemas(
        crate::api::types::HealthResponse,
        crate::api::types::LoginRequest,
        crate::api::types::LoginResponse,
        crate::api::types::UserInfo,
        crate::api::types::Notice,
        crate::auth::UserRole,
        crate::domain::ProficiencyLevel,
    )),
    modifiers(&SecurityAddon),
    tags(
        (name = "public", description = "Public site sections"),
        (name = "profile", description = "Site owner profile"),
        (name = "projects", description = "Portfolio projects"),
        (name = "experience", description = "Work experience timeline"),
        (name = "education", description = "Education timeline"),
        (name = "skills", description = "Skills by category"),
        (name = "about", description = "Services and headline stats"),
        (name = "contact", description = "Contact details"),
        (name = "footer", description = "Footer links and copyright"),
        (name = "messages", description = "Contact form inbox"),
        (name = "auth", description = "Authentication endpoints"),
        (name = "health", description = "Health and status endpoints")
    ),
    info(
        title = "Portfolio Core API",
        version = "0.1.0",
        description = "Portfolio site backend - public content sections and admin content management",
        license(name = "MIT")
    )
)]
pub struct ApiDoc;

/// Build the API router with optional authentication.
///
/// With auth disabled the admin routes still run, for an anonymous viewer.
pub fn build_router(
    state: AppState,
    auth_enabled: bool,
    jwt_manager: JwtManager,
    auth_state: AuthState,
    storage_root: PathBuf,
) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let admin = if auth_enabled {
        admin_routes().layer(middleware::from_fn_with_state(jwt_manager, require_jwt))
    } else {
        admin_routes().layer(middleware::from_fn_with_state(jwt_manager, optional_jwt))
    };

    Router::new()
        .merge(admin.with_state(state.clone()))
        .merge(public_routes(state, auth_state))
        .nest_service("/storage", ServeDir::new(storage_root))
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
}

/// Routes that need no viewer.
fn public_routes(state: AppState, auth_state: AuthState) -> Router {
    Router::new()
        .route("/v1/health", get(handlers::health_check))
        .route("/v1/public/home", get(handlers::home))
        .route("/v1/public/hero", get(handlers::hero))
        .route("/v1/public/about", get(handlers::about))
        .route("/v1/public/projects", get(handlers::projects))
        .route("/v1/public/projects/:id", get(handlers::project))
        .route("/v1/public/contact-info", get(handlers::contact_info))
        .route("/v1/public/footer", get(handlers::footer))
        .route("/v1/public/contact", post(handlers::submit_contact))
        .with_state(state)
        .route("/v1/auth/login", post(handlers::login))
        .with_state(auth_state)
}

/// Admin dashboard routes. The caller layers the auth gate on top.
fn admin_routes() -> Router<AppState> {
    let uploads = Router::new()
        .route("/v1/admin/profile/photo", post(uploads::upload_profile_photo))
        .route(
            "/v1/admin/projects/:id/images",
            post(uploads::upload_project_images),
        )
        .layer(DefaultBodyLimit::max(UPLOAD_BODY_LIMIT));

    Router::new()
        .route("/v1/auth/me", get(handlers::get_current_user))
        .route(
            "/v1/admin/profile",
            get(admin::get_profile).put(admin::save_profile),
        )
        .route(
            "/v1/admin/projects",
            get(admin::projects::list).post(admin::projects::create),
        )
        .route(
            "/v1/admin/projects/:id",
            put(admin::projects::update).delete(admin::projects::remove),
        )
        .route(
            "/v1/admin/experiences",
            get(admin::experiences::list).post(admin::experiences::create),
        )
        .route(
            "/v1/admin/experiences/:id",
            put(admin::experiences::update).delete(admin::experiences::remove),
        )
        .route(
            "/v1/admin/educations",
            get(admin::educations::list).post(admin::educations::create),
        )
        .route(
            "/v1/admin/educations/:id",
            put(admin::educations::update).delete(admin::educations::remove),
        )
        .route(
            "/v1/admin/skills",
            get(admin::skills::list).post(admin::skills::create),
        )
        .route("/v1/admin/skills/grouped", get(admin::grouped_skills))
        .route(
            "/v1/admin/skills/:id",
            put(admin::skills::update).delete(admin::skills::remove),
        )
        .route(
            "/v1/admin/services",
            get(admin::services::list).post(admin::services::create),
        )
        .route(
            "/v1/admin/services/:id",
            put(admin::services::update).delete(admin::services::remove),
        )
        .route(
            "/v1/admin/stats",
            get(admin::stats::list).post(admin::stats::create),
        )
        .route(
            "/v1/admin/stats/:id",
            put(admin::stats::update).delete(admin::stats::remove),
        )
        .route(
            "/v1/admin/contact-info",
            get(admin::contact_info::list).post(admin::contact_info::create),
        )
        .route(
            "/v1/admin/contact-info/:id",
            put(admin::contact_info::update).delete(admin::contact_info::remove),
        )
        .route(
            "/v1/admin/footer",
            get(admin::footer_items::list)
                .post(admin::footer_items::create)
                .put(admin::save_footer),
        )
        .route(
            "/v1/admin/footer/:id",
            put(admin::footer_items::update).delete(admin::footer_items::remove),
        )
        .route("/v1/admin/messages", get(admin::list_messages))
        .route("/v1/admin/messages/:id", delete(admin::delete_message))
        .merge(uploads)
}
