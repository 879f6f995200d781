//! Portfolio Core - backend for a personal portfolio site
//!
//! Serves the public site sections (with placeholder fallbacks) and the
//! admin API that manages every content table and uploaded media.

use std::sync::Arc;

use sqlx::sqlite::SqlitePool;
use tokio::net::TcpListener;

mod api;
mod auth;
mod config;
mod domain;
mod error;
mod logging;
mod manager;
mod media;
mod sections;
mod storage;

use crate::api::build_router;
use crate::api::handlers::AuthState;
use crate::auth::{JwtManager, UserStore};
use crate::config::Config;
use crate::domain::{
    ContactInfo, Education, Experience, FooterItem, Project, Service, Skill, Stat,
};
use crate::manager::{EntityManager, FooterManager, Inbox, ProfileManager};
use crate::media::MediaService;
use crate::sections::Sections;
use crate::storage::{ContentRepository, LocalObjectStore, ObjectStore, TableLocks, TableStore};

/// Application state shared across handlers.
#[derive(Clone)]
pub struct AppState {
    /// Content store, used directly for health checks.
    pub store: Arc<dyn TableStore>,
    /// Read-only public sections.
    pub sections: Sections,
    pub profiles: ProfileManager,
    pub projects: EntityManager<Project>,
    pub experiences: EntityManager<Experience>,
    pub educations: EntityManager<Education>,
    pub skills: EntityManager<Skill>,
    pub services: EntityManager<Service>,
    pub stats: EntityManager<Stat>,
    pub contact_info: EntityManager<ContactInfo>,
    pub footer_items: EntityManager<FooterItem>,
    /// Batch footer editor.
    pub footer: FooterManager,
    /// Contact form submissions.
    pub inbox: Inbox,
    /// Profile photo and project image uploads.
    pub media: MediaService,
}

impl AppState {
    /// Build every manager over one store and one set of table locks.
    pub fn new(store: Arc<dyn TableStore>, objects: Arc<dyn ObjectStore>) -> Self {
        let locks = TableLocks::new();
        Self {
            sections: Sections::new(store.clone(), locks.clone()),
            profiles: ProfileManager::new(store.clone(), locks.clone()),
            projects: EntityManager::new(store.clone(), locks.clone()),
            experiences: EntityManager::new(store.clone(), locks.clone()),
            educations: EntityManager::new(store.clone(), locks.clone()),
            skills: EntityManager::new(store.clone(), locks.clone()),
            services: EntityManager::new(store.clone(), locks.clone()),
            stats: EntityManager::new(store.clone(), locks.clone()),
            contact_info: EntityManager::new(store.clone(), locks.clone()),
            footer_items: EntityManager::new(store.clone(), locks.clone()),
            footer: FooterManager::new(store.clone(), locks.clone()),
            inbox: Inbox::new(store.clone(), locks.clone()),
            media: MediaService::new(store.clone(), objects, locks),
            store,
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // A missing .env is normal outside development
    if let Err(e) = dotenvy::dotenv() {
        eprintln!("Note: No .env file loaded ({e})");
    }

    logging::init();

    tracing::info!("Starting Portfolio Core v{}", env!("CARGO_PKG_VERSION"));

    let config = Config::load().map_err(|e| {
        tracing::error!(error = %e, "Failed to load configuration");
        anyhow::anyhow!("Configuration error: {}", e)
    })?;
    config.validate().map_err(|e| {
        tracing::error!(error = %e, "Invalid configuration");
        anyhow::anyhow!("{}", e)
    })?;

    tracing::info!(
        host = %config.server.host,
        port = %config.server.port,
        database = %config.database.url,
        storage_root = %config.storage.root,
        auth_enabled = %config.auth.enabled,
        "Configuration loaded"
    );

    let pool = SqlitePool::connect(&config.database.url)
        .await
        .map_err(|e| {
            tracing::error!(error = %e, "Failed to connect to database");
            anyhow::anyhow!("Database connection error: {}", e)
        })?;

    let repository = ContentRepository::new(pool);
    repository.init_schema().await.map_err(|e| {
        tracing::error!(error = %e, "Failed to initialize database schema");
        anyhow::anyhow!("Schema initialization error: {}", e)
    })?;

    tracing::info!("Database connected and schema initialized");

    let objects = LocalObjectStore::new(&config.storage.root, &config.storage.public_base_url);
    let storage_root = objects.root().to_path_buf();
    let state = AppState::new(Arc::new(repository), Arc::new(objects));

    let jwt_manager = JwtManager::new(
        &config.auth.jwt_secret,
        config.auth.jwt_issuer.clone(),
        config.auth.token_duration_hours,
    );
    let auth_state = AuthState {
        jwt_manager: jwt_manager.clone(),
        user_store: UserStore::new(config.auth.users.clone()),
    };

    if config.auth.enabled {
        tracing::info!(users = config.auth.users.len(), "Authentication enabled");
    } else {
        tracing::warn!("Authentication is DISABLED - admin API is open to anonymous viewers");
    }

    let app = build_router(
        state,
        config.auth.enabled,
        jwt_manager,
        auth_state,
        storage_root,
    );

    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = TcpListener::bind(&addr).await?;

    tracing::info!(address = %addr, "Server listening");
    tracing::info!("Swagger UI available at http://{}/swagger-ui/", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
