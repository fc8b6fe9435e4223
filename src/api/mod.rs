use anyhow::Context;
use axum::{
    Router,
    extract::DefaultBodyLimit,
    http::HeaderValue,
    middleware,
    routing::{delete, get, post, put},
};
use metrics_exporter_prometheus::PrometheusHandle;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;
use tower_sessions::{Expiry, MemoryStore, SessionManagerLayer};

use crate::config::Config;
use crate::storage::{SharedStore, open_store};
use crate::uploads::UploadService;

pub mod auth;
mod enrollments;
mod error;
mod feedback;
mod multipart;
mod notes;
mod observability;
mod question_papers;
mod system;
mod types;
mod users;
mod validation;
mod videos;

pub use error::ApiError;
pub use types::*;

/// Slack on top of the file limit for the other multipart fields.
const FORM_OVERHEAD_BYTES: u64 = 64 * 1024;

pub struct AppState {
    pub store: SharedStore,

    pub config: Config,

    pub uploads: UploadService,

    pub start_time: std::time::Instant,

    pub prometheus_handle: Option<PrometheusHandle>,
}

impl AppState {
    #[must_use]
    pub fn new(
        store: SharedStore,
        config: Config,
        prometheus_handle: Option<PrometheusHandle>,
    ) -> Self {
        let uploads = UploadService::new(
            &config.uploads.root_path,
            config.uploads.max_file_size_bytes,
        );

        Self {
            store,
            config,
            uploads,
            start_time: std::time::Instant::now(),
            prometheus_handle,
        }
    }
}

/// Opens the configured store and prepares the upload directories.
pub async fn create_app_state(
    config: Config,
    prometheus_handle: Option<PrometheusHandle>,
) -> anyhow::Result<Arc<AppState>> {
    let store = open_store(&config.storage)
        .await
        .context("Failed to open content store")?;

    let state = AppState::new(store, config, prometheus_handle);

    state.uploads.ensure_dirs().await.with_context(|| {
        format!(
            "Failed to create upload directories under {}",
            state.uploads.root().display()
        )
    })?;

    Ok(Arc::new(state))
}

pub fn router(state: Arc<AppState>) -> Router {
    let server = &state.config.server;

    let session_layer = SessionManagerLayer::new(MemoryStore::default())
        .with_secure(server.secure_cookies)
        .with_same_site(tower_sessions::cookie::SameSite::Lax)
        .with_expiry(Expiry::OnInactivity(time::Duration::minutes(
            server.session_idle_minutes,
        )));

    let cors_layer = if server.cors_allowed_origins.iter().any(|o| o == "*") {
        CorsLayer::new().allow_origin(Any)
    } else {
        let origins: Vec<HeaderValue> = server
            .cors_allowed_origins
            .iter()
            .filter_map(|s| s.parse().ok())
            .collect();
        CorsLayer::new().allow_origin(origins)
    };

    let body_limit = usize::try_from(state.uploads.max_file_size() + FORM_OVERHEAD_BYTES)
        .unwrap_or(usize::MAX);

    let api_router = Router::new()
        .merge(create_public_router())
        .merge(create_admin_router(state.clone()))
        .layer(DefaultBodyLimit::max(body_limit))
        .layer(session_layer)
        .with_state(state.clone());

    Router::new()
        .nest("/api", api_router)
        .nest_service("/uploads", ServeDir::new(state.uploads.root()))
        .layer(cors_layer.allow_methods(Any).allow_headers(Any))
        .layer(TraceLayer::new_for_http())
        .layer(middleware::from_fn(observability::logging_middleware))
}

fn create_public_router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/auth/login", post(auth::login))
        .route("/auth/register", post(auth::register))
        .route("/auth/logout", post(auth::logout))
        .route("/auth/me", get(auth::me))
        .route(
            "/question-papers",
            get(question_papers::list_question_papers),
        )
        .route(
            "/question-papers/{id}",
            get(question_papers::get_question_paper),
        )
        .route(
            "/question-papers/download/{id}",
            get(question_papers::download_question_paper),
        )
        .route("/videos", get(videos::list_videos))
        .route("/videos/{id}", get(videos::get_video))
        .route("/notes", get(notes::list_notes))
        .route("/notes/{id}", get(notes::get_note))
        .route("/notes/download/{id}", get(notes::download_note))
        .route(
            "/feedback",
            get(feedback::list_feedback).post(feedback::create_feedback),
        )
        .route("/enrollments", post(enrollments::create_enrollment))
        .route("/health", get(system::health))
}

fn create_admin_router(state: Arc<AppState>) -> Router<Arc<AppState>> {
    Router::new()
        .route(
            "/question-papers",
            post(question_papers::create_question_paper),
        )
        .route(
            "/question-papers/{id}",
            put(question_papers::update_question_paper)
                .delete(question_papers::delete_question_paper),
        )
        .route("/videos", post(videos::create_video))
        .route(
            "/videos/{id}",
            put(videos::update_video).delete(videos::delete_video),
        )
        .route("/notes", post(notes::create_note))
        .route(
            "/notes/{id}",
            put(notes::update_note).delete(notes::delete_note),
        )
        .route("/feedback/{id}", delete(feedback::delete_feedback))
        .route("/users", get(users::list_users))
        .route("/users/{id}", delete(users::delete_user))
        .route("/stats", get(system::get_stats))
        .route("/enrollments", get(enrollments::list_enrollments))
        .route(
            "/enrollments/{id}",
            get(enrollments::get_enrollment)
                .put(enrollments::update_enrollment)
                .delete(enrollments::delete_enrollment),
        )
        .route("/metrics", get(observability::get_metrics))
        .route_layer(middleware::from_fn_with_state(state, auth::require_admin))
}
