//! HTTP site server.
//!
//! Serves the gallery, project detail pages and the catalog as JSON. Every
//! request rebuilds from the content source; the source's freshness window
//! keeps that cheap.

use std::sync::Arc;

use axum::{
    extract::{Path, RawQuery, State},
    http::StatusCode,
    response::{Html, IntoResponse, Json, Response},
    routing::get,
    Router,
};
use tower_http::trace::TraceLayer;
use tracing::{error, info};

use crate::catalog::build_catalog;
use crate::config::AppConfig;
use crate::detail::load_project_page;
use crate::error::ShowcaseError;
use crate::gallery::{GalleryFilter, TagPalette};
use crate::render::pages;
use crate::sources::github::GitHubSource;
use crate::sources::ContentSource;

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub source: Arc<dyn ContentSource>,
    pub palette: Arc<TagPalette>,
}

impl AppState {
    pub fn new(config: AppConfig, source: Arc<dyn ContentSource>) -> Self {
        let palette = TagPalette::new(&config.tag_categories);
        Self {
            config: Arc::new(config),
            source,
            palette: Arc::new(palette),
        }
    }
}

/// Run the site on `config.bind` until Ctrl-C.
pub async fn run_server(config: AppConfig) -> Result<(), ShowcaseError> {
    let source = Arc::new(GitHubSource::new(&config)?);
    let bind = config.bind;
    info!("Serving {}/{} on http://{bind}", config.owner, config.repo);

    let app = create_router(AppState::new(config, source));
    let listener = tokio::net::TcpListener::bind(bind).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server stopped");
    Ok(())
}

pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(gallery))
        .route("/project/:name", get(project))
        .route("/api/projects", get(api_projects))
        .route("/health", get(health))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn gallery(State(state): State<AppState>, RawQuery(query): RawQuery) -> Html<String> {
    let filter = GalleryFilter::from_query(query.as_deref().unwrap_or(""));
    let projects = build_catalog(state.source.as_ref()).await;
    Html(pages::gallery_page(&projects, &filter, &state.palette))
}

async fn project(State(state): State<AppState>, Path(name): Path<String>) -> Response {
    match load_project_page(state.source.as_ref(), &state.config, &name).await {
        Ok(page) => Html(pages::project_page(&page, &state.palette)).into_response(),
        Err(ShowcaseError::NotFound(_)) => {
            (StatusCode::NOT_FOUND, Html(pages::not_found_page(&name))).into_response()
        }
        Err(e) => {
            error!("Failed to render project '{name}': {e}");
            (StatusCode::INTERNAL_SERVER_ERROR, "Failed to render project").into_response()
        }
    }
}

async fn api_projects(State(state): State<AppState>) -> impl IntoResponse {
    Json(build_catalog(state.source.as_ref()).await)
}

async fn health() -> &'static str {
    "ok"
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        error!("Failed to listen for shutdown signal: {e}");
    }
}
