use axum::{routing::delete, routing::get, Router};
use std::sync::Arc;
use thiserror::Error;
use tokio::sync::RwLock;
use tower_http::cors::{Any, CorsLayer};
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::angles::AngleEngine;
use crate::events::{spawn_event_logger, EventBus};
use crate::storage::{StateStore, StorageError};

use super::api::location as location_handlers;
use super::api::look_angles as angle_handlers;
use super::api::satellites as satellite_handlers;
use super::api_doc::ApiDoc;
use super::auth::AppState;
use super::config::{Config, ConfigError};
use super::session::Session;
use super::ui::handlers as ui_handlers;

const STATIC_DIR: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/src/web/static");

#[derive(Debug, Error)]
pub enum ServerError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),
    #[error("state error: {0}")]
    Storage(#[from] StorageError),
}

/// Restore the stored session and assemble the shared state.
pub fn build_state(config: Config) -> Result<AppState, ServerError> {
    let store = StateStore::new(config.storage.state_file.clone());
    let stored = store.load()?;
    let session = Session::restore(&config, stored)?;
    log::info!(
        "Observer at {:.4}, {:.4} with {} satellites",
        session.observer.latitude,
        session.observer.longitude,
        session.catalog.len()
    );

    Ok(AppState {
        engine: AngleEngine::new(config.engine),
        config: Arc::new(config),
        session: Arc::new(RwLock::new(session)),
        store: Arc::new(store),
        events: EventBus::new(),
    })
}

pub fn build_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        // UI routes
        .route("/", get(ui_handlers::dashboard))
        // Angle API
        .route("/api/look-angles", get(angle_handlers::look_angles))
        // Satellite API
        .route(
            "/api/satellites",
            get(satellite_handlers::list_satellites).post(satellite_handlers::add_satellite),
        )
        .route(
            "/api/satellites/{name}",
            delete(satellite_handlers::delete_satellite),
        )
        // Location API
        .route(
            "/api/location",
            get(location_handlers::get_location).put(location_handlers::set_location),
        )
        // Static files
        .nest_service("/static", ServeDir::new(STATIC_DIR))
        // OpenAPI / Swagger
        .merge(SwaggerUi::new("/swagger-ui").url("/api-doc/openapi.json", ApiDoc::openapi()))
        // Middleware
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

pub async fn run_server(config: Config) -> Result<(), ServerError> {
    let bind_addr = config.web.bind.clone();
    let state = build_state(config)?;
    spawn_event_logger(&state.events);

    let app = build_router(state);

    log::info!("Starting server on {}", bind_addr);

    let listener = tokio::net::TcpListener::bind(&bind_addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}
