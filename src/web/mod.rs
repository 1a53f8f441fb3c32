//! Web API for the configurator.
//!
//! Exposes one shared [`ConfiguratorStore`] over HTTP so a browser renderer
//! can drive it. Every mutation is a [`Command`] posted to `/api/commands`;
//! the response carries the outcomes and the new version, and clients
//! re-fetch `/api/state` when the version moved.
//!
//! # Endpoints
//!
//! - `GET /health` - Health check
//! - `GET /api/catalog` - Module presets and starter layouts
//! - `GET /api/state` - State, metrics, conflicts and ghost preview
//! - `POST /api/commands` - Apply one command or an ordered list
//! - `GET /api/export` - Export document (JSON)
//! - `GET /api/export/markdown` - Export document as Markdown
//! - `GET /api/export/summary` - Plain-text summary
//! - `GET /api/export/snapshot` - Snapshot request for the renderer

use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::info;

use crate::catalog::Catalog;
use crate::config::Config;
use crate::engine::Ghost;
use crate::export::{self, ExportDocument, SnapshotRequest};
use crate::models::{ConfiguratorState, InteractionMode};
use crate::persistence::{FileStore, PersistenceAdapter};
use crate::store::{Command, CommandOutcome, ConfiguratorStore, Metrics};

// ============================================================================
// Application State
// ============================================================================

/// Shared application state for the web API.
#[derive(Clone)]
pub struct AppState {
    store: Arc<Mutex<ConfiguratorStore>>,
}

impl AppState {
    /// Wraps a store for sharing between handlers.
    #[must_use]
    pub fn new(store: ConfiguratorStore) -> Self {
        Self {
            store: Arc::new(Mutex::new(store)),
        }
    }

    fn lock(&self) -> MutexGuard<'_, ConfiguratorStore> {
        self.store.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

// ============================================================================
// Request/Response Types
// ============================================================================

/// Health check response.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
}

/// Full view of the configurator for rendering.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StateResponse {
    pub version: u64,
    pub mode: InteractionMode,
    pub state: ConfiguratorState,
    pub metrics: Metrics,
    /// Instance ids currently overlapping or out of bounds
    pub conflicts: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ghost: Option<Ghost>,
}

/// Body of `POST /api/commands`.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum CommandRequest {
    Batch(Vec<Command>),
    Single(Command),
}

/// Result of applying commands.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CommandResponse {
    pub outcomes: Vec<CommandOutcome>,
    pub version: u64,
    pub metrics: Metrics,
}

/// Plain-text summary.
#[derive(Debug, Serialize)]
pub struct SummaryResponse {
    pub text: String,
}

/// Markdown export.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MarkdownResponse {
    pub markdown: String,
    pub suggested_filename: String,
}

/// API error response.
#[derive(Debug, Serialize)]
pub struct ApiError {
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl ApiError {
    fn with_details(error: impl Into<String>, details: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            details: Some(details.into()),
        }
    }
}

type ApiResult<T> = Result<Json<T>, (StatusCode, Json<ApiError>)>;

// ============================================================================
// Handlers
// ============================================================================

/// GET /health
async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

/// GET /api/catalog
async fn get_catalog(State(state): State<AppState>) -> Json<Catalog> {
    Json(state.lock().catalog().clone())
}

/// GET /api/state
async fn get_state(State(state): State<AppState>) -> Json<StateResponse> {
    let store = state.lock();
    Json(StateResponse {
        version: store.version(),
        mode: store.state().interaction.mode(),
        state: store.state().clone(),
        metrics: store.metrics(),
        conflicts: store.conflicts(),
        ghost: store.ghost(),
    })
}

/// POST /api/commands - Rejected commands are reported per item, never as an
/// HTTP error.
async fn apply_commands(
    State(state): State<AppState>,
    request: Result<Json<CommandRequest>, JsonRejection>,
) -> ApiResult<CommandResponse> {
    let Json(request) = request.map_err(|e| {
        (
            StatusCode::BAD_REQUEST,
            Json(ApiError::with_details("Invalid command", e.body_text())),
        )
    })?;
    let commands = match request {
        CommandRequest::Batch(commands) => commands,
        CommandRequest::Single(command) => vec![command],
    };
    let mut store = state.lock();
    let outcomes = store.dispatch_all(commands);
    Ok(Json(CommandResponse {
        outcomes,
        version: store.version(),
        metrics: store.metrics(),
    }))
}

fn current_document(state: &AppState) -> ExportDocument {
    let store = state.lock();
    export::to_document(store.state(), store.catalog(), Utc::now())
}

/// GET /api/export
async fn export_document(State(state): State<AppState>) -> Json<ExportDocument> {
    Json(current_document(&state))
}

/// GET /api/export/markdown
async fn export_markdown(State(state): State<AppState>) -> Json<MarkdownResponse> {
    let store = state.lock();
    let now = Utc::now();
    let document = export::to_document(store.state(), store.catalog(), now);
    Json(MarkdownResponse {
        markdown: export::to_markdown(&document, store.state(), store.catalog()),
        suggested_filename: SnapshotRequest::with_extension(store.state(), now, "md").filename,
    })
}

/// GET /api/export/summary
async fn export_summary(State(state): State<AppState>) -> Json<SummaryResponse> {
    Json(SummaryResponse {
        text: export::to_summary_text(&current_document(&state)),
    })
}

/// GET /api/export/snapshot
async fn export_snapshot(State(state): State<AppState>) -> Json<SnapshotRequest> {
    Json(SnapshotRequest::new(state.lock().state(), Utc::now()))
}

// ============================================================================
// Router
// ============================================================================

/// Creates the API router around `store`.
pub fn create_router(store: ConfiguratorStore) -> Router {
    // The server is meant to run next to a local frontend
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/health", get(health_check))
        .route("/api/catalog", get(get_catalog))
        .route("/api/state", get(get_state))
        .route("/api/commands", post(apply_commands))
        .route("/api/export", get(export_document))
        .route("/api/export/markdown", get(export_markdown))
        .route("/api/export/summary", get(export_summary))
        .route("/api/export/snapshot", get(export_snapshot))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(AppState::new(store))
}

/// Runs the web server.
///
/// The store persists to `data_dir`, so the terminal UI and the web
/// frontend see the same saved configuration.
pub async fn run_server(config: Config, data_dir: PathBuf, addr: SocketAddr) -> anyhow::Result<()> {
    let catalog = config.catalog()?;
    let grid = config.default_grid()?;
    let adapter = PersistenceAdapter::new(FileStore::new(&data_dir));
    let store = ConfiguratorStore::with_persistence(catalog, grid, adapter);
    let app = create_router(store);

    info!("Starting Prefab Planner web server on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
