//! HTTP server for the portfolio page.
//!
//! Serves the fully rendered page and a small JSON API over the same
//! catalog. The catalog and filter controller are read-only and shared
//! through `Arc`; each request builds its own [`FilterState`]. The theme
//! preference is the only mutable resource and sits behind a mutex.
//!
//! # Endpoints
//!
//! | Method | Path | Description |
//! |--------|------|-------------|
//! | `GET`  | `/` | Rendered page for `?q=&tag=` |
//! | `GET`  | `/api/projects` | Filtered projects and card HTML for `?q=&tag=` |
//! | `GET`  | `/api/tags` | Tag selector options (`all` first) |
//! | `GET`  | `/api/theme` | Current theme |
//! | `POST` | `/theme/toggle` | Flip the theme, then redirect to `/` |
//! | `GET`  | `/health` | Health check (returns version) |
//!
//! # Error Contract
//!
//! ```json
//! { "error": { "code": "bad_request", "message": "unknown tag: Rust" } }
//! ```
//!
//! Error codes: `bad_request` (400), `internal` (500).

use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::{Html, IntoResponse, Redirect, Response},
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tokio::sync::Mutex;
use tower_http::cors::{Any, CorsLayer};

use portfolio_core::filter::{FilterController, TagOption};
use portfolio_core::models::{FilterState, TagSelection};
use portfolio_core::theme::{
    load_theme, save_theme, KeyValueStore, MemoryStore, Theme, THEME_KEY,
};

use crate::catalog::load_catalog;
use crate::config::Config;
use crate::prefs::JsonFileStore;
use crate::search::{search_projects, SearchResponse};
use crate::site::{build_page, current_year, filter_query, render_document};

/// Shared application state passed to all route handlers via Axum's `State` extractor.
#[derive(Clone)]
pub struct AppState {
    config: Arc<Config>,
    filters: Arc<FilterController>,
    prefs: Arc<Mutex<JsonFileStore>>,
}

impl AppState {
    pub fn new(config: Config) -> anyhow::Result<Self> {
        let catalog = load_catalog(&config)?;
        let filters = FilterController::new(Arc::new(catalog), config.links.policy());
        let prefs = JsonFileStore::open(&config.theme.store_path)?;
        Ok(Self {
            config: Arc::new(config),
            filters: Arc::new(filters),
            prefs: Arc::new(Mutex::new(prefs)),
        })
    }
}

pub fn build_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/", get(handle_page))
        .route("/api/projects", get(handle_projects))
        .route("/api/tags", get(handle_tags))
        .route("/api/theme", get(handle_theme))
        .route("/theme/toggle", post(handle_theme_toggle))
        .route("/health", get(handle_health))
        .layer(cors)
        .with_state(state)
}

/// Binds to `[server].bind` and serves until the process is terminated.
pub async fn run_server(config: &Config) -> anyhow::Result<()> {
    let bind_addr = config.server.bind.clone();
    let state = AppState::new(config.clone())?;
    tracing::info!(
        projects = state.filters.catalog().len(),
        tags = state.filters.tags().len(),
        "catalog ready"
    );

    let app = build_router(state);

    println!("Portfolio server listening on http://{}", bind_addr);

    let listener = tokio::net::TcpListener::bind(&bind_addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

// ============ Error response ============

#[derive(Serialize)]
struct ErrorBody {
    error: ErrorDetail,
}

#[derive(Serialize)]
struct ErrorDetail {
    code: String,
    message: String,
}

/// Internal error type that converts into an Axum HTTP response.
struct AppError {
    status: StatusCode,
    code: String,
    message: String,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let body = ErrorBody {
            error: ErrorDetail {
                code: self.code,
                message: self.message,
            },
        };
        (self.status, Json(body)).into_response()
    }
}

fn bad_request(message: impl Into<String>) -> AppError {
    AppError {
        status: StatusCode::BAD_REQUEST,
        code: "bad_request".to_string(),
        message: message.into(),
    }
}

fn internal(message: impl Into<String>) -> AppError {
    AppError {
        status: StatusCode::INTERNAL_SERVER_ERROR,
        code: "internal".to_string(),
        message: message.into(),
    }
}

// ============ Query parameters ============

/// `?q=&tag=` as submitted by the page's filter form.
#[derive(Debug, Default, Deserialize)]
struct FilterQuery {
    #[serde(default)]
    q: Option<String>,
    #[serde(default)]
    tag: Option<String>,
}

impl FilterQuery {
    fn into_state(self) -> FilterState {
        FilterState::new(
            TagSelection::from_param(self.tag.as_deref()),
            self.q.unwrap_or_default(),
        )
    }
}

// ============ GET / ============

async fn handle_page(
    State(state): State<AppState>,
    Query(query): Query<FilterQuery>,
) -> Result<Html<String>, AppError> {
    let filter = query.into_state();
    state
        .filters
        .validate(&filter.selected_tag)
        .map_err(|e| bad_request(e.to_string()))?;

    let theme = current_theme(&state).await;
    let mut store = MemoryStore::new();
    store
        .set(THEME_KEY, theme.as_str())
        .map_err(|e| internal(e.to_string()))?;

    let page = build_page(
        &state.config,
        state.filters.shared_catalog(),
        &mut store,
        &filter,
        current_year(),
    )
    .map_err(|e| bad_request(e.to_string()))?;

    tracing::debug!(
        tag = %filter.selected_tag,
        query = %filter.search_text,
        cards = page.rendered_titles().len(),
        "page rendered"
    );
    Ok(Html(render_document(&state.config, &page)))
}

// ============ GET /api/projects ============

async fn handle_projects(
    State(state): State<AppState>,
    Query(query): Query<FilterQuery>,
) -> Result<Json<SearchResponse>, AppError> {
    let filter = query.into_state();
    search_projects(&state.filters, &filter)
        .map(Json)
        .map_err(|e| bad_request(e.to_string()))
}

// ============ GET /api/tags ============

#[derive(Serialize)]
struct TagsResponse {
    tags: Vec<TagOption>,
}

async fn handle_tags(State(state): State<AppState>) -> Json<TagsResponse> {
    Json(TagsResponse {
        tags: state.filters.tag_options(),
    })
}

// ============ Theme ============

#[derive(Serialize)]
struct ThemeResponse {
    theme: Theme,
    label: &'static str,
}

async fn current_theme(state: &AppState) -> Theme {
    let prefs = state.prefs.lock().await;
    load_theme(&*prefs)
}

async fn handle_theme(State(state): State<AppState>) -> Json<ThemeResponse> {
    let theme = current_theme(&state).await;
    Json(ThemeResponse {
        theme,
        label: theme.label(),
    })
}

async fn handle_theme_toggle(
    State(state): State<AppState>,
    Query(query): Query<FilterQuery>,
) -> Result<Redirect, AppError> {
    let mut prefs = state.prefs.lock().await;
    let next = load_theme(&*prefs).toggled();
    save_theme(&mut *prefs, next).map_err(|e| internal(e.to_string()))?;
    tracing::info!(theme = %next, "theme toggled");
    let back = format!("/{}", filter_query(&query.into_state()));
    Ok(Redirect::to(&back))
}

// ============ GET /health ============

#[derive(Serialize)]
struct HealthResponse {
    status: String,
    version: String,
}

async fn handle_health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}
