//! Application state and router builder
//!
//! This module defines the shared application state and provides
//! a function to build the Axum router with all routes and middleware.
//!
//! # Example
//!
//! ```no_run
//! use std::sync::Arc;
//! use kanban_api::{app::{build_router, AppState}, config::Config};
//! use kanban_shared::store::memory::MemoryStore;
//!
//! # async fn example() -> anyhow::Result<()> {
//! let config = Config::from_env()?;
//! let state = AppState::new(Arc::new(MemoryStore::new()), config);
//! let app = build_router(state);
//!
//! let listener = tokio::net::TcpListener::bind("0.0.0.0:5000").await?;
//! axum::serve(listener, app).await?;
//! # Ok(())
//! # }
//! ```

use crate::config::Config;
use crate::routes;
use axum::{
    http::{header, HeaderValue, Method},
    middleware,
    routing::{get, post, put},
    Router,
};
use kanban_shared::auth::middleware::create_jwt_middleware;
use kanban_shared::service::KanbanService;
use kanban_shared::store::Store;
use std::sync::Arc;
use tower_http::{
    cors::CorsLayer,
    trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer},
};
use tracing::Level;

/// Shared application state
///
/// This is cloned for each request handler via Axum's `State` extractor.
/// Uses Arc internally for cheap cloning.
#[derive(Clone, Debug)]
pub struct AppState {
    /// Board, list and task operations
    pub service: KanbanService,

    /// Application configuration
    pub config: Arc<Config>,
}

impl AppState {
    /// Creates new application state over `store`
    pub fn new(store: Arc<dyn Store>, config: Config) -> Self {
        Self {
            service: KanbanService::new(store),
            config: Arc::new(config),
        }
    }

    /// Gets JWT secret for token validation
    pub fn jwt_secret(&self) -> &str {
        &self.config.jwt.secret
    }
}

/// Builds the complete Axum router with all routes and middleware
///
/// # Architecture
///
/// ```text
/// /
/// ├── GET /health                                  (public)
/// └── /api                                         (JWT required)
///     ├── /boards                  GET POST
///     │   └── /:id                 GET PUT DELETE
///     │       ├── /members         PUT
///     │       │   └── /:user_id    DELETE
///     │       ├── /lists           GET POST
///     │       │   └── /reorder     PUT
///     │       └── /activities      GET
///     ├── /lists/:id               PUT DELETE
///     │   └── /cards               GET POST        (also /tasks)
///     └── /cards/:id               GET PUT DELETE  (also /tasks/:id)
///         ├── /move                PUT
///         └── /assign              POST
///             └── /:user_id        DELETE
/// ```
///
/// # Middleware Stack
///
/// Applied in order (bottom to top):
/// 1. Authentication (`/api` only)
/// 2. Logging (tower-http TraceLayer)
/// 3. CORS (tower-http CorsLayer)
pub fn build_router(state: AppState) -> Router {
    let health_routes = Router::new().route("/health", get(routes::health::health_check));

    let board_routes = Router::new()
        .route(
            "/",
            get(routes::boards::list_boards).post(routes::boards::create_board),
        )
        .route(
            "/:id",
            get(routes::boards::get_board)
                .put(routes::boards::update_board)
                .delete(routes::boards::delete_board),
        )
        .route("/:id/members", put(routes::boards::add_member))
        .route(
            "/:id/members/:user_id",
            axum::routing::delete(routes::boards::remove_member),
        )
        .route(
            "/:id/lists",
            get(routes::lists::list_lists).post(routes::lists::create_list),
        )
        .route("/:id/lists/reorder", put(routes::lists::reorder_lists))
        .route("/:id/activities", get(routes::activities::list_activities));

    let list_routes = Router::new()
        .route(
            "/:id",
            put(routes::lists::update_list).delete(routes::lists::delete_list),
        )
        .route(
            "/:id/cards",
            get(routes::cards::list_cards).post(routes::cards::create_card),
        )
        .route(
            "/:id/tasks",
            get(routes::cards::list_cards).post(routes::cards::create_card),
        );

    let card_routes = Router::new()
        .route(
            "/:id",
            get(routes::cards::get_card)
                .put(routes::cards::update_card)
                .delete(routes::cards::delete_card),
        )
        .route("/:id/move", put(routes::cards::move_card))
        .route("/:id/assign", post(routes::cards::assign_user))
        .route(
            "/:id/assign/:user_id",
            axum::routing::delete(routes::cards::unassign_user),
        );

    let api_routes = Router::new()
        .nest("/boards", board_routes)
        .nest("/lists", list_routes)
        .nest("/cards", card_routes.clone())
        .nest("/tasks", card_routes)
        .layer(middleware::from_fn(create_jwt_middleware(
            state.jwt_secret().to_string(),
        )));

    let cors = if state.config.api.cors_origins.iter().any(|o| o == "*") {
        // Development mode: permissive CORS
        CorsLayer::permissive()
    } else {
        let origins: Vec<HeaderValue> = state
            .config
            .api
            .cors_origins
            .iter()
            .filter_map(|origin| origin.parse().ok())
            .collect();

        CorsLayer::new()
            .allow_origin(origins)
            .allow_methods([
                Method::GET,
                Method::POST,
                Method::PUT,
                Method::DELETE,
                Method::OPTIONS,
            ])
            .allow_headers([header::AUTHORIZATION, header::CONTENT_TYPE])
            .allow_credentials(true)
            .max_age(std::time::Duration::from_secs(3600))
    };

    Router::new()
        .merge(health_routes)
        .nest("/api", api_routes)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
        .layer(cors)
        .with_state(state)
}
