/// Application state and router builder
///
/// The schema and pool are built once at startup and passed into the router
/// explicitly; nothing is registered through module-level globals.
///
/// # Example
///
/// ```no_run
/// use taskhub_api::{app::AppState, config::Config};
/// use taskhub_api::schema::build_schema;
/// use sqlx::PgPool;
///
/// # async fn example() -> anyhow::Result<()> {
/// let config = Config::from_env()?;
/// let pool = PgPool::connect(&config.database.url).await?;
/// let state = AppState::new(pool.clone(), build_schema(pool), config);
/// let app = taskhub_api::app::build_router(state);
/// # Ok(())
/// # }
/// ```

use axum::{
    http::{header, HeaderValue, Method},
    routing::get,
    Router,
};
use sqlx::PgPool;
use std::sync::Arc;
use tower_http::{
    cors::CorsLayer,
    trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer},
};
use tracing::Level;

use crate::{config::Config, routes, schema::TaskHubSchema, tenant};

/// Shared application state
///
/// Cloned for each request handler via Axum's `State` extractor.
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool
    pub db: PgPool,

    /// GraphQL schema, built once at startup
    pub schema: TaskHubSchema,

    /// Application configuration
    pub config: Arc<Config>,
}

impl AppState {
    /// Creates new application state
    pub fn new(db: PgPool, schema: TaskHubSchema, config: Config) -> Self {
        Self {
            db,
            schema,
            config: Arc::new(config),
        }
    }
}

/// Builds the complete Axum router
///
/// # Architecture
///
/// ```text
/// /
/// ├── /health       # Liveness check (no tenant resolution)
/// └── /graphql      # POST: GraphQL execution, GET: GraphiQL
///                   # (tenant resolver middleware applied)
/// ```
///
/// # Middleware Stack
///
/// Applied in order (bottom to top):
/// 1. Request tracing (tower-http TraceLayer)
/// 2. CORS (tower-http CorsLayer)
/// 3. Tenant resolution (graphql routes only)
pub fn build_router(state: AppState) -> Router {
    // Health check is public and tenant-agnostic
    let health_routes = Router::new().route("/health", get(routes::health::health_check));

    // GraphQL routes run behind the tenant resolver
    let graphql_routes = Router::new()
        .route(
            "/graphql",
            get(routes::graphql::graphiql).post(routes::graphql::graphql_handler),
        )
        .layer(axum::middleware::from_fn_with_state(
            state.clone(),
            tenant::resolve_tenant,
        ));

    // Configure CORS based on environment
    let cors = if state.config.api.cors_origins.contains(&"*".to_string()) {
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
            .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
            .allow_headers([
                header::CONTENT_TYPE,
                header::HeaderName::from_static(tenant::TENANT_HEADER),
            ])
            .max_age(std::time::Duration::from_secs(3600))
    };

    Router::new()
        .merge(health_routes)
        .merge(graphql_routes)
        .fallback(routes::not_found)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
        .layer(cors)
        .with_state(state)
}
