/// Application state and router builder
///
/// Defines the shared application state and assembles the Axum router
/// with all routes and middleware.
///
/// # Example
///
/// ```no_run
/// use taskboard_api::{app::AppState, config::Config};
/// use taskboard_shared::{db, queue};
///
/// # async fn example() -> anyhow::Result<()> {
/// let config = Config::from_env()?;
/// let pool = db::create_pool(config.database.clone()).await?;
/// let client = queue::QueueClient::connect(config.queue.clone()).await?;
/// let state = AppState::new(pool, queue::NotificationQueue::new(client), config);
/// let app = taskboard_api::app::build_router(state);
/// # Ok(())
/// # }
/// ```

use crate::config::Config;
use axum::{
    extract::Request,
    middleware::Next,
    response::Response,
    routing::{delete, get, patch, post},
    Router,
};
use sqlx::PgPool;
use std::sync::Arc;
use taskboard_shared::auth::{
    jwt,
    middleware::{bearer_token, AuthContext},
};
use taskboard_shared::queue::NotificationQueue;
use tower_http::{
    cors::CorsLayer,
    trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer},
};
use tracing::Level;

/// Shared application state
///
/// Cloned into each request handler via Axum's `State` extractor; the
/// pool and queue handle are internally reference-counted so the clone
/// is cheap. No other state is shared between requests.
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool
    pub db: PgPool,

    /// Notification job queue (enqueue side)
    pub queue: NotificationQueue,

    /// Application configuration
    pub config: Arc<Config>,
}

impl AppState {
    /// Creates new application state
    pub fn new(db: PgPool, queue: NotificationQueue, config: Config) -> Self {
        Self {
            db,
            queue,
            config: Arc::new(config),
        }
    }

    /// Gets the JWT secret for token operations
    pub fn jwt_secret(&self) -> &str {
        &self.config.jwt_secret
    }
}

/// Builds the complete Axum router
///
/// # Routes
///
/// ```text
/// GET    /                    liveness (public)
/// POST   /auth/register       create account (public)
/// POST   /auth/login          obtain token (public)
/// POST   /projects            \
/// GET    /projects             |
/// GET    /projects/:id         | bearer auth required
/// PATCH  /projects/:id         |
/// DELETE /projects/:id         |
/// POST   /tasks                |
/// GET    /tasks                |
/// GET    /tasks/:id            |
/// PATCH  /tasks/:id            |
/// DELETE /tasks/:id           /
/// ```
///
/// # Middleware Stack
///
/// Request tracing (tower-http TraceLayer), permissive CORS, and bearer
/// authentication on the project/task routes.
pub fn build_router(state: AppState) -> Router {
    use crate::routes;

    // Public routes: liveness + authentication
    let public_routes = Router::new()
        .route("/", get(routes::root::root))
        .route("/auth/register", post(routes::auth::register))
        .route("/auth/login", post(routes::auth::login));

    // Project routes (bearer auth)
    let project_routes = Router::new()
        .route("/projects", post(routes::projects::create_project))
        .route("/projects", get(routes::projects::list_projects))
        .route("/projects/:id", get(routes::projects::get_project))
        .route("/projects/:id", patch(routes::projects::update_project))
        .route("/projects/:id", delete(routes::projects::delete_project));

    // Task routes (bearer auth)
    let task_routes = Router::new()
        .route("/tasks", post(routes::tasks::create_task))
        .route("/tasks", get(routes::tasks::list_tasks))
        .route("/tasks/:id", get(routes::tasks::get_task))
        .route("/tasks/:id", patch(routes::tasks::update_task))
        .route("/tasks/:id", delete(routes::tasks::delete_task));

    let protected_routes = project_routes.merge(task_routes).layer(
        axum::middleware::from_fn_with_state(state.clone(), jwt_auth_layer),
    );

    Router::new()
        .merge(public_routes)
        .merge(protected_routes)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// Bearer authentication middleware layer
///
/// Extracts and validates the JWT from the Authorization header, then
/// injects an [`AuthContext`] into request extensions. Every project and
/// task handler requires this context — there is no anonymous path.
async fn jwt_auth_layer(
    state: axum::extract::State<AppState>,
    mut req: Request,
    next: Next,
) -> Result<Response, crate::error::ApiError> {
    let auth_header = req
        .headers()
        .get(axum::http::header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok());

    let token = bearer_token(auth_header)?;
    let claims = jwt::validate_token(token, state.jwt_secret())?;

    req.extensions_mut().insert(AuthContext::from_jwt(claims.sub));

    Ok(next.run(req).await)
}
