//! Axum server setup
//!
//! Server skeleton with:
//! - Static form page at / via ServeDir
//! - Tracing middleware
//! - Graceful shutdown on SIGTERM/Ctrl+C, closing the pool on the way out

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Instant;

use axum::Router;
use rollcall_core::Config;
use sqlx::PgPool;
use tokio::net::TcpListener;
use tower_http::cors::{Any, CorsLayer};
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

use super::error::ApiError;
use super::routes;
use crate::db::DbError;

/// Shared application state, constructed once at startup and injected
/// into every handler. No ambient globals.
pub struct AppState {
    pool: PgPool,
    pub config: Config,
    started_at: Instant,
}

impl AppState {
    pub fn new(pool: PgPool, config: Config) -> Self {
        Self {
            pool,
            config,
            started_at: Instant::now(),
        }
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    /// Seconds since the state was constructed (process start, near enough).
    pub fn uptime_secs(&self) -> u64 {
        self.started_at.elapsed().as_secs()
    }

    /// Wrap a repository error for the HTTP boundary. Error verbosity
    /// is decided here, once, from the configured environment.
    pub fn db_error(&self, source: DbError) -> ApiError {
        ApiError::database(source, self.config.environment.is_development())
    }

    #[cfg(test)]
    pub fn for_tests(pool: PgPool) -> Self {
        let config = Config::from_lookup(|_| None).expect("default config");
        Self::new(pool, config)
    }
}

/// Build the application router with all routes.
pub fn build_router(state: Arc<AppState>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let static_files = ServeDir::new(&state.config.static_dir);

    Router::new()
        .merge(routes::health::router())
        .merge(routes::users::router())
        .fallback_service(static_files)
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Run the HTTP server until a shutdown signal, then close the pool.
pub async fn run_server(pool: PgPool, config: Config) -> Result<(), ServerError> {
    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    let state = Arc::new(AppState::new(pool.clone(), config));
    let app = build_router(state);

    let listener = TcpListener::bind(addr).await?;
    tracing::info!("server listening on {}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    pool.close().await;
    tracing::info!("server shutdown complete");
    Ok(())
}

/// Wait for shutdown signal (Ctrl+C or SIGTERM).
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::info!("received Ctrl+C, starting shutdown");
        }
        _ = terminate => {
            tracing::info!("received SIGTERM, starting shutdown");
        }
    }
}

/// Server error type
#[derive(Debug, thiserror::Error)]
pub enum ServerError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::{to_bytes, Body};
    use axum::http::{header, Request, StatusCode};
    use sqlx::postgres::PgPoolOptions;
    use tower::ServiceExt;

    // Validation failures never reach the database, so a lazy pool
    // (no connection attempted) is enough to drive the router.
    fn offline_router() -> Router {
        let pool = PgPoolOptions::new()
            .max_connections(2)
            .connect_lazy("postgres://localhost/unreachable")
            .expect("lazy pool");
        build_router(Arc::new(AppState::for_tests(pool)))
    }

    fn db_router() -> Router {
        let url = std::env::var("DATABASE_URL").expect("DATABASE_URL required");
        let pool = PgPoolOptions::new()
            .max_connections(5)
            .connect_lazy(&url)
            .expect("lazy pool");
        build_router(Arc::new(AppState::for_tests(pool)))
    }

    fn form_submit(body: &str) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri("/submit")
            .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
            .body(Body::from(body.to_owned()))
            .unwrap()
    }

    async fn body_json(response: axum::response::Response) -> serde_json::Value {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn submit_with_missing_fields_is_400_with_missing_map() {
        let response = offline_router()
            .oneshot(form_submit("name=Ada"))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let body = body_json(response).await;
        assert_eq!(body["missing"]["age"], true);
        assert_eq!(body["missing"]["city"], true);
        assert_eq!(body["missing"]["name"], false);
    }

    #[tokio::test]
    async fn submit_with_bad_age_is_400_without_insert() {
        for bad in ["abc", "-1", "121"] {
            let response = offline_router()
                .oneshot(form_submit(&format!("name=Ada&age={}&city=London", bad)))
                .await
                .unwrap();
            assert_eq!(response.status(), StatusCode::BAD_REQUEST, "age {}", bad);

            let body = body_json(response).await;
            assert!(body["error"].as_str().unwrap().contains("age"));
        }
    }

    #[tokio::test]
    async fn unknown_api_route_falls_through_to_static_404() {
        let response = offline_router()
            .oneshot(Request::builder().uri("/nope").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    #[ignore = "requires database"]
    async fn submit_then_list_round_trip() {
        let app = db_router();
        sqlx::query("TRUNCATE users RESTART IDENTITY")
            .execute(
                &PgPoolOptions::new()
                    .connect(&std::env::var("DATABASE_URL").unwrap())
                    .await
                    .unwrap(),
            )
            .await
            .unwrap();

        for (name, age) in [("A", "20"), ("B", "30"), ("C", "40")] {
            let response = app
                .clone()
                .oneshot(form_submit(&format!("name={}&age={}&city=Town", name, age)))
                .await
                .unwrap();
            assert_eq!(response.status(), StatusCode::CREATED);
        }

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/users?page=1&limit=2")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let body = body_json(response).await;
        assert_eq!(body["pagination"]["total"], 3);
        assert_eq!(body["pagination"]["totalPages"], 2);
        let names: Vec<&str> = body["users"]
            .as_array()
            .unwrap()
            .iter()
            .map(|u| u["name"].as_str().unwrap())
            .collect();
        assert_eq!(names, ["C", "B"]);
    }

    #[tokio::test]
    #[ignore = "requires database"]
    async fn oversized_limit_clamped_to_50() {
        let response = db_router()
            .oneshot(
                Request::builder()
                    .uri("/users?limit=1000")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let body = body_json(response).await;
        assert_eq!(body["pagination"]["limit"], 50);
    }

    #[tokio::test]
    #[ignore = "requires database"]
    async fn html_accept_gets_confirmation_fragment() {
        let mut request = form_submit("name=Ada&age=36&city=London");
        request
            .headers_mut()
            .insert(header::ACCEPT, "text/html".parse().unwrap());

        let response = db_router().oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::CREATED);

        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let text = String::from_utf8(bytes.to_vec()).unwrap();
        assert!(text.contains("User added successfully"));
    }
}
