//! Campus Bridge Web Server
//!
//! Axum-based HTTP surface for the analysis gateway.

pub mod routes;
pub mod state;

use std::any::Any;

use anyhow::Context;
use axum::{
    body::Body,
    extract::DefaultBodyLimit,
    http::{HeaderValue, Method, Request, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
    Router,
};
use campus_core::config::{Environment, ServerConfig};
use tower_http::{
    catch_panic::CatchPanicLayer,
    cors::{Any as CorsAny, CorsLayer},
    trace::TraceLayer,
};
use tracing::error;
use uuid::Uuid;

pub use state::AppState;

/// Build the CORS policy: any origin in development, one origin in production.
pub fn cors_layer(config: &ServerConfig) -> anyhow::Result<CorsLayer> {
    let cors = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST])
        .allow_headers(CorsAny);

    match config.environment {
        Environment::Development => Ok(cors.allow_origin(CorsAny)),
        Environment::Production => {
            let origin = config
                .allowed_origin
                .as_deref()
                .map(str::trim)
                .filter(|origin| !origin.is_empty())
                .context("An allowed origin is required in production")?;
            let origin: HeaderValue = origin
                .parse()
                .with_context(|| format!("Invalid allowed origin: {}", origin))?;
            Ok(cors.allow_origin(origin))
        }
    }
}

/// Create the application router.
pub fn create_router(state: AppState, config: &ServerConfig) -> anyhow::Result<Router> {
    let cors = cors_layer(config)?;

    let api_routes = Router::new()
        .route("/ai/analyze", post(routes::analyze::analyze))
        .route("/execute", post(routes::execute::execute))
        .method_not_allowed_fallback(routes::health::not_found)
        .layer(DefaultBodyLimit::max(config.body_limit));

    let router = Router::new()
        .route("/", get(routes::health::index))
        .nest("/api", api_routes)
        .fallback(routes::health::not_found)
        .method_not_allowed_fallback(routes::health::not_found)
        .layer(CatchPanicLayer::custom(handle_panic))
        .layer(
            TraceLayer::new_for_http().make_span_with(|request: &Request<Body>| {
                tracing::info_span!(
                    "request",
                    id = %Uuid::new_v4(),
                    method = %request.method(),
                    uri = %request.uri(),
                )
            }),
        )
        .layer(cors)
        .with_state(state);

    Ok(router)
}

/// Turn a handler panic into a plain-text 500.
fn handle_panic(err: Box<dyn Any + Send + 'static>) -> Response {
    let detail = if let Some(s) = err.downcast_ref::<String>() {
        s.clone()
    } else if let Some(s) = err.downcast_ref::<&str>() {
        s.to_string()
    } else {
        "unknown panic".to_string()
    };
    error!(detail = %detail, "Unhandled error");

    (StatusCode::INTERNAL_SERVER_ERROR, "Something broke!").into_response()
}

/// Run the web server until Ctrl+C.
pub async fn run_server(state: AppState, config: &ServerConfig) -> anyhow::Result<()> {
    let app = create_router(state, config)?;

    let addr = format!("{}:{}", config.host, config.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;
    tracing::info!(
        environment = %config.environment,
        "AI backend server listening on http://{}",
        addr
    );

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        error!(error = %e, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutting down");
}
