//! HTTP boundary for the translation service
//!
//! ## Endpoints
//!
//! - `POST /api/translate`: translate one snippet
//! - `OPTIONS /api/translate`: CORS preflight
//!
//! Every response carries permissive CORS headers. Other methods get 405
//! and unknown paths 404, both with an `{error}` body.

pub mod models;
pub mod routes;

use axum::Router;
use axum::extract::DefaultBodyLimit;
use axum::middleware;
use axum::routing::post;
use polyglot_application::TranslateCodeUseCase;
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;
use tokio::net::TcpListener;
use tracing::info;

/// Settings of the HTTP boundary
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HttpSettings {
    /// Deadline for one translation, including every retry
    pub request_timeout: Duration,
    /// Largest accepted request body in bytes
    pub max_body_bytes: usize,
}

impl Default for HttpSettings {
    fn default() -> Self {
        Self {
            request_timeout: Duration::from_secs(300),
            max_body_bytes: 1024 * 1024,
        }
    }
}

/// Shared handler state; immutable for the lifetime of the server
pub struct AppState {
    pub use_case: TranslateCodeUseCase,
    pub request_timeout: Duration,
}

#[derive(Error, Debug)]
pub enum ServeError {
    #[error("Failed to bind {addr}: {source}")]
    Bind {
        addr: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Server error: {0}")]
    Serve(#[from] std::io::Error),
}

/// Build the Axum router for the translation endpoint.
pub fn build_router(use_case: TranslateCodeUseCase, settings: HttpSettings) -> Router {
    let state = Arc::new(AppState {
        use_case,
        request_timeout: settings.request_timeout,
    });

    Router::new()
        .route(
            "/api/translate",
            post(routes::translate)
                .options(routes::preflight)
                .fallback(routes::method_not_allowed),
        )
        .fallback(routes::not_found)
        .layer(DefaultBodyLimit::max(settings.max_body_bytes))
        .layer(middleware::map_response(routes::with_cors_headers))
        .with_state(state)
}

/// Bind `addr` and serve `router` until Ctrl-C.
pub async fn serve(router: Router, addr: &str) -> Result<(), ServeError> {
    let listener = TcpListener::bind(addr)
        .await
        .map_err(|source| ServeError::Bind {
            addr: addr.to_string(),
            source,
        })?;

    info!(addr = %listener.local_addr()?, "Polyglot server listening");

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Polyglot server stopped");
    Ok(())
}

async fn shutdown_signal() {
    // An error here means no signal handler could be installed; keep serving.
    if tokio::signal::ctrl_c().await.is_err() {
        std::future::pending::<()>().await;
    }
}
