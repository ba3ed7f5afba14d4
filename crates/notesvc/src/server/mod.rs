//! HTTP server for notesvc.
//!
//! This module wires the note store into an axum router, applies the CORS
//! and request-tracing layers, and runs the listener until shutdown.

pub mod error;
pub mod handlers;
pub mod openapi;

use std::future::Future;
use std::net::SocketAddr;
use std::sync::Arc;

use axum::extract::DefaultBodyLimit;
use axum::http::Method;
use axum::routing::get;
use axum::Router;
use tokio::net::TcpListener;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::{info, warn};

use crate::error::{Error, Result};
use crate::store::NoteStore;

pub use error::ApiError;
pub use openapi::ApiDoc;

/// State shared by every request handler.
#[derive(Debug, Clone)]
pub struct AppState {
    /// The service's note store.
    pub store: Arc<NoteStore>,
}

/// Build the router for the notes API around `store`.
///
/// Request bodies are not size-limited.
pub fn router(store: Arc<NoteStore>) -> Router {
    Router::new()
        .route("/info", get(handlers::info))
        .route(
            "/notes",
            get(handlers::list_notes).post(handlers::create_note),
        )
        .route(
            "/notes/",
            get(handlers::missing_note_id)
                .put(handlers::missing_note_id)
                .delete(handlers::missing_note_id),
        )
        .route(
            "/notes/:id",
            get(handlers::get_note)
                .put(handlers::update_note)
                .delete(handlers::delete_note),
        )
        .route("/openapi.json", get(openapi::openapi_json))
        .layer(DefaultBodyLimit::disable())
        .layer(TraceLayer::new_for_http())
        .layer(cors_layer())
        .with_state(AppState { store })
}

/// Cross-origin policy: any origin and header, the four note methods.
fn cors_layer() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
        .allow_headers(Any)
}

/// Bind a listener on `addr`.
///
/// # Errors
///
/// Returns [`Error::Bind`] if the address is unavailable.
pub async fn bind(addr: SocketAddr) -> Result<TcpListener> {
    TcpListener::bind(addr)
        .await
        .map_err(|source| Error::Bind { addr, source })
}

/// Serve the notes API on `listener` until `shutdown` resolves.
///
/// In-flight requests are allowed to finish once shutdown begins.
///
/// # Errors
///
/// Returns an error if the listener fails.
pub async fn serve<F>(listener: TcpListener, store: Arc<NoteStore>, shutdown: F) -> Result<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    let addr = listener.local_addr()?;
    info!(%addr, "Notes service listening");

    axum::serve(listener, router(store))
        .with_graceful_shutdown(shutdown)
        .await?;

    info!("Notes service stopped");
    Ok(())
}

/// Resolve when the process receives Ctrl-C or SIGTERM.
pub async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(err) = tokio::signal::ctrl_c().await {
            warn!(error = %err, "Failed to listen for Ctrl-C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        use tokio::signal::unix::{signal, SignalKind};

        match signal(SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(err) => {
                warn!(error = %err, "Failed to listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }

    info!("Shutdown signal received");
}
