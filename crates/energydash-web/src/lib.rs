//! # energydash-web
//!
//! Browser dashboard for the energy dataset, plus a JSON API mirroring the
//! dashboard handlers. Pages are rendered on the server; all interaction
//! state travels in the query string.

pub mod error;
pub mod html;
pub mod routes;
pub mod state;
pub mod svg;

use std::net::SocketAddr;

pub use error::WebError;
pub use routes::router;
pub use state::AppState;

/// Bind `addr` and serve the dashboard until Ctrl+C.
pub async fn serve(state: AppState, addr: SocketAddr) -> Result<(), WebError> {
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .map_err(|source| WebError::Bind { addr, source })?;
    let local = listener.local_addr().map_err(WebError::Serve)?;
    tracing::info!(address = %local, "dashboard listening on http://{local}/");

    axum::serve(listener, router(state))
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(WebError::Serve)
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!(error = %e, "failed to listen for Ctrl+C");
        std::future::pending::<()>().await;
    }
    tracing::info!("shutting down");
}
