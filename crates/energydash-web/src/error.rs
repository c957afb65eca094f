//! Web server errors.

use std::net::SocketAddr;

use plotters::drawing::DrawingAreaErrorKind;

/// Error type for running the web server.
#[derive(Debug, thiserror::Error)]
pub enum WebError {
    /// The listening socket could not be bound.
    #[error("failed to bind {addr}: {source}")]
    Bind {
        addr: SocketAddr,
        #[source]
        source: std::io::Error,
    },

    /// The server stopped with an I/O error.
    #[error("server error: {0}")]
    Serve(#[source] std::io::Error),

    /// The bar chart could not be drawn.
    #[error("chart rendering failed: {0}")]
    Chart(#[from] DrawingAreaErrorKind<std::io::Error>),
}
