//! Error types for the HTTP server.

use axum::http::{StatusCode, header};
use axum::response::{IntoResponse, Response};

/// Server error type.
#[derive(Debug, thiserror::Error)]
pub(crate) enum ServerError {
    /// Site operation failed.
    #[error(transparent)]
    Site(#[from] c20_site::SiteError),
}

impl IntoResponse for ServerError {
    fn into_response(self) -> Response {
        tracing::error!(error = %self, "Request failed");
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            [(header::CONTENT_TYPE, "text/plain; charset=UTF-8")],
            "Internal Server Error",
        )
            .into_response()
    }
}
