//! Static file serving.
//!
//! Files on disk always take priority over rendered pages and redirects:
//! the output directory is tried first, then (on-demand only) the content
//! directory, and only then the dispatch handler.
//!
//! Directory index files are served from the output directory only when
//! pages are not rendered on demand, so a stale build never shadows a
//! fresh render.

use std::path::Path;
use std::sync::Arc;

use axum::Router;
use axum::handler::Handler;
use tower_http::services::ServeDir;

use crate::handlers;
use crate::state::AppState;

/// Create router whose fallback serves static files, then dispatches.
pub(crate) fn static_router(state: Arc<AppState>, output_dir: &Path, content_dir: &Path) -> Router {
    let on_demand = state.on_demand;
    let dispatch = handlers::dispatch.with_state(state);
    let output = ServeDir::new(output_dir).append_index_html_on_directories(!on_demand);

    if on_demand {
        let content = ServeDir::new(content_dir)
            .append_index_html_on_directories(false)
            .fallback(dispatch);
        Router::new().fallback_service(output.fallback(content))
    } else {
        Router::new().fallback_service(output.fallback(dispatch))
    }
}
