//! Application state.
//!
//! Shared, immutable state for all request handlers.

use c20_content::FsContentSource;
use c20_site::ContentPipeline;

/// Application state shared across all handlers.
pub(crate) struct AppState {
    /// On-demand page pipeline; also gives handlers the content source and build options.
    pub pipeline: ContentPipeline<FsContentSource>,
    /// Render pages and search indexes on request.
    pub on_demand: bool,
    /// Debug rendering for every page.
    pub debug: bool,
}
