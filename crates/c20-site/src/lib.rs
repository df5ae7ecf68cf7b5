//! Site operations for the c20 content server.
//!
//! This crate ties content loading and rendering together:
//! - [`ContentPipeline`]: renders one page on demand, loading its inputs concurrently
//! - [`build_language_index`] / [`compile_search_indexes`]: per-language search indexes
//! - [`resolve_redirect`] / [`build_redirects`]: redirects derived from front matter
//! - [`build_site`]: full static build into the output directory

mod build;
mod error;
mod pipeline;
mod redirects;
mod search;

pub use build::{BuildReport, build_site};
pub use error::SiteError;
pub use pipeline::{ContentPipeline, RenderFlags};
pub use redirects::{RedirectTable, build_redirects, resolve_redirect};
pub use search::{SearchDoc, build_language_index, compile_search_indexes, search_docs};
