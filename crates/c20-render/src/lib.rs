//! HTML page renderer for the c20 content server.
//!
//! [`PageRenderer`] turns a parsed page plus its data into a complete HTML
//! document. The document is assembled from the markdown body and a set of
//! [`Section`]s (breadcrumbs, thumbnail, table of contents, debug panel...).
//!
//! # Initialization
//!
//! Renderers are built explicitly with [`init`], once at process start.
//! Section placement comes from each section's [`Slot`] and order key, never
//! from registration order, so registering sections in any order yields the
//! same document.
//!
//! ```
//! let renderer = c20_render::init();
//! assert!(renderer.section_names().any(|name| name == "toc"));
//! ```

mod body;
mod config;
mod escape;
mod renderer;
mod sections;

pub use body::TocEntry;
pub use config::{RenderConfig, RenderOutput};
pub use escape::escape_html;
pub use renderer::{PageRenderer, PageRendererBuilder, RenderContext, init};
pub use sections::{Section, Slot};
