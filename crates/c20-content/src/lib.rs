//! Content tree access for the c20 content server.
//!
//! This crate provides:
//! - [`PageId`]: canonical page identifiers derived from URL paths
//! - [`page_base_dir`] / [`page_md_src_path`]: mapping page ids to source files
//! - [`parse`]: markdown parsing with YAML front matter
//! - [`PageIndex`]: every page of the content tree with per-language records
//! - [`load_yaml_tree`]: structured YAML data loading
//! - [`ContentSource`]: the async seam the request pipeline loads through
//!
//! # Content Layout
//!
//! ```text
//! src/content/
//! ├── index.en.md              -> /
//! ├── guide/
//! │   ├── index.en.md          -> /guide (en)
//! │   ├── index.es.md          -> /guide (es)
//! │   └── tags.yml             -> local data for /guide
//! └── h1/tags/
//!     └── index.en.md          -> /h1/tags
//! ```

mod data;
mod error;
mod locator;
mod markdown;
mod page_id;
mod page_index;
mod source;

pub use data::{Recursion, load_yaml_tree};
pub use error::ContentError;
pub use locator::{page_base_dir, page_md_src_path};
pub use markdown::{Ast, FrontMatter, ParsedPage, parse};
pub use page_id::{PageId, is_page_route};
pub use page_index::{PageIndex, PageLanguages, PageRecord, load_page_index};
pub use source::{ContentSource, FsContentSource};
