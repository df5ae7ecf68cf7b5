//! Render inputs and outputs.

use c20_content::{Ast, FrontMatter, PageId, PageIndex};
use serde_json::Value;

use crate::TocEntry;

/// Everything a page render needs, borrowed from the caller.
#[derive(Clone, Copy, Debug)]
pub struct RenderConfig<'a> {
    /// Base URL pages are published under.
    pub base_url: &'a str,
    /// Suppress page thumbnails.
    pub no_thumbs: bool,
    /// Preload the search index for the page language.
    pub preload_search: bool,
    /// Include the debug panel.
    pub debug: bool,
    /// Page being rendered.
    pub page_id: &'a PageId,
    /// Page language.
    pub lang: &'a str,
    /// Parsed markdown body.
    pub ast: &'a Ast,
    /// Page front matter.
    pub front: &'a FrontMatter,
    /// YAML data from the page directory.
    pub local_data: &'a Value,
    /// Site-wide structured data.
    pub global_data: &'a Value,
    /// All pages of the site.
    pub page_index: &'a PageIndex,
}

/// Rendered page.
#[derive(Clone, Debug)]
pub struct RenderOutput {
    /// Complete HTML document.
    pub html_doc: String,
    /// Resolved page title.
    pub title: String,
    /// Headings of the body.
    pub toc: Vec<TocEntry>,
    /// Search index URL preloaded by the document, if any.
    pub search_preload: Option<String>,
}
