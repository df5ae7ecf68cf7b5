//! Document sections surrounding the page body.

use std::fmt::Write;

use c20_content::PageId;

use crate::escape_html;
use crate::renderer::RenderContext;

/// Place in the document a section renders into.
///
/// Slots appear in the document in declaration order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Slot {
    /// Inside `<head>`.
    Head,
    /// Page header, above the content.
    Header,
    /// Inside `<main>`, before the article body.
    BeforeBody,
    /// Side column next to the content.
    Aside,
    /// Page footer.
    Footer,
}

/// A piece of page chrome rendered from the render context.
pub trait Section: Send + Sync {
    /// Unique section name.
    fn name(&self) -> &'static str;

    /// Slot the section renders into.
    fn slot(&self) -> Slot;

    /// Position within the slot; lower renders first.
    fn order(&self) -> u16 {
        0
    }

    /// Append the section's HTML to `out`. Writing nothing omits the section.
    fn render(&self, ctx: &RenderContext<'_>, out: &mut String);
}

/// URL of a page under the base URL.
pub(crate) fn page_url(base_url: &str, page_id: &PageId) -> String {
    format!("{}{}", base_url.trim_end_matches('/'), page_id)
}

/// `<meta>` tags from front matter.
pub(crate) struct HeadMeta;

impl Section for HeadMeta {
    fn name(&self) -> &'static str {
        "head-meta"
    }

    fn slot(&self) -> Slot {
        Slot::Head
    }

    fn render(&self, ctx: &RenderContext<'_>, out: &mut String) {
        let front = ctx.config.front;
        if let Some(keywords) = front.keywords.as_ref().filter(|k| !k.is_empty()) {
            let _ = writeln!(
                out,
                r#"<meta name="keywords" content="{}">"#,
                escape_html(&keywords.join(", "))
            );
        }
        if let Some(description) = front.extra.get("description").and_then(|v| v.as_str()) {
            let _ = writeln!(
                out,
                r#"<meta name="description" content="{}">"#,
                escape_html(description)
            );
        }
        let _ = writeln!(
            out,
            r#"<link rel="canonical" href="{}">"#,
            escape_html(&page_url(ctx.config.base_url, ctx.config.page_id))
        );
    }
}

/// Preload hint for the language's search index.
pub(crate) struct SearchPreload;

impl Section for SearchPreload {
    fn name(&self) -> &'static str {
        "search-preload"
    }

    fn slot(&self) -> Slot {
        Slot::Head
    }

    fn order(&self) -> u16 {
        10
    }

    fn render(&self, ctx: &RenderContext<'_>, out: &mut String) {
        if let Some(href) = ctx.search_preload {
            let _ = writeln!(
                out,
                r#"<link rel="preload" href="{}" as="fetch" crossorigin>"#,
                escape_html(href)
            );
        }
    }
}

/// Links to the ancestors of the page.
pub(crate) struct Breadcrumbs;

impl Section for Breadcrumbs {
    fn name(&self) -> &'static str {
        "breadcrumbs"
    }

    fn slot(&self) -> Slot {
        Slot::Header
    }

    fn render(&self, ctx: &RenderContext<'_>, out: &mut String) {
        let config = ctx.config;
        let mut ancestors = Vec::new();
        let mut current = config.page_id.parent();
        while let Some(id) = current {
            current = id.parent();
            ancestors.push(id);
        }
        if ancestors.is_empty() {
            return;
        }
        ancestors.reverse();

        out.push_str(r#"<nav class="breadcrumbs"><ol>"#);
        for id in &ancestors {
            let title = config.page_index.title(id, config.lang).map_or_else(
                || id.segments().next_back().unwrap_or("Home").to_owned(),
                ToOwned::to_owned,
            );
            let _ = write!(
                out,
                r#"<li><a href="{}">{}</a></li>"#,
                escape_html(&page_url(config.base_url, id)),
                escape_html(&title)
            );
        }
        out.push_str("</ol></nav>\n");
    }
}

/// Page thumbnail from the `thumbnail` front matter field.
pub(crate) struct Thumbnail;

impl Section for Thumbnail {
    fn name(&self) -> &'static str {
        "thumbnail"
    }

    fn slot(&self) -> Slot {
        Slot::BeforeBody
    }

    fn render(&self, ctx: &RenderContext<'_>, out: &mut String) {
        let config = ctx.config;
        if config.no_thumbs {
            return;
        }
        let Some(thumbnail) = config.front.thumbnail.as_deref() else {
            return;
        };
        let page = page_url(config.base_url, config.page_id);
        let src = format!("{}/{}", page.trim_end_matches('/'), thumbnail);
        let _ = writeln!(
            out,
            r#"<figure class="thumbnail"><img src="{}" alt="{}"></figure>"#,
            escape_html(&src),
            escape_html(ctx.title)
        );
    }
}

/// Table of contents for headings below the title.
pub(crate) struct TableOfContents;

impl Section for TableOfContents {
    fn name(&self) -> &'static str {
        "toc"
    }

    fn slot(&self) -> Slot {
        Slot::Aside
    }

    fn render(&self, ctx: &RenderContext<'_>, out: &mut String) {
        let entries: Vec<_> = ctx.toc.iter().filter(|e| e.level >= 2).collect();
        if entries.is_empty() {
            return;
        }
        out.push_str(r#"<nav class="toc"><ul>"#);
        for entry in entries {
            let _ = write!(
                out,
                r##"<li class="toc-level-{}"><a href="#{}">{}</a></li>"##,
                entry.level,
                escape_html(&entry.id),
                escape_html(&entry.title)
            );
        }
        out.push_str("</ul></nav>\n");
    }
}

/// Dump of the render inputs, shown when debug rendering is on.
pub(crate) struct DebugPanel;

impl Section for DebugPanel {
    fn name(&self) -> &'static str {
        "debug"
    }

    fn slot(&self) -> Slot {
        Slot::Footer
    }

    fn order(&self) -> u16 {
        100
    }

    fn render(&self, ctx: &RenderContext<'_>, out: &mut String) {
        let config = ctx.config;
        if !config.debug {
            return;
        }
        let dump = serde_json::json!({
            "pageId": config.page_id,
            "lang": config.lang,
            "front": config.front,
            "localData": config.local_data,
            "globalData": config.global_data,
            "pageCount": config.page_index.len(),
        });
        let pretty = serde_json::to_string_pretty(&dump).unwrap_or_default();
        let _ = writeln!(
            out,
            r#"<details class="debug"><summary>Debug</summary><pre>{}</pre></details>"#,
            escape_html(&pretty)
        );
    }
}
