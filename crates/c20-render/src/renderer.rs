//! Page renderer and its explicit initialization.

use std::collections::BTreeMap;
use std::fmt::Write;

use crate::body::render_body;
use crate::escape_html;
use crate::sections::{
    Breadcrumbs, DebugPanel, HeadMeta, SearchPreload, Section, Slot, TableOfContents, Thumbnail,
    page_url,
};
use crate::{RenderConfig, RenderOutput, TocEntry};

/// Site name used when global data does not provide `site.name`.
const DEFAULT_SITE_NAME: &str = "c20";

/// Values derived from the page that sections render from.
pub struct RenderContext<'a> {
    /// Caller-provided render inputs.
    pub config: &'a RenderConfig<'a>,
    /// Resolved page title.
    pub title: &'a str,
    /// Headings of the body.
    pub toc: &'a [TocEntry],
    /// Search index URL to preload, if enabled.
    pub search_preload: Option<&'a str>,
}

/// Builder for [`PageRenderer`].
#[derive(Default)]
pub struct PageRendererBuilder {
    sections: Vec<Box<dyn Section>>,
}

impl PageRendererBuilder {
    /// Register a section. A later section with the same name replaces the earlier one.
    #[must_use]
    pub fn section(mut self, section: impl Section + 'static) -> Self {
        self.sections.retain(|s| s.name() != section.name());
        self.sections.push(Box::new(section));
        self
    }

    /// Freeze the registered sections into a renderer.
    #[must_use]
    pub fn build(mut self) -> PageRenderer {
        self.sections
            .sort_by(|a, b| (a.slot(), a.order(), a.name()).cmp(&(b.slot(), b.order(), b.name())));
        PageRenderer {
            sections: self.sections,
        }
    }
}

/// Renders parsed pages into complete HTML documents.
///
/// Immutable once built; share it behind an `Arc`.
pub struct PageRenderer {
    sections: Vec<Box<dyn Section>>,
}

/// Build the standard page renderer.
///
/// Call once at process start and reuse the result for every render.
#[must_use]
pub fn init() -> PageRenderer {
    PageRenderer::builder()
        .section(HeadMeta)
        .section(SearchPreload)
        .section(Breadcrumbs)
        .section(Thumbnail)
        .section(TableOfContents)
        .section(DebugPanel)
        .build()
}

impl PageRenderer {
    /// Start an empty renderer builder.
    #[must_use]
    pub fn builder() -> PageRendererBuilder {
        PageRendererBuilder::default()
    }

    /// Names of the registered sections, in render order.
    pub fn section_names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.sections.iter().map(|s| s.name())
    }

    /// Render a page into an HTML document.
    #[must_use]
    pub fn render(&self, config: &RenderConfig<'_>) -> RenderOutput {
        let body = render_body(config.ast);

        let title = config
            .front
            .title
            .clone()
            .or(body.h1)
            .unwrap_or_else(|| {
                config
                    .page_id
                    .segments()
                    .next_back()
                    .unwrap_or("Home")
                    .to_owned()
            });

        let search_preload = config.preload_search.then(|| {
            format!(
                "{}/assets/search-index_{}.json",
                config.base_url.trim_end_matches('/'),
                config.lang
            )
        });

        let ctx = RenderContext {
            config,
            title: &title,
            toc: &body.toc,
            search_preload: search_preload.as_deref(),
        };

        let mut slots: BTreeMap<Slot, String> = BTreeMap::new();
        for section in &self.sections {
            section.render(&ctx, slots.entry(section.slot()).or_default());
        }
        let slot = |s: Slot| slots.get(&s).map_or("", String::as_str);

        let site_name = config
            .global_data
            .pointer("/site/name")
            .and_then(|v| v.as_str())
            .unwrap_or(DEFAULT_SITE_NAME);

        let mut html_doc = String::with_capacity(body.html.len() + 2048);
        let _ = write!(
            html_doc,
            r#"<!DOCTYPE html>
<html lang="{lang}">
<head>
<meta charset="utf-8">
<meta name="viewport" content="width=device-width, initial-scale=1">
<title>{title} - {site}</title>
{head}</head>
<body>
<header><a class="site-name" href="{home}">{site}</a>
{header}</header>
<main>
{before}<article>
{body}</article>
</main>
<aside>
{aside}</aside>
<footer>
{footer}</footer>
</body>
</html>
"#,
            lang = escape_html(config.lang),
            title = escape_html(&title),
            site = escape_html(site_name),
            home = escape_html(&page_url(config.base_url, &c20_content::PageId::root())),
            head = slot(Slot::Head),
            header = slot(Slot::Header),
            before = slot(Slot::BeforeBody),
            body = body.html,
            aside = slot(Slot::Aside),
            footer = slot(Slot::Footer),
        );

        tracing::debug!(page_id = %config.page_id, lang = config.lang, bytes = html_doc.len(), "Rendered page");

        RenderOutput {
            html_doc,
            title,
            toc: body.toc,
            search_preload,
        }
    }
}
