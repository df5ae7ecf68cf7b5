//! Markdown body to HTML, with heading anchors.

use std::collections::HashSet;

use pulldown_cmark::{CowStr, Event, HeadingLevel, Tag, TagEnd};
use serde::Serialize;

use c20_content::Ast;

/// Table of contents entry.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct TocEntry {
    /// Heading level (1-6).
    pub level: u8,
    /// Heading text.
    pub title: String,
    /// Anchor id.
    pub id: String,
}

/// Rendered body of a page.
pub(crate) struct RenderedBody {
    pub html: String,
    pub toc: Vec<TocEntry>,
    /// Text of the first H1, if any.
    pub h1: Option<String>,
}

fn heading_level_to_num(level: HeadingLevel) -> u8 {
    match level {
        HeadingLevel::H1 => 1,
        HeadingLevel::H2 => 2,
        HeadingLevel::H3 => 3,
        HeadingLevel::H4 => 4,
        HeadingLevel::H5 => 5,
        HeadingLevel::H6 => 6,
    }
}

/// Slug for a heading anchor: lower-case alphanumerics joined by `-`.
pub(crate) fn slugify(text: &str) -> String {
    let mut slug = String::with_capacity(text.len());
    for word in text
        .split(|c: char| !c.is_alphanumeric())
        .filter(|w| !w.is_empty())
    {
        if !slug.is_empty() {
            slug.push('-');
        }
        slug.extend(word.chars().flat_map(char::to_lowercase));
    }
    if slug.is_empty() {
        slug.push_str("section");
    }
    slug
}

/// Render body events to HTML, giving every heading a unique id.
///
/// Explicit `{#id}` heading attributes are kept and reserved, so generated
/// slugs never collide with them wherever they appear in the page.
pub(crate) fn render_body(ast: &Ast) -> RenderedBody {
    let mut events: Vec<Event<'static>> = ast.events().to_vec();
    let mut toc = Vec::new();
    let mut h1 = None;
    let mut used: HashSet<String> = events
        .iter()
        .filter_map(|event| match event {
            Event::Start(Tag::Heading { id: Some(id), .. }) => Some(id.to_string()),
            _ => None,
        })
        .collect();

    let mut i = 0;
    while i < events.len() {
        let Event::Start(Tag::Heading { level, id, .. }) = &events[i] else {
            i += 1;
            continue;
        };
        let level = *level;
        let explicit_id = id.as_ref().map(ToString::to_string);

        let mut text = String::new();
        let mut end = i + 1;
        while end < events.len() && !matches!(events[end], Event::End(TagEnd::Heading(_))) {
            if let Event::Text(t) | Event::Code(t) = &events[end] {
                text.push_str(t);
            }
            end += 1;
        }

        let anchor = explicit_id.unwrap_or_else(|| unique_slug(&slugify(&text), &mut used));
        if let Event::Start(Tag::Heading { id, .. }) = &mut events[i] {
            *id = Some(CowStr::from(anchor.clone()));
        }

        if level == HeadingLevel::H1 && h1.is_none() {
            h1 = Some(text.clone());
        }
        toc.push(TocEntry {
            level: heading_level_to_num(level),
            title: text,
            id: anchor,
        });
        i = end;
    }

    let mut html = String::with_capacity(4096);
    pulldown_cmark::html::push_html(&mut html, events.into_iter());

    RenderedBody { html, toc, h1 }
}

fn unique_slug(slug: &str, used: &mut HashSet<String>) -> String {
    let mut candidate = slug.to_owned();
    let mut n = 0;
    while used.contains(&candidate) {
        n += 1;
        candidate = format!("{slug}-{n}");
    }
    used.insert(candidate.clone());
    candidate
}
