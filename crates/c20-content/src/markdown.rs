//! Markdown parsing with YAML front matter.
//!
//! Front matter is a `---` delimited YAML block at the very top of a source
//! file. pulldown-cmark reports it as a metadata block, which is lifted out
//! of the event stream and deserialized into [`FrontMatter`]; the remaining
//! events are kept as the page [`Ast`].

use std::path::Path;

use pulldown_cmark::{Event, MetadataBlockKind, Options, Parser, Tag, TagEnd};
use serde::{Deserialize, Serialize};

use crate::ContentError;

/// Page metadata from the front matter block.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct FrontMatter {
    /// Page title.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,

    /// Search keywords.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub keywords: Option<Vec<String>>,

    /// Old page ids that should redirect here.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub redirects: Vec<String>,

    /// Send visitors of this page elsewhere (page id or absolute URL).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub redirect_to: Option<String>,

    /// Thumbnail image, relative to the page directory.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub thumbnail: Option<String>,

    /// Any other fields, passed through to the renderer.
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

/// Parsed markdown body, as an owned pulldown-cmark event stream.
#[derive(Clone, Debug, Default)]
pub struct Ast {
    events: Vec<Event<'static>>,
}

impl Ast {
    /// Events of the body, front matter excluded.
    #[must_use]
    pub fn events(&self) -> &[Event<'static>] {
        &self.events
    }

    /// Check if the body has no content.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }
}

/// Result of [`parse`].
#[derive(Clone, Debug)]
pub struct ParsedPage {
    /// Markdown body.
    pub ast: Ast,
    /// Front matter (default when the source has none).
    pub front: FrontMatter,
}

fn parser_options() -> Options {
    Options::ENABLE_TABLES
        | Options::ENABLE_STRIKETHROUGH
        | Options::ENABLE_TASKLISTS
        | Options::ENABLE_FOOTNOTES
        | Options::ENABLE_HEADING_ATTRIBUTES
        | Options::ENABLE_YAML_STYLE_METADATA_BLOCKS
}

/// Parse a markdown source into its body and front matter.
///
/// `path` is only used for error context.
///
/// # Errors
///
/// Returns `ContentError::FrontMatter` if the front matter block is not
/// valid YAML for [`FrontMatter`].
pub fn parse(md_src: &str, path: &Path) -> Result<ParsedPage, ContentError> {
    let mut yaml = String::new();
    let mut in_front_matter = false;
    let mut events = Vec::new();

    for event in Parser::new_ext(md_src, parser_options()) {
        match event {
            Event::Start(Tag::MetadataBlock(MetadataBlockKind::YamlStyle)) => {
                in_front_matter = true;
            }
            Event::End(TagEnd::MetadataBlock(MetadataBlockKind::YamlStyle)) => {
                in_front_matter = false;
            }
            Event::Text(text) if in_front_matter => yaml.push_str(&text),
            event => events.push(event.into_static()),
        }
    }

    Ok(ParsedPage {
        ast: Ast { events },
        front: parse_front_matter_yaml(&yaml, path)?,
    })
}

/// Parse only the front matter of a markdown source.
///
/// Stops reading at the first body event, so large pages stay cheap to index.
///
/// # Errors
///
/// Returns `ContentError::FrontMatter` if the block is not valid YAML.
pub(crate) fn parse_front_matter(md_src: &str, path: &Path) -> Result<FrontMatter, ContentError> {
    let mut parser = Parser::new_ext(md_src, parser_options());
    let mut yaml = String::new();

    if let Some(Event::Start(Tag::MetadataBlock(MetadataBlockKind::YamlStyle))) = parser.next() {
        for event in parser {
            match event {
                Event::Text(text) => yaml.push_str(&text),
                Event::End(TagEnd::MetadataBlock(_)) => break,
                _ => {}
            }
        }
    }

    parse_front_matter_yaml(&yaml, path)
}

fn parse_front_matter_yaml(yaml: &str, path: &Path) -> Result<FrontMatter, ContentError> {
    if yaml.trim().is_empty() {
        return Ok(FrontMatter::default());
    }
    serde_yaml::from_str(yaml).map_err(|source| ContentError::FrontMatter {
        path: path.to_path_buf(),
        source,
    })
}
