//! Page index built by walking the content tree.
//!
//! Every directory holding at least one `index.<lang>.md` file is a page.
//! The index is rebuilt on each call; nothing is cached between requests.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::LazyLock;

use regex::Regex;
use serde::Serialize;

use crate::markdown::parse_front_matter;
use crate::{ContentError, FrontMatter, PageId};

static SOURCE_FILE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^index\.(\w{2})\.md$").unwrap());

/// One language version of a page.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct PageRecord {
    /// Parsed front matter.
    pub front: FrontMatter,
    /// Page directory.
    pub base_dir: PathBuf,
    /// Markdown source for this language.
    pub source_path: PathBuf,
}

/// Per-language records of a single page, keyed by language code.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct PageLanguages(BTreeMap<String, PageRecord>);

impl PageLanguages {
    /// Record for a language, if the page has one.
    #[must_use]
    pub fn get(&self, lang: &str) -> Option<&PageRecord> {
        self.0.get(lang)
    }

    /// Record for a language, failing when it is missing.
    ///
    /// # Errors
    ///
    /// Returns `ContentError::MissingLanguage` if the page has no `lang` source.
    pub fn require(&self, page_id: &PageId, lang: &str) -> Result<&PageRecord, ContentError> {
        self.get(lang).ok_or_else(|| ContentError::MissingLanguage {
            page_id: page_id.to_string(),
            lang: lang.to_owned(),
        })
    }

    /// Language codes the page exists in.
    pub fn languages(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    /// All records with their language codes.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &PageRecord)> {
        self.0.iter().map(|(lang, record)| (lang.as_str(), record))
    }

    /// Add or replace a record.
    pub fn insert(&mut self, lang: impl Into<String>, record: PageRecord) {
        self.0.insert(lang.into(), record);
    }
}

/// All pages of the site.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct PageIndex(BTreeMap<PageId, PageLanguages>);

impl PageIndex {
    /// Create an empty index.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Languages of a page, if it exists.
    #[must_use]
    pub fn get(&self, page_id: &PageId) -> Option<&PageLanguages> {
        self.0.get(page_id)
    }

    /// Pages in id order.
    pub fn iter(&self) -> impl Iterator<Item = (&PageId, &PageLanguages)> {
        self.0.iter()
    }

    /// Number of pages.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Check if the index has no pages.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Add a page record.
    pub fn insert(&mut self, page_id: PageId, lang: impl Into<String>, record: PageRecord) {
        self.0.entry(page_id).or_default().insert(lang, record);
    }

    /// Title of a page in a language, if it has one.
    #[must_use]
    pub fn title(&self, page_id: &PageId, lang: &str) -> Option<&str> {
        self.get(page_id)?.get(lang)?.front.title.as_deref()
    }
}

/// Build the page index for a content directory.
///
/// Hidden entries are skipped. A missing content directory gives an empty index.
///
/// # Errors
///
/// Returns an error if a directory or source cannot be read, or a source
/// has invalid front matter.
pub fn load_page_index(content_dir: &Path) -> Result<PageIndex, ContentError> {
    let mut index = PageIndex::new();
    if content_dir.is_dir() {
        scan_directory(content_dir, &PageId::root(), &mut index)?;
    }
    tracing::debug!(pages = index.len(), dir = %content_dir.display(), "Loaded page index");
    Ok(index)
}

fn scan_directory(dir: &Path, page_id: &PageId, index: &mut PageIndex) -> Result<(), ContentError> {
    let entries = fs::read_dir(dir).map_err(|e| ContentError::io(dir, e))?;

    let mut entries: Vec<_> = entries.filter_map(Result::ok).collect();
    entries.sort_by_key(fs::DirEntry::file_name);

    for entry in entries {
        let name = entry.file_name().to_string_lossy().into_owned();
        if name.starts_with('.') {
            continue;
        }

        let path = entry.path();
        if entry.file_type().is_ok_and(|t| t.is_dir()) {
            let child_route = if page_id.is_root() {
                name
            } else {
                format!("{}/{name}", page_id.as_str().trim_start_matches('/'))
            };
            scan_directory(&path, &PageId::from_route(Some(&child_route)), index)?;
        } else if let Some(caps) = SOURCE_FILE_RE.captures(&name) {
            let lang = caps[1].to_lowercase();
            let md_src = fs::read_to_string(&path).map_err(|e| ContentError::io(&path, e))?;
            let front = parse_front_matter(&md_src, &path)?;
            index.insert(
                page_id.clone(),
                lang,
                PageRecord {
                    front,
                    base_dir: dir.to_path_buf(),
                    source_path: path,
                },
            );
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn write(path: &Path, content: &str) {
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, content).unwrap();
    }

    #[test]
    fn test_load_page_index_finds_pages_and_languages() {
        let temp = tempfile::tempdir().unwrap();
        let root = temp.path();
        write(&root.join("index.en.md"), "---\ntitle: Home\n---\n# Home");
        write(&root.join("guide/index.en.md"), "---\ntitle: Guide\n---\n");
        write(&root.join("guide/index.es.md"), "---\ntitle: Guía\n---\n");
        write(&root.join("guide/tags.yml"), "a: 1");
        write(&root.join("h1/tags/index.en.md"), "# Tags");

        let index = load_page_index(root).unwrap();

        assert_eq!(index.len(), 3);
        assert_eq!(index.title(&PageId::root(), "en"), Some("Home"));

        let guide = PageId::from_route(Some("guide"));
        let langs: Vec<_> = index.get(&guide).unwrap().languages().collect();
        assert_eq!(langs, vec!["en", "es"]);
        assert_eq!(index.title(&guide, "es"), Some("Guía"));

        let tags = index.get(&PageId::from_route(Some("h1/tags"))).unwrap();
        let record = tags.get("en").unwrap();
        assert_eq!(record.base_dir, root.join("h1/tags"));
        assert_eq!(record.source_path, root.join("h1/tags/index.en.md"));
        assert_eq!(record.front, FrontMatter::default());
    }

    #[test]
    fn test_directories_without_sources_are_not_pages() {
        let temp = tempfile::tempdir().unwrap();
        write(&temp.path().join("h1/tags/index.en.md"), "# Tags");
        write(&temp.path().join("h1/notes.md"), "# Not a page source");

        let index = load_page_index(temp.path()).unwrap();

        assert_eq!(index.len(), 1);
        assert!(index.get(&PageId::from_route(Some("h1"))).is_none());
    }

    #[test]
    fn test_hidden_entries_are_skipped() {
        let temp = tempfile::tempdir().unwrap();
        write(&temp.path().join(".drafts/index.en.md"), "# Draft");
        write(&temp.path().join("visible/index.en.md"), "# Visible");

        let index = load_page_index(temp.path()).unwrap();

        let ids: Vec<_> = index.iter().map(|(id, _)| id.as_str()).collect();
        assert_eq!(ids, vec!["/visible"]);
    }

    #[test]
    fn test_missing_content_dir_is_empty() {
        let index = load_page_index(Path::new("/nonexistent/content")).unwrap();
        assert!(index.is_empty());
    }

    #[test]
    fn test_invalid_front_matter_fails() {
        let temp = tempfile::tempdir().unwrap();
        write(&temp.path().join("bad/index.en.md"), "---\ntitle: [x\n---\n");

        let err = load_page_index(temp.path()).unwrap_err();
        assert!(matches!(err, ContentError::FrontMatter { .. }));
    }

    #[test]
    fn test_require_missing_language() {
        let mut index = PageIndex::new();
        let id = PageId::from_route(Some("guide"));
        index.insert(
            id.clone(),
            "en",
            PageRecord {
                front: FrontMatter::default(),
                base_dir: PathBuf::from("/c/guide"),
                source_path: PathBuf::from("/c/guide/index.en.md"),
            },
        );

        let langs = index.get(&id).unwrap();
        assert!(langs.require(&id, "en").is_ok());
        let err = langs.require(&id, "zz").unwrap_err();
        assert!(matches!(err, ContentError::MissingLanguage { .. }));
    }
}
