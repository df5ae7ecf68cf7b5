//! Mapping page ids to their location in the content tree.
//!
//! Each page is a directory; each language is a sibling source file in it:
//! `/guide` in `es` lives at `<content_dir>/guide/index.es.md`.

use std::path::{Path, PathBuf};

use c20_config::BuildOpts;

use crate::PageId;

/// Directory holding a page's sources and local data.
#[must_use]
pub fn page_base_dir(page_id: &PageId, opts: &BuildOpts) -> PathBuf {
    let mut dir = opts.content_dir.clone();
    dir.extend(page_id.segments());
    dir
}

/// Markdown source file for a page directory and language.
#[must_use]
pub fn page_md_src_path(base_dir: &Path, lang: &str) -> PathBuf {
    base_dir.join(format!("index.{lang}.md"))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn opts() -> BuildOpts {
        BuildOpts::with_root(Path::new("/site"))
    }

    #[test]
    fn test_page_base_dir_root() {
        assert_eq!(
            page_base_dir(&PageId::root(), &opts()),
            PathBuf::from("/site/src/content")
        );
    }

    #[test]
    fn test_page_base_dir_nested() {
        let id = PageId::from_route(Some("h1/tags"));
        assert_eq!(
            page_base_dir(&id, &opts()),
            PathBuf::from("/site/src/content/h1/tags")
        );
    }

    #[test]
    fn test_page_md_src_path_languages_are_siblings() {
        let base = PathBuf::from("/site/src/content/guide");
        let en = page_md_src_path(&base, "en");
        let es = page_md_src_path(&base, "es");

        assert_eq!(en, PathBuf::from("/site/src/content/guide/index.en.md"));
        assert_eq!(es, PathBuf::from("/site/src/content/guide/index.es.md"));
        assert_eq!(en.parent(), es.parent());
    }
}
