//! Async access to content, data and the page index.
//!
//! [`ContentSource`] is the seam the request pipeline loads through, so the
//! pipeline can be exercised against instrumented sources in tests.
//! [`FsContentSource`] is the filesystem implementation; its blocking tree
//! walks run on the blocking thread pool.

use std::future::Future;
use std::path::{Path, PathBuf};

use c20_config::BuildOpts;
use serde_json::Value;

use crate::data::{Recursion, load_yaml_tree};
use crate::{ContentError, PageIndex, load_page_index};

/// Loads the inputs of a page render.
///
/// Each method is an independent load with no ordering requirement on the
/// others, so callers are free to run them concurrently.
pub trait ContentSource: Send + Sync + 'static {
    /// Structured data shared by every page.
    fn load_global_data(&self) -> impl Future<Output = Result<Value, ContentError>> + Send;

    /// YAML data next to a page's sources (non-recursive).
    fn load_local_data(
        &self,
        base_dir: &Path,
    ) -> impl Future<Output = Result<Value, ContentError>> + Send;

    /// Fresh page index of the whole content tree.
    fn load_page_index(&self) -> impl Future<Output = Result<PageIndex, ContentError>> + Send;

    /// Markdown source text.
    fn read_source(&self, path: &Path)
    -> impl Future<Output = Result<String, ContentError>> + Send;
}

/// Filesystem-backed [`ContentSource`].
#[derive(Clone, Debug)]
pub struct FsContentSource {
    content_dir: PathBuf,
    data_dir: PathBuf,
}

impl FsContentSource {
    /// Create a source reading from explicit directories.
    #[must_use]
    pub fn new(content_dir: PathBuf, data_dir: PathBuf) -> Self {
        Self {
            content_dir,
            data_dir,
        }
    }

    /// Create a source for the directories in `opts`.
    #[must_use]
    pub fn from_opts(opts: &BuildOpts) -> Self {
        Self::new(opts.content_dir.clone(), opts.data_dir.clone())
    }
}

impl ContentSource for FsContentSource {
    async fn load_global_data(&self) -> Result<Value, ContentError> {
        let dir = self.data_dir.clone();
        tokio::task::spawn_blocking(move || load_yaml_tree(&dir, Recursion::Recursive)).await?
    }

    async fn load_local_data(&self, base_dir: &Path) -> Result<Value, ContentError> {
        let dir = base_dir.to_path_buf();
        tokio::task::spawn_blocking(move || load_yaml_tree(&dir, Recursion::NonRecursive)).await?
    }

    async fn load_page_index(&self) -> Result<PageIndex, ContentError> {
        let dir = self.content_dir.clone();
        tokio::task::spawn_blocking(move || load_page_index(&dir)).await?
    }

    async fn read_source(&self, path: &Path) -> Result<String, ContentError> {
        tokio::fs::read_to_string(path)
            .await
            .map_err(|e| ContentError::io(path, e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[tokio::test]
    async fn test_fs_source_loads_everything() {
        let temp = tempfile::tempdir().unwrap();
        let content = temp.path().join("content");
        let data = temp.path().join("data");
        std::fs::create_dir_all(content.join("guide")).unwrap();
        std::fs::create_dir_all(&data).unwrap();
        std::fs::write(content.join("guide/index.en.md"), "---\ntitle: Guide\n---\nHi").unwrap();
        std::fs::write(content.join("guide/links.yml"), "home: /").unwrap();
        std::fs::write(data.join("site.yml"), "name: c20").unwrap();

        let source = FsContentSource::new(content.clone(), data);

        let global = source.load_global_data().await.unwrap();
        assert_eq!(global, json!({"site": {"name": "c20"}}));

        let local = source.load_local_data(&content.join("guide")).await.unwrap();
        assert_eq!(local, json!({"links": {"home": "/"}}));

        let index = source.load_page_index().await.unwrap();
        assert_eq!(index.len(), 1);

        let text = source
            .read_source(&content.join("guide/index.en.md"))
            .await
            .unwrap();
        assert!(text.contains("title: Guide"));
    }

    #[tokio::test]
    async fn test_fs_source_missing_file_is_not_found() {
        let temp = tempfile::tempdir().unwrap();
        let source = FsContentSource::new(temp.path().to_path_buf(), temp.path().join("data"));

        let err = source
            .read_source(&temp.path().join("missing/index.en.md"))
            .await
            .unwrap_err();
        assert!(err.is_not_found());
    }
}
