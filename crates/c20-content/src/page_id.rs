//! Canonical page identifiers.

use std::fmt;

use serde::Serialize;

/// Canonical identifier of a content page.
///
/// Always starts with `/` and never ends with `/`, except for the root
/// identifier `/` itself.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct PageId(String);

impl PageId {
    /// The root page identifier, `/`.
    #[must_use]
    pub fn root() -> Self {
        Self("/".to_owned())
    }

    /// Derive a page id from a route capture.
    ///
    /// `raw` is the path after the leading slash, or `None` when the route
    /// matched the bare root. Trailing slashes are dropped. Total: every
    /// input yields a valid id.
    ///
    /// ```
    /// use c20_content::PageId;
    ///
    /// assert_eq!(PageId::from_route(Some("foo/bar/")).as_str(), "/foo/bar");
    /// assert_eq!(PageId::from_route(None).as_str(), "/");
    /// ```
    #[must_use]
    pub fn from_route(raw: Option<&str>) -> Self {
        let trimmed = raw.unwrap_or_default().trim_end_matches('/');
        if trimmed.is_empty() {
            Self::root()
        } else {
            Self(format!("/{trimmed}"))
        }
    }

    /// Derive a page id from an absolute or relative path string.
    ///
    /// Leading slashes are tolerated, so `"/old"` and `"old"` give the same id.
    #[must_use]
    pub fn from_path(path: &str) -> Self {
        Self::from_route(Some(path.trim_start_matches('/')))
    }

    /// The id as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Check if this is the root page.
    #[must_use]
    pub fn is_root(&self) -> bool {
        self.0 == "/"
    }

    /// Non-empty path segments (`/h1/tags` yields `h1`, `tags`).
    pub fn segments(&self) -> impl DoubleEndedIterator<Item = &str> {
        self.0.split('/').filter(|s| !s.is_empty())
    }

    /// Parent page, or `None` for the root.
    #[must_use]
    pub fn parent(&self) -> Option<Self> {
        if self.is_root() {
            return None;
        }
        match self.0.rsplit_once('/') {
            Some(("", _)) | None => Some(Self::root()),
            Some((parent, _)) => Some(Self(parent.to_owned())),
        }
    }
}

impl fmt::Display for PageId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for PageId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Check if a request path may name a page.
///
/// Page routes are `/` followed by letters, digits, `-`, `_` and `/`.
#[must_use]
pub fn is_page_route(path: &str) -> bool {
    path.strip_prefix('/').is_some_and(|rest| {
        rest.chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '/'))
    })
}
