//! Redirects derived from page front matter.
//!
//! Two front matter keys produce redirects:
//! - `redirects`: old page ids that should send visitors to this page
//! - `redirect_to`: send visitors of this page to another page id or absolute URL

use std::collections::BTreeMap;

use c20_content::{ContentSource, PageId, PageIndex};

use crate::SiteError;

/// Mapping from page id to redirect target (a page id or an absolute URL).
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RedirectTable(BTreeMap<PageId, String>);

impl RedirectTable {
    /// Target for a page id.
    #[must_use]
    pub fn get(&self, page_id: &PageId) -> Option<&str> {
        self.0.get(page_id).map(String::as_str)
    }

    /// Number of redirects.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Check if the table has no redirects.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterate over redirects in page id order.
    pub fn iter(&self) -> impl Iterator<Item = (&PageId, &str)> {
        self.0.iter().map(|(id, target)| (id, target.as_str()))
    }

    fn add(&mut self, from: PageId, target: String) {
        if from.as_str() == target {
            return;
        }
        match self.0.get(&from) {
            Some(existing) if *existing != target => {
                tracing::warn!(
                    from = %from,
                    existing = %existing,
                    ignored = %target,
                    "Conflicting redirect"
                );
            }
            Some(_) => {}
            None => {
                self.0.insert(from, target);
            }
        }
    }
}

fn is_absolute_url(target: &str) -> bool {
    target.starts_with("http://") || target.starts_with("https://")
}

/// Derive the redirect table from a page index.
///
/// Pages are visited in page id order, so when two pages claim the same old
/// id, the first one wins.
#[must_use]
pub fn build_redirects(index: &PageIndex) -> RedirectTable {
    let mut table = RedirectTable::default();
    for (page_id, languages) in index.iter() {
        for (_, record) in languages.iter() {
            if let Some(target) = &record.front.redirect_to {
                let target = if is_absolute_url(target) {
                    target.clone()
                } else {
                    PageId::from_path(target).to_string()
                };
                table.add(page_id.clone(), target);
            }
            for old in &record.front.redirects {
                table.add(PageId::from_path(old), page_id.to_string());
            }
        }
    }
    table
}

/// Look up the redirect target for a page id in a fresh page index.
///
/// # Errors
///
/// Returns an error if the page index cannot be loaded.
pub async fn resolve_redirect<S: ContentSource>(
    source: &S,
    page_id: &PageId,
) -> Result<Option<String>, SiteError> {
    let index = source.load_page_index().await?;
    let target = build_redirects(&index).get(page_id).map(ToOwned::to_owned);
    if let Some(target) = &target {
        tracing::info!(page_id = %page_id, target = %target, "Redirecting");
    }
    Ok(target)
}
