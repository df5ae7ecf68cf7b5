//! Per-language search indexes.

use std::collections::BTreeMap;

use c20_content::{ContentError, ContentSource, FrontMatter, PageId, PageIndex};
use serde::Serialize;

use crate::SiteError;

/// Searchable view of one page in one language.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct SearchDoc {
    /// Language code.
    pub lang: String,
    /// Page path.
    pub path: PageId,
    /// Keywords joined with spaces.
    pub keywords: String,
    /// Page title, empty when the page has none.
    pub title: String,
    /// Body text.
    pub text: String,
}

impl SearchDoc {
    pub(crate) fn new(page_id: &PageId, lang: &str, front: &FrontMatter) -> Self {
        Self {
            lang: lang.to_owned(),
            path: page_id.clone(),
            keywords: front
                .keywords
                .as_deref()
                .map(|k| k.join(" "))
                .unwrap_or_default(),
            title: front.title.clone().unwrap_or_default(),
            text: String::new(),
        }
    }
}

/// Compiled index for one language.
#[derive(Serialize)]
struct CompiledIndex<'a> {
    lang: &'a str,
    docs: Vec<IndexedDoc<'a>>,
    terms: BTreeMap<String, Vec<usize>>,
}

#[derive(Serialize)]
struct IndexedDoc<'a> {
    path: &'a PageId,
    title: &'a str,
    keywords: &'a str,
}

/// Search documents for every page of the index in `lang`.
///
/// # Errors
///
/// Returns `ContentError::MissingLanguage` if any page has no `lang` record.
pub fn search_docs(index: &PageIndex, lang: &str) -> Result<Vec<SearchDoc>, ContentError> {
    index
        .iter()
        .map(|(page_id, languages)| {
            let record = languages.require(page_id, lang)?;
            Ok(SearchDoc::new(page_id, lang, &record.front))
        })
        .collect()
}

/// Compile search documents into one JSON index per language present.
///
/// The index lists the documents in input order and maps every lower-cased
/// alphanumeric term of a title, keywords or text to the documents using it.
///
/// # Errors
///
/// Returns an error if serialization fails.
pub fn compile_search_indexes(docs: &[SearchDoc]) -> Result<BTreeMap<String, String>, SiteError> {
    let mut by_lang: BTreeMap<&str, Vec<&SearchDoc>> = BTreeMap::new();
    for doc in docs {
        by_lang.entry(doc.lang.as_str()).or_default().push(doc);
    }

    by_lang
        .into_iter()
        .map(|(lang, docs)| Ok((lang.to_owned(), compile_language(lang, &docs)?)))
        .collect()
}

pub(crate) fn compile_language(
    lang: &str,
    docs: &[&SearchDoc],
) -> Result<String, serde_json::Error> {
    let mut terms: BTreeMap<String, Vec<usize>> = BTreeMap::new();
    for (idx, doc) in docs.iter().enumerate() {
        for field in [&doc.title, &doc.keywords, &doc.text] {
            for term in tokenize(field) {
                let postings = terms.entry(term).or_default();
                if postings.last() != Some(&idx) {
                    postings.push(idx);
                }
            }
        }
    }

    serde_json::to_string(&CompiledIndex {
        lang,
        docs: docs
            .iter()
            .map(|doc| IndexedDoc {
                path: &doc.path,
                title: &doc.title,
                keywords: &doc.keywords,
            })
            .collect(),
        terms,
    })
}

fn tokenize(text: &str) -> impl Iterator<Item = String> + '_ {
    text.split(|c: char| !c.is_alphanumeric())
        .filter(|t| !t.is_empty())
        .map(str::to_lowercase)
}

/// Build the compiled search index of one language from a fresh page index.
///
/// A site without pages yields an empty index.
///
/// # Errors
///
/// Returns an error if the page index cannot be loaded or any page has no
/// record in `lang`.
pub async fn build_language_index<S: ContentSource>(
    source: &S,
    lang: &str,
) -> Result<String, SiteError> {
    let index = source.load_page_index().await?;
    let docs = search_docs(&index, lang)?;
    tracing::info!(lang, docs = docs.len(), "Building search index");

    let mut compiled = compile_search_indexes(&docs)?;
    match compiled.remove(lang) {
        Some(json) => Ok(json),
        None => Ok(compile_language(lang, &[])?),
    }
}
