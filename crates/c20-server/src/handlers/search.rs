//! On-demand search index endpoint.

use std::sync::LazyLock;

use axum::http::header;
use axum::response::{IntoResponse, Response};
use regex::Regex;

use crate::error::ServerError;
use crate::state::AppState;

static SEARCH_INDEX_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)^/assets/search-index_(\w{2})\.json$").unwrap());

/// Language of a search index request path, lower-cased.
pub(crate) fn search_index_lang(path: &str) -> Option<String> {
    SEARCH_INDEX_RE
        .captures(path)
        .map(|caps| caps[1].to_lowercase())
}

/// Build and return the search index of one language.
pub(crate) async fn search_index(state: &AppState, lang: &str) -> Result<Response, ServerError> {
    let json = c20_site::build_language_index(state.pipeline.source(), lang).await?;
    Ok((
        [(header::CONTENT_TYPE, "application/json; charset=UTF-8")],
        json,
    )
        .into_response())
}
