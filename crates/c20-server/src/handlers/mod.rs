//! Request dispatch.
//!
//! Everything the static file services do not answer lands in [`dispatch`],
//! which tries, in order: the on-demand search index, the on-demand page
//! render, the redirect table. Anything left is the fixed 404 response.

pub(crate) mod pages;
pub(crate) mod search;

use std::sync::Arc;

use axum::extract::rejection::QueryRejection;
use axum::extract::{Query, State};
use axum::http::{Method, StatusCode, Uri, header};
use axum::response::{IntoResponse, Response};
use c20_content::{PageId, is_page_route};

use crate::error::ServerError;
use crate::state::AppState;

/// Body of every 404 response.
pub(crate) const NOT_FOUND_BODY: &str = "Page or file not found!";

/// Fallback handler for requests not served from disk.
pub(crate) async fn dispatch(
    State(state): State<Arc<AppState>>,
    method: Method,
    uri: Uri,
    query: Result<Query<pages::PageQuery>, QueryRejection>,
) -> Result<Response, ServerError> {
    let path = uri.path();
    if method != Method::GET && method != Method::HEAD {
        return Ok(not_found(path));
    }

    if state.on_demand
        && let Some(lang) = search::search_index_lang(path)
    {
        return search::search_index(&state, &lang).await;
    }

    if let Some(raw) = path.strip_prefix('/').filter(|_| is_page_route(path)) {
        let page_id = PageId::from_route(Some(raw));

        if state.on_demand {
            let query = query.map(|Query(q)| q).unwrap_or_default();
            if let Some(response) = pages::render_page(&state, &page_id, &query).await? {
                return Ok(response);
            }
        }

        if let Some(response) = pages::redirect(&state, &page_id).await? {
            return Ok(response);
        }
    }

    Ok(not_found(path))
}

/// The fixed 404 response.
pub(crate) fn not_found(path: &str) -> Response {
    tracing::warn!(path, "Page or file not found");
    (
        StatusCode::NOT_FOUND,
        [(header::CONTENT_TYPE, "text/plain; charset=UTF-8")],
        NOT_FOUND_BODY,
    )
        .into_response()
}
