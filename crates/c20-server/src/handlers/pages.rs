//! On-demand page rendering and redirects.

use axum::http::{StatusCode, header};
use axum::response::{IntoResponse, Response};
use c20_config::is_truthy;
use c20_content::PageId;
use serde::Deserialize;

use crate::error::ServerError;
use crate::state::AppState;

/// Query parameters of a page request.
#[derive(Debug, Default, Deserialize)]
pub(crate) struct PageQuery {
    /// Any non-empty value enables debug rendering.
    pub debug: Option<String>,
}

/// Render a page in the default language, or `None` if it has no source.
pub(crate) async fn render_page(
    state: &AppState,
    page_id: &PageId,
    query: &PageQuery,
) -> Result<Option<Response>, ServerError> {
    let debug = state.debug || is_truthy(query.debug.as_deref());
    let lang = &state.pipeline.opts().default_language;

    let Some(output) = state.pipeline.render(page_id, lang, debug).await? else {
        return Ok(None);
    };
    Ok(Some(
        (
            [(header::CONTENT_TYPE, "text/html; charset=UTF-8")],
            output.html_doc,
        )
            .into_response(),
    ))
}

/// Redirect response for a page id, or `None` if it has no redirect.
pub(crate) async fn redirect(
    state: &AppState,
    page_id: &PageId,
) -> Result<Option<Response>, ServerError> {
    let target = c20_site::resolve_redirect(state.pipeline.source(), page_id).await?;
    Ok(target.map(|target| (StatusCode::FOUND, [(header::LOCATION, target)]).into_response()))
}
