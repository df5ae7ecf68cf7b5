//! On-demand page rendering.
//!
//! A render starts the global data, local data and page index loads as
//! spawned tasks before awaiting the markdown source, so all four loads are
//! in flight together. A source that cannot be read means the page does not
//! exist; the auxiliary tasks are detached and their results dropped.

use std::sync::Arc;

use c20_config::BuildOpts;
use c20_content::{
    ContentError, ContentSource, PageId, PageIndex, ParsedPage, page_base_dir, page_md_src_path,
    parse,
};
use c20_render::{PageRenderer, RenderConfig, RenderOutput};
use serde_json::Value;
use tokio::task::JoinHandle;

use crate::SiteError;

/// Rendering switches that vary between on-demand and build renders.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RenderFlags {
    /// Suppress page thumbnails.
    pub no_thumbs: bool,
    /// Preload the language's search index.
    pub preload_search: bool,
    /// Include the debug panel.
    pub debug: bool,
}

impl RenderFlags {
    /// Flags for on-demand renders: no thumbnails, no search preload.
    #[must_use]
    pub fn on_demand(debug: bool) -> Self {
        Self {
            no_thumbs: true,
            preload_search: false,
            debug,
        }
    }
}

/// Renders pages on demand from a [`ContentSource`].
pub struct ContentPipeline<S> {
    source: Arc<S>,
    opts: Arc<BuildOpts>,
    renderer: Arc<PageRenderer>,
}

impl<S> Clone for ContentPipeline<S> {
    fn clone(&self) -> Self {
        Self {
            source: Arc::clone(&self.source),
            opts: Arc::clone(&self.opts),
            renderer: Arc::clone(&self.renderer),
        }
    }
}

impl<S: ContentSource> ContentPipeline<S> {
    /// Create a pipeline.
    #[must_use]
    pub fn new(source: Arc<S>, opts: Arc<BuildOpts>, renderer: Arc<PageRenderer>) -> Self {
        Self {
            source,
            opts,
            renderer,
        }
    }

    /// Content source the pipeline loads from.
    #[must_use]
    pub fn source(&self) -> &S {
        &self.source
    }

    /// Build options.
    #[must_use]
    pub fn opts(&self) -> &BuildOpts {
        &self.opts
    }

    /// Render a page with on-demand flags.
    ///
    /// Returns `Ok(None)` when the page has no source in `lang`.
    ///
    /// # Errors
    ///
    /// Returns an error if the source has invalid front matter, or loading
    /// global data, local data or the page index fails.
    pub async fn render(
        &self,
        page_id: &PageId,
        lang: &str,
        debug: bool,
    ) -> Result<Option<RenderOutput>, SiteError> {
        self.render_with(page_id, lang, RenderFlags::on_demand(debug))
            .await
    }

    /// Render a page with explicit flags.
    ///
    /// # Errors
    ///
    /// See [`ContentPipeline::render`].
    pub async fn render_with(
        &self,
        page_id: &PageId,
        lang: &str,
        flags: RenderFlags,
    ) -> Result<Option<RenderOutput>, SiteError> {
        let base_dir = page_base_dir(page_id, &self.opts);
        let src_path = page_md_src_path(&base_dir, lang);

        let global_data = tokio::spawn({
            let source = Arc::clone(&self.source);
            async move { source.load_global_data().await }
        });
        let local_data = tokio::spawn({
            let source = Arc::clone(&self.source);
            let base_dir = base_dir.clone();
            async move { source.load_local_data(&base_dir).await }
        });
        let page_index = tokio::spawn({
            let source = Arc::clone(&self.source);
            async move { source.load_page_index().await }
        });

        let md_src = match self.source.read_source(&src_path).await {
            Ok(md_src) => md_src,
            Err(err) if err.is_not_found() => {
                tracing::debug!(page_id = %page_id, lang, "No page source");
                return Ok(None);
            }
            Err(err) => {
                tracing::warn!(page_id = %page_id, lang, error = %err, "Unreadable page source");
                return Ok(None);
            }
        };

        let parsed = parse(&md_src, &src_path)?;

        let global_data = join(global_data).await?;
        let local_data = join(local_data).await?;
        let page_index = join(page_index).await?;

        tracing::info!(page_id = %page_id, lang, "Rendering page");
        let inputs = PageInputs {
            page_id,
            lang,
            parsed: &parsed,
            local_data: &local_data,
            global_data: &global_data,
            page_index: &page_index,
        };
        Ok(Some(render_page(&self.renderer, &self.opts, flags, &inputs)))
    }
}

/// Loaded inputs of a single page render.
pub(crate) struct PageInputs<'a> {
    pub page_id: &'a PageId,
    pub lang: &'a str,
    pub parsed: &'a ParsedPage,
    pub local_data: &'a Value,
    pub global_data: &'a Value,
    pub page_index: &'a PageIndex,
}

pub(crate) fn render_page(
    renderer: &PageRenderer,
    opts: &BuildOpts,
    flags: RenderFlags,
    inputs: &PageInputs<'_>,
) -> RenderOutput {
    renderer.render(&RenderConfig {
        base_url: &opts.base_url,
        no_thumbs: flags.no_thumbs,
        preload_search: flags.preload_search,
        debug: flags.debug,
        page_id: inputs.page_id,
        lang: inputs.lang,
        ast: &inputs.parsed.ast,
        front: &inputs.parsed.front,
        local_data: inputs.local_data,
        global_data: inputs.global_data,
        page_index: inputs.page_index,
    })
}

async fn join<T>(handle: JoinHandle<Result<T, ContentError>>) -> Result<T, SiteError> {
    Ok(handle.await.map_err(ContentError::from)??)
}
