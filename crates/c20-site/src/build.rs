//! Full static build of the site.

use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

use c20_config::BuildOpts;
use c20_content::{ContentSource, FsContentSource, PageId, page_base_dir, parse};
use c20_render::PageRenderer;

use crate::SiteError;
use crate::pipeline::{PageInputs, RenderFlags, render_page};
use crate::search::{SearchDoc, compile_language, compile_search_indexes};

/// Summary of a finished build.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct BuildReport {
    /// Page documents written.
    pub pages: usize,
    /// Search index files written.
    pub search_indexes: usize,
}

/// Render every page of the content tree into `opts.output_dir`.
///
/// Each page is written to `<page path>/index.html` for the default
/// language and `<page path>/index_<lang>.html` for the others. A search
/// index is written to `assets/search-index_<lang>.json` for every
/// configured language and every language a page exists in.
///
/// # Errors
///
/// Returns an error if content cannot be loaded or output cannot be written.
pub async fn build_site(opts: &BuildOpts) -> Result<BuildReport, SiteError> {
    let source = FsContentSource::from_opts(opts);
    let renderer = c20_render::init();
    build_with(&source, &renderer, opts).await
}

async fn build_with<S: ContentSource>(
    source: &S,
    renderer: &PageRenderer,
    opts: &BuildOpts,
) -> Result<BuildReport, SiteError> {
    let (global_data, page_index) =
        tokio::try_join!(source.load_global_data(), source.load_page_index())?;
    let flags = RenderFlags {
        no_thumbs: opts.no_thumbs,
        preload_search: true,
        debug: false,
    };

    let mut report = BuildReport::default();
    let mut docs = Vec::new();

    for (page_id, languages) in page_index.iter() {
        let local_data = source
            .load_local_data(&page_base_dir(page_id, opts))
            .await?;

        for (lang, record) in languages.iter() {
            let md_src = source.read_source(&record.source_path).await?;
            let parsed = parse(&md_src, &record.source_path)?;
            let inputs = PageInputs {
                page_id,
                lang,
                parsed: &parsed,
                local_data: &local_data,
                global_data: &global_data,
                page_index: &page_index,
            };
            let output = render_page(renderer, opts, flags, &inputs);

            let path = page_output_path(&opts.output_dir, page_id, lang, &opts.default_language);
            write_file(&path, output.html_doc.as_bytes()).await?;
            tracing::debug!(page_id = %page_id, lang, path = %path.display(), "Wrote page");

            docs.push(SearchDoc::new(page_id, lang, &parsed.front));
            report.pages += 1;
        }
    }

    let mut compiled = compile_search_indexes(&docs)?;
    let languages: BTreeSet<String> = opts
        .languages
        .iter()
        .cloned()
        .chain(compiled.keys().cloned())
        .collect();
    for lang in &languages {
        let json = match compiled.remove(lang) {
            Some(json) => json,
            None => compile_language(lang, &[])?,
        };
        let path = search_index_path(&opts.output_dir, lang);
        write_file(&path, json.as_bytes()).await?;
        report.search_indexes += 1;
    }

    tracing::info!(
        pages = report.pages,
        search_indexes = report.search_indexes,
        output_dir = %opts.output_dir.display(),
        "Site built"
    );
    Ok(report)
}

/// Output file of a page document.
fn page_output_path(
    output_dir: &Path,
    page_id: &PageId,
    lang: &str,
    default_lang: &str,
) -> PathBuf {
    let mut path = page_id
        .segments()
        .fold(output_dir.to_path_buf(), |path, segment| path.join(segment));
    if lang == default_lang {
        path.push("index.html");
    } else {
        path.push(format!("index_{lang}.html"));
    }
    path
}

/// Output file of a language's search index.
fn search_index_path(output_dir: &Path, lang: &str) -> PathBuf {
    output_dir
        .join("assets")
        .join(format!("search-index_{lang}.json"))
}

async fn write_file(path: &Path, contents: &[u8]) -> Result<(), SiteError> {
    if let Some(parent) = path.parent() {
        tokio::fs::create_dir_all(parent)
            .await
            .map_err(|e| SiteError::io(parent, e))?;
    }
    tokio::fs::write(path, contents)
        .await
        .map_err(|e| SiteError::io(path, e))
}
