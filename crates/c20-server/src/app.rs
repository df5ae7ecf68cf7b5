//! Router construction.
//!
//! Builds the axum router with the static file chain and request tracing.

use std::sync::Arc;

use axum::Router;
use tower_http::trace::TraceLayer;

use crate::state::AppState;
use crate::static_files;

/// Create the application router.
pub(crate) fn create_router(state: Arc<AppState>) -> Router {
    let opts = state.pipeline.opts();
    let output_dir = opts.output_dir.clone();
    let content_dir = opts.content_dir.clone();

    static_files::static_router(state, &output_dir, &content_dir)
        .layer(TraceLayer::new_for_http())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;

    use axum::body::Body;
    use axum::http::{HeaderMap, Request, StatusCode, header};
    use c20_config::BuildOpts;
    use c20_content::FsContentSource;
    use c20_site::ContentPipeline;
    use pretty_assertions::assert_eq;
    use tower::ServiceExt;

    use crate::handlers::NOT_FOUND_BODY;

    struct TestSite {
        _temp: tempfile::TempDir,
        opts: BuildOpts,
    }

    impl TestSite {
        fn new() -> Self {
            let temp = tempfile::tempdir().unwrap();
            let opts = BuildOpts::with_root(temp.path());
            let site = Self { _temp: temp, opts };
            site.write_content("index.en.md", "# Home\n");
            site.write_content(
                "guide/index.en.md",
                "---\ntitle: Guide\nthumbnail: cover.png\n---\n\n## Setup\n",
            );
            site.write_content("guide/cover.png", "png");
            site.write_content("new/index.en.md", "---\ntitle: New\nredirects: [/old]\n---\n");
            site
        }

        fn write_content(&self, rel: &str, contents: &str) {
            write(&self.opts.content_dir.join(rel), contents);
        }

        fn write_output(&self, rel: &str, contents: &str) {
            write(&self.opts.output_dir.join(rel), contents);
        }

        fn router(&self, on_demand: bool) -> Router {
            let pipeline = ContentPipeline::new(
                Arc::new(FsContentSource::from_opts(&self.opts)),
                Arc::new(self.opts.clone()),
                Arc::new(c20_render::init()),
            );
            create_router(Arc::new(AppState {
                pipeline,
                on_demand,
                debug: false,
            }))
        }
    }

    fn write(path: &Path, contents: &str) {
        std::fs::create_dir_all(path.parent().unwrap()).unwrap();
        std::fs::write(path, contents).unwrap();
    }

    async fn get(router: &Router, uri: &str) -> (StatusCode, HeaderMap, String) {
        let response = router
            .clone()
            .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();
        let status = response.status();
        let headers = response.headers().clone();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        (status, headers, String::from_utf8(bytes.to_vec()).unwrap())
    }

    fn content_type(headers: &HeaderMap) -> &str {
        headers[header::CONTENT_TYPE].to_str().unwrap()
    }

    #[tokio::test]
    async fn test_renders_page_until_source_deleted() {
        let site = TestSite::new();
        let router = site.router(true);

        let (status, headers, body) = get(&router, "/guide").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(content_type(&headers), "text/html; charset=UTF-8");
        assert!(body.contains("<title>Guide - c20</title>"));
        assert!(!body.contains("cover.png"));

        let (status, _, _) = get(&router, "/guide/").await;
        assert_eq!(status, StatusCode::OK);

        std::fs::remove_file(site.opts.content_dir.join("guide/index.en.md")).unwrap();
        let (status, _, body) = get(&router, "/guide").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body, NOT_FOUND_BODY);
    }

    #[tokio::test]
    async fn test_debug_query_enables_debug_panel() {
        let site = TestSite::new();
        let router = site.router(true);

        let (_, _, body) = get(&router, "/guide").await;
        assert!(!body.contains(r#"class="debug""#));

        let (_, _, body) = get(&router, "/guide?debug=1").await;
        assert!(body.contains(r#"class="debug""#));

        let (_, _, body) = get(&router, "/guide?debug=").await;
        assert!(!body.contains(r#"class="debug""#));
    }

    #[tokio::test]
    async fn test_redirect_is_found() {
        let site = TestSite::new();

        for on_demand in [true, false] {
            let (status, headers, _) = get(&site.router(on_demand), "/old").await;
            assert_eq!(status, StatusCode::FOUND);
            assert_eq!(headers[header::LOCATION], "/new");
        }
    }

    #[tokio::test]
    async fn test_missing_page_is_fixed_404() {
        let site = TestSite::new();
        let router = site.router(true);

        for uri in ["/missing", "/style.css", "/a%20b"] {
            let (status, headers, body) = get(&router, uri).await;
            assert_eq!(status, StatusCode::NOT_FOUND, "{uri}");
            assert_eq!(content_type(&headers), "text/plain; charset=UTF-8");
            assert_eq!(body, NOT_FOUND_BODY);
        }
    }

    #[tokio::test]
    async fn test_static_file_wins_over_redirect() {
        let site = TestSite::new();
        site.write_output("old", "static old");

        let (status, _, body) = get(&site.router(true), "/old").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, "static old");
    }

    #[tokio::test]
    async fn test_content_files_served_on_demand_only() {
        let site = TestSite::new();

        let (status, _, body) = get(&site.router(true), "/guide/cover.png").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, "png");

        let (status, _, _) = get(&site.router(false), "/guide/cover.png").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_built_pages_served_when_not_on_demand() {
        let site = TestSite::new();
        site.write_output("index.html", "built home");
        let router = site.router(false);

        let (status, _, body) = get(&router, "/").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, "built home");

        let (status, _, _) = get(&router, "/guide").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_search_index() {
        let site = TestSite::new();
        let router = site.router(true);

        let (status, headers, body) = get(&router, "/assets/search-index_EN.json").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(content_type(&headers), "application/json; charset=UTF-8");
        assert!(body.starts_with(r#"{"lang":"en""#));
        assert!(body.contains(r#""path":"/guide""#));

        let (status, _, _) = get(&router, "/assets/search-index_zz.json").await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);

        let (status, _, _) = get(&site.router(false), "/assets/search-index_en.json").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }
}
