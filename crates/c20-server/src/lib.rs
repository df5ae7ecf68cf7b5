//! HTTP server for the c20 content server.
//!
//! Every request walks a fixed chain; the first stage that answers wins:
//!
//! ```text
//! request ─► output dir files (index.html only when not on demand)
//!        ─► content dir files                          [on demand]
//!        ─► GET /assets/search-index_<xx>.json         [on demand]
//!        ─► page render for /[-/_a-zA-Z0-9]* paths     [on demand]
//!        ─► redirect table (302 Found)
//!        ─► 404 "Page or file not found!"
//! ```
//!
//! # Quick Start
//!
//! ```ignore
//! use c20_config::{Config, EnvSettings};
//! use c20_server::{run_server, server_config_from_config};
//!
//! #[tokio::main]
//! async fn main() {
//!     let env = EnvSettings::from_env().unwrap();
//!     let config = Config::load(None, &env, None).unwrap();
//!     run_server(server_config_from_config(&config)).await.unwrap();
//! }
//! ```

mod app;
mod error;
mod handlers;
mod state;
mod static_files;

use std::net::SocketAddr;
use std::str::FromStr;
use std::sync::Arc;

use c20_config::BuildOpts;
use c20_content::FsContentSource;
use c20_site::ContentPipeline;
use state::AppState;

/// Server configuration.
#[derive(Clone, Debug)]
pub struct ServerConfig {
    /// Host address to bind to.
    pub host: String,
    /// Port to listen on.
    pub port: u16,
    /// Site build options.
    pub opts: BuildOpts,
    /// Render pages and search indexes on request.
    pub on_demand: bool,
    /// Debug rendering for every page.
    pub debug: bool,
}

/// Run the server until Ctrl-C.
///
/// # Errors
///
/// Returns an error if the address is invalid or the server fails to start.
pub async fn run_server(config: ServerConfig) -> Result<(), Box<dyn std::error::Error>> {
    let renderer = Arc::new(c20_render::init());
    let source = Arc::new(FsContentSource::from_opts(&config.opts));
    let pipeline = ContentPipeline::new(source, Arc::new(config.opts), renderer);

    let state = Arc::new(AppState {
        pipeline,
        on_demand: config.on_demand,
        debug: config.debug,
    });
    let app = app::create_router(state);

    let addr = SocketAddr::from_str(&format!("{}:{}", config.host, config.port))?;
    tracing::info!(on_demand = config.on_demand, "Starting server at http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

/// Wait for shutdown signal (Ctrl-C).
async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %err, "Failed to listen for Ctrl-C");
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received, stopping server...");
}

/// Create server configuration from c20 config.
#[must_use]
pub fn server_config_from_config(config: &c20_config::Config) -> ServerConfig {
    ServerConfig {
        host: config.server.host.clone(),
        port: config.server.port,
        opts: config.build_opts(),
        on_demand: config.on_demand,
        debug: config.debug,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use c20_config::{CliSettings, Config, EnvSettings};
    use pretty_assertions::assert_eq;

    #[test]
    fn test_server_config_from_config() {
        let temp = tempfile::tempdir().unwrap();
        let config_path = temp.path().join("c20.toml");
        std::fs::write(
            &config_path,
            "[server]\nport = 9000\n\n[site]\ncontent_dir = \"pages\"\n",
        )
        .unwrap();
        let env = EnvSettings {
            debug: true,
            ..EnvSettings::default()
        };
        let cli = CliSettings {
            on_demand: Some(true),
            ..CliSettings::default()
        };

        let config = Config::load(Some(&config_path), &env, Some(&cli)).unwrap();
        let server = server_config_from_config(&config);

        assert_eq!(server.port, 9000);
        assert!(server.on_demand);
        assert!(server.debug);
        assert_eq!(server.opts.content_dir, temp.path().join("pages"));
        assert_eq!(server.host, "127.0.0.1");
    }
}
