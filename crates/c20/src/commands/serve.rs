//! `c20 serve` command implementation.

use std::path::PathBuf;

use c20_config::{CliSettings, Config, EnvSettings};
use c20_server::{run_server, server_config_from_config};
use clap::Args;

use crate::error::CliError;
use crate::output::Output;

/// Arguments for the serve command.
#[derive(Args)]
pub(crate) struct ServeArgs {
    /// Path to configuration file (default: auto-discover c20.toml).
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Markdown content directory (overrides config).
    #[arg(long)]
    content_dir: Option<PathBuf>,

    /// Host to bind to (overrides config).
    #[arg(long)]
    host: Option<String>,

    /// Port to bind to (overrides config and environment).
    #[arg(short, long)]
    port: Option<u16>,

    /// Render pages and search indexes per request.
    #[arg(long)]
    on_demand: bool,

    /// Enable verbose output.
    #[arg(short, long)]
    pub verbose: bool,
}

impl ServeArgs {
    /// Execute the serve command.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration fails or the server fails to start.
    pub(crate) async fn execute(self) -> Result<(), CliError> {
        let output = Output::new();

        let cli_settings = CliSettings {
            host: self.host,
            port: self.port,
            content_dir: self.content_dir,
            on_demand: self.on_demand.then_some(true),
        };
        let env = EnvSettings::from_env()?;
        let config = Config::load(self.config.as_deref(), &env, Some(&cli_settings))?;

        output.serving(&config);

        run_server(server_config_from_config(&config))
            .await
            .map_err(|e| CliError::Server(e.to_string()))?;

        Ok(())
    }
}
