//! `c20 build` command implementation.

use std::path::PathBuf;

use c20_config::{Config, EnvSettings};
use c20_site::build_site;
use clap::Args;

use crate::error::CliError;
use crate::output::Output;

/// Arguments for the build command.
#[derive(Args)]
pub(crate) struct BuildArgs {
    /// Path to configuration file (default: auto-discover c20.toml).
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Enable verbose output.
    #[arg(short, long)]
    pub verbose: bool,
}

impl BuildArgs {
    /// Execute the build command.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration fails or any page fails to build.
    pub(crate) async fn execute(self) -> Result<(), CliError> {
        let output = Output::new();

        let env = EnvSettings::from_env()?;
        let config = Config::load(self.config.as_deref(), &env, None)?;
        let opts = config.build_opts();

        output.building(&opts);
        let report = build_site(&opts).await?;
        output.built(&report);
        Ok(())
    }
}
