//! CLI module for meshcast.
//!
//! This module provides command-line interface functionality including:
//! - Argument parsing
//! - The render command
//!
//! # Usage
//!
//! ```ignore
//! use clap::Parser;
//! use meshcast::cli::{run_cli_command, Cli, RenderArgs};
//!
//! let args = RenderArgs::from(Cli::parse());
//! run_cli_command(args)?;
//! ```

pub mod args;
pub mod output;
pub mod render;

pub use args::{Cli, RenderArgs};
pub use render::{run_render, write_download, RenderReport};

use color_eyre::eyre::eyre;
use color_eyre::Result;

use crate::adapters::ReqwestHttpClient;
use crate::config::ClientConfig;
use crate::session::RenderOutcome;

/// Build the client configuration for a render run.
///
/// Environment overrides apply first; `--url` wins over `MESHCAST_URL`.
pub fn config_for(args: &RenderArgs) -> ClientConfig {
    let config = ClientConfig::from_env();
    match &args.url {
        Some(url) => config.with_base_url(url.clone()),
        None => config,
    }
}

/// Run a render on a fresh runtime.
///
/// A render whose stream failed still writes its partial result, then
/// reports the failure as an error.
pub fn run_cli_command(args: RenderArgs) -> Result<()> {
    let config = config_for(&args);
    let client = ReqwestHttpClient::from_config(&config)?;

    let runtime = tokio::runtime::Runtime::new()?;
    let report = runtime.block_on(run_render(client, config, &args))?;
    if let RenderOutcome::Failed { error, .. } = report.outcome {
        return Err(eyre!("Render failed: {}", error));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    #[test]
    #[serial]
    fn test_url_flag_overrides_default() {
        std::env::remove_var("MESHCAST_URL");
        let mut args = RenderArgs::new("model.yml");
        assert_eq!(config_for(&args).base_url, crate::config::DEFAULT_BASE_URL);

        args.url = Some("http://render:9000".to_string());
        assert_eq!(config_for(&args).base_url, "http://render:9000");
    }

    #[test]
    #[serial]
    fn test_url_flag_beats_environment() {
        std::env::set_var("MESHCAST_URL", "http://from-env:1");
        let mut args = RenderArgs::new("model.yml");
        assert_eq!(config_for(&args).base_url, "http://from-env:1");

        args.url = Some("http://from-flag:2".to_string());
        assert_eq!(config_for(&args).base_url, "http://from-flag:2");
        std::env::remove_var("MESHCAST_URL");
    }
}
