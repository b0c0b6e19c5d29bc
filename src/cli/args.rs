//! Command-line arguments for meshcast.

use std::path::PathBuf;

use clap::Parser;

#[derive(Debug, Parser)]
#[command(name = "meshcast", version)]
#[command(about = "Send a model script to the renderer and save what it produces")]
pub struct Cli {
    /// Build script to render
    pub script: PathBuf,

    /// Renderer base URL (defaults to $MESHCAST_URL or http://localhost:5000)
    #[arg(long)]
    pub url: Option<String>,

    /// Directory to write downloads to
    #[arg(long, default_value = ".")]
    pub out: PathBuf,

    /// Download every artifact as one zip archive
    #[arg(long, conflicts_with = "select")]
    pub all: bool,

    /// Download artifact N instead of the first one
    #[arg(long, value_name = "N")]
    pub select: Option<usize>,

    /// Enable debug logging
    #[arg(short, long)]
    pub debug: bool,
}

/// Options of a render run.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderArgs {
    pub script: PathBuf,
    pub url: Option<String>,
    pub out_dir: PathBuf,
    pub all: bool,
    pub select: Option<usize>,
    pub debug: bool,
}

impl RenderArgs {
    pub fn new(script: impl Into<PathBuf>) -> Self {
        Self {
            script: script.into(),
            url: None,
            out_dir: PathBuf::from("."),
            all: false,
            select: None,
            debug: false,
        }
    }
}

impl From<Cli> for RenderArgs {
    fn from(cli: Cli) -> Self {
        Self {
            script: cli.script,
            url: cli.url,
            out_dir: cli.out,
            all: cli.all,
            select: cli.select,
            debug: cli.debug,
        }
    }
}
