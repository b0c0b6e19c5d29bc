use clap::Parser;
use meshcast::cli::{run_cli_command, Cli, RenderArgs};

use color_eyre::Result;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

/// Install the diagnostic subscriber. `RUST_LOG` overrides the default.
fn init_tracing(debug: bool) {
    let default_directive = if debug {
        "meshcast=debug,info"
    } else {
        "meshcast=info,warn"
    };
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_directive));
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(env_filter)
        .init();
}

fn main() -> Result<()> {
    let args = RenderArgs::from(Cli::parse());

    color_eyre::install()?;
    init_tracing(args.debug);

    run_cli_command(args)
}
