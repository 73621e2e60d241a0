use clap::Parser;
use color_eyre::eyre::Result;
use tracing_subscriber::EnvFilter;

use tfblocks::cli::{self, Cli};
use tfblocks::providers::Registry;
use tfblocks::terraform;

fn main() -> Result<()> {
    color_eyre::install()?;

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let registry = Registry::builtin()?;
    tracing::debug!(rules = registry.len(), "identifier registry ready");

    let resources = terraform::read_state(std::io::stdin().lock())?;

    let stdout = std::io::stdout();
    cli::run(&cli, registry, &resources, &mut stdout.lock())?;

    Ok(())
}
