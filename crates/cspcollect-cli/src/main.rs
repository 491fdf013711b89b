mod cli;

use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::EnvFilter;

use cspcollect_core::Collector;

use crate::cli::Cli;

fn main() -> Result<()> {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let collector = Collector::open(&cli.output_dir).with_context(|| {
        format!(
            "output directory must be writable before serving: {}",
            cli.output_dir.display()
        )
    })?;

    cspcollect_web::serve(collector, &cli.host, cli.port)
}
