//! linkpath CLI entry point

use anyhow::Result;
use clap::Parser;
use linkpath_cli::commands::{run, Cli};

fn main() -> Result<()> {
    // Initialize tracing; --trace output is visible with RUST_LOG=debug
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();
    let results = run(&cli)?;

    if results.is_empty() {
        std::process::exit(1);
    }
    Ok(())
}
