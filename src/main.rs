//! CLI entry point for the quadtree image approximation tool

use clap::Parser;
use quadart::io::cli::{Cli, FileProcessor};
use tracing_subscriber::EnvFilter;

fn main() -> quadart::Result<()> {
    let cli = Cli::parse();

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(cli.default_log_filter()));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();

    let mut processor = FileProcessor::new(cli);
    processor.process()
}
