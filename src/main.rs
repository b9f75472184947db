//! CLI entry point replaying building input against the placement core

use clap::Parser;
use gridplace::io::cli::{Cli, Session};
use tracing_subscriber::EnvFilter;

fn main() -> gridplace::Result<()> {
    let cli = Cli::parse();

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(cli.log_level()));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let mut session = Session::new(cli)?;
    session.run()?;
    Ok(())
}
