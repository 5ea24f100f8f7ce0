//! `hsf`: a terminal viewer for health-and-safety frameworks.

use clap::Parser;

mod cli;

fn main() -> anyhow::Result<()> {
    cli::Cli::parse().run()
}
