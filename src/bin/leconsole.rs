//! leconsole binary entry point

use clap::Parser;
use leconsole::cli::Cli;

fn main() -> anyhow::Result<()> {
    Cli::parse().run()
}
