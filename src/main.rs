//! CLI entry point for the world map generator

use clap::Parser;
use worldweave::io::cli::{Cli, run};

fn main() -> worldweave::Result<()> {
    let cli = Cli::parse();
    run(&cli)
}
