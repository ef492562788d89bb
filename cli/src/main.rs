
mod cli;
mod commands;

use cli::{Cli, Commands};
use commands::{bbox, query, render};

pub fn run() -> anyhow::Result<()> {
    use clap::Parser;

    let cli = Cli::parse();
    match &cli.command {
        Commands::Bbox(args) => bbox::run(&cli, args),
        Commands::Query(args) => query::run(&cli, args),
        Commands::Render(args) => render::run(&cli, args),
    }
}

fn main() -> anyhow::Result<()> { run() }
