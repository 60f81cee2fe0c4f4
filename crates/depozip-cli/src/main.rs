//! Depozip CLI - Command-line utility that zips a directory and deposits it
//! on Zenodo.

mod cli;
mod commands;
mod error;
mod output;
mod progress;

use anyhow::Result;
use clap::Parser;

fn main() -> Result<()> {
    let cli = cli::Cli::parse();

    let formatter = output::create_formatter(cli.json, cli.verbose, cli.quiet);

    if cli.dry_run {
        commands::dry_run::execute(&cli, &*formatter)
    } else {
        commands::upload::execute(&cli, &*formatter)
    }
}
