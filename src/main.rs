//! Roomlink - Resolve where the doors of a map room lead.

#![allow(dead_code)]

mod cli;
mod composite;
mod config;
mod connection;
mod logger;
mod resolve;
mod room;
mod utils;

use anyhow::Result;
use clap::{ColorChoice, Parser};
use cli::{Cli, Commands};
use config::ProjectConfig;

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Set global color override based on CLI option
    match cli.color {
        ColorChoice::Always => owo_colors::set_override(true),
        ColorChoice::Never => owo_colors::set_override(false),
        ColorChoice::Auto => {} // owo-colors auto-detects TTY
    }
    logger::set_verbose(cli.verbose);

    let config = ProjectConfig::load(&cli)?;

    match &cli.command {
        Commands::Resolve { room, door, output } => {
            cli::run_resolve(&config, room, *door, output)
        }
        Commands::Room { room, output } => cli::run_room(&config, room, output),
    }
}
