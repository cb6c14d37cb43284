//! Command-line interface definitions.

use clap::{ColorChoice, Parser, Subcommand};
use std::path::PathBuf;

/// Roomlink door connection resolver CLI
#[derive(Parser, Debug, Clone)]
#[command(version, about, long_about = None, arg_required_else_help = true)]
pub struct Cli {
    /// Control colored output (auto, always, never)
    #[arg(long, global = true, default_value = "auto")]
    pub color: ColorChoice,

    /// Config file path (default: roomlink.toml, searched upward from cwd)
    #[arg(short = 'C', long, global = true, default_value = "roomlink.toml", value_hint = clap::ValueHint::FilePath)]
    pub config: PathBuf,

    /// Working root override (relative to current directory)
    #[arg(short, long, global = true, value_hint = clap::ValueHint::DirPath)]
    pub root: Option<PathBuf>,

    /// Enable verbose output for debugging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// subcommands
    #[command(subcommand)]
    pub command: Commands,
}

/// Available subcommands
#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Resolve where one door of a room leads
    #[command(visible_alias = "r")]
    Resolve {
        /// Room document (relative to cwd or the working root)
        #[arg(value_hint = clap::ValueHint::FilePath)]
        room: PathBuf,

        /// Node id of the door inside the room
        door: i64,

        #[command(flatten)]
        output: OutputArgs,
    },

    /// Resolve every door of a room
    #[command(visible_alias = "m")]
    Room {
        /// Room document (relative to cwd or the working root)
        #[arg(value_hint = clap::ValueHint::FilePath)]
        room: PathBuf,

        #[command(flatten)]
        output: OutputArgs,
    },
}

/// Shared output arguments.
#[derive(clap::Args, Debug, Clone)]
pub struct OutputArgs {
    /// Print results as JSON
    #[arg(long)]
    pub json: bool,

    /// Pretty-print JSON output
    #[arg(short, long, requires = "json")]
    pub pretty: bool,
}
