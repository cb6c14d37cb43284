//! Command-line interface module.

mod args;
mod output;
mod resolve;

pub use args::{Cli, Commands};
pub use resolve::{run_resolve, run_room};
