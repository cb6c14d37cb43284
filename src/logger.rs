//! Logging utilities with colored output.
//!
//! This module provides:
//! - `log!` macro for formatted terminal output with colored prefixes
//! - `debug!` macro for output that only appears with `--verbose`
//!
//! # Example
//!
//! ```ignore
//! log!("room"; "resolving {} doors", count);
//! debug!("cache"; "miss: {}", scope);
//! ```

use crossterm::{
    execute,
    terminal::{Clear, ClearType},
};
use owo_colors::{AnsiColors, OwoColorize, Stream::Stderr};
use std::{
    io::{Write, stderr},
    sync::atomic::{AtomicBool, Ordering},
};

/// Set once from `--verbose` before any command runs.
static VERBOSE: AtomicBool = AtomicBool::new(false);

pub fn set_verbose(verbose: bool) {
    VERBOSE.store(verbose, Ordering::Relaxed);
}

pub fn is_verbose() -> bool {
    VERBOSE.load(Ordering::Relaxed)
}

// ============================================================================
// Log Macro
// ============================================================================

/// Log a message with a colored module prefix
///
/// # Usage
/// ```ignore
/// log!("module"; "message with {} formatting", args);
/// ```
#[macro_export]
macro_rules! log {
    ($module:expr; $($arg:tt)*) => {{
        $crate::logger::log($module, &format!($($arg)*))
    }};
}

/// Like [`log!`], but only with `--verbose`. Arguments are not
/// formatted otherwise.
#[macro_export]
macro_rules! debug {
    ($module:expr; $($arg:tt)*) => {{
        if $crate::logger::is_verbose() {
            $crate::log!($module; $($arg)*)
        }
    }};
}

// ============================================================================
// Output
// ============================================================================

/// Write `[module] message` to stderr.
///
/// Stdout is reserved for resolution results, so every log line goes to
/// stderr, even with `--json`.
pub fn log(module: &str, message: &str) {
    let prefix = format!("[{module}]");
    let color = prefix_color(module);
    let prefix = prefix.if_supports_color(Stderr, |t| t.color(color).bold().to_string());

    let mut stderr = stderr().lock();
    execute!(stderr, Clear(ClearType::UntilNewLine)).ok();
    writeln!(stderr, "{prefix} {message}").ok();
}

/// Prefix color per module; unknown modules are yellow.
fn prefix_color(module: &str) -> AnsiColors {
    match module.to_ascii_lowercase().as_str() {
        "resolve" | "room" => AnsiColors::BrightBlue,
        "cache" | "load" => AnsiColors::BrightGreen,
        "config" => AnsiColors::BrightMagenta,
        "error" => AnsiColors::BrightRed,
        _ => AnsiColors::BrightYellow,
    }
}

// ============================================================================
// Tests
// ============================================================================
