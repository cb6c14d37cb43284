//! Config file discovery.

use std::path::{Path, PathBuf};

/// Search cwd and its ancestors for `config_name`.
///
/// ```text
/// /home/user/world/region/AQA/   <- cwd
/// /home/user/world/roomlink.toml <- found
/// ```
pub fn find_config_file(config_name: &Path) -> Option<PathBuf> {
    let cwd = std::env::current_dir().ok()?;
    find_config_from(&cwd, config_name)
}

/// Nearest `config_name` file at or above `start`.
///
/// An absolute `config_name` is only checked in place. Directories with
/// the config's name are skipped.
pub fn find_config_from(start: &Path, config_name: &Path) -> Option<PathBuf> {
    if config_name.is_absolute() {
        return config_name.is_file().then(|| config_name.to_path_buf());
    }
    start
        .ancestors()
        .map(|dir| dir.join(config_name))
        .find(|candidate| candidate.is_file())
}

// ============================================================================
// tests
// ============================================================================
