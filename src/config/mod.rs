//! Project configuration management for `roomlink.toml`.
//!
//! # Module Structure
//!
//! ```text
//! config/
//! ├── error      # ConfigError, ConfigDiagnostics
//! ├── section    # [project], [composite]
//! ├── util       # Config file discovery
//! └── mod.rs     # ProjectConfig (this file)
//! ```
//!
//! # Sections
//!
//! | Section        | Purpose                                         |
//! |----------------|-------------------------------------------------|
//! | `[project]`    | Working root                                    |
//! | `[connection]` | Connection document layout under the root       |
//! | `[composite]`  | Extra composite-room name exceptions            |
//!
//! Every section is optional; without a config file the defaults apply
//! and the current directory is the working root.

mod error;
mod section;
mod util;

pub use error::{ConfigDiagnostics, ConfigError};
pub use section::{CompositeSection, ProjectSection};

use util::find_config_file;

use crate::{cli::Cli, composite::CompositeNames, connection::ConnectionLayout, debug, log};
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::{
    fs,
    path::{Path, PathBuf},
};

// ============================================================================
// root configuration
// ============================================================================

/// Root configuration structure representing roomlink.toml
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProjectConfig {
    /// Absolute path to the config file (internal use only)
    #[serde(skip)]
    pub config_path: PathBuf,

    /// Resolved working root (internal use only)
    #[serde(skip)]
    pub root: PathBuf,

    /// Project settings
    #[serde(default)]
    pub project: ProjectSection,

    /// Connection document layout
    #[serde(default)]
    pub connection: ConnectionLayout,

    /// Composite room naming
    #[serde(default)]
    pub composite: CompositeSection,
}

impl ProjectConfig {
    /// Load configuration from CLI arguments.
    ///
    /// Searches upward from cwd for the config file. A missing file is not
    /// an error: defaults apply relative to cwd.
    pub fn load(cli: &Cli) -> Result<Self> {
        let cwd = std::env::current_dir().context("Failed to get current working directory")?;

        let mut config = match find_config_file(&cli.config) {
            Some(path) => {
                let mut config = Self::from_path(&path)?;
                config.config_path = path;
                config
            }
            None => {
                debug!("config"; "{} not found, using defaults", cli.config.display());
                Self {
                    config_path: cwd.join(&cli.config),
                    ..Self::default()
                }
            }
        };

        config.finalize(cli.root.as_deref(), &cwd);
        config.validate()?;
        debug!("config"; "working root: {}", config.root.display());

        Ok(config)
    }

    /// Resolve the working root.
    ///
    /// `--root` is relative to cwd; `project.root` is relative to the
    /// config file's directory.
    fn finalize(&mut self, root_override: Option<&Path>, cwd: &Path) {
        let root = match root_override {
            Some(root) => cwd.join(root),
            None => self
                .config_path
                .parent()
                .unwrap_or(cwd)
                .join(&self.project.root),
        };
        self.root = crate::utils::path::normalize_path(&root);
    }

    /// Load configuration from file path with unknown field detection.
    fn from_path(path: &Path) -> Result<Self, ConfigError> {
        let content =
            fs::read_to_string(path).map_err(|err| ConfigError::Io(path.to_path_buf(), err))?;

        let (config, ignored) = Self::parse_with_ignored(&content)?;
        if !ignored.is_empty() {
            Self::print_unknown_fields_warning(&ignored, path);
        }

        Ok(config)
    }

    /// Parse TOML content, collecting any unknown fields.
    fn parse_with_ignored(content: &str) -> Result<(Self, Vec<String>), ConfigError> {
        let mut ignored = Vec::new();
        let deserializer = toml::Deserializer::new(content);
        let config = serde_ignored::deserialize(deserializer, |path: serde_ignored::Path| {
            ignored.push(path.to_string());
        })?;
        Ok((config, ignored))
    }

    /// Print warning about unknown fields.
    fn print_unknown_fields_warning(fields: &[String], path: &Path) {
        let display_path = path
            .file_name()
            .map(|n| n.to_string_lossy())
            .unwrap_or_else(|| path.to_string_lossy());
        log!("warning"; "unknown fields in {}, ignoring:", display_path);
        for field in fields {
            eprintln!("- {}", field);
        }
    }

    /// Validate all sections, collecting every error before failing.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let mut diag = ConfigDiagnostics::new();

        if !self.root.is_dir() {
            diag.error_with_hint(
                "project.root",
                format!("working root `{}` is not a directory", self.root.display()),
                "set [project] root in roomlink.toml or pass --root",
            );
        }

        let layout = &self.connection;
        if layout.dir.as_os_str().is_empty() {
            diag.error("connection.dir", "must not be empty");
        }
        for (field, name) in [
            ("connection.global", &layout.global),
            ("connection.area", &layout.area),
        ] {
            if !is_json_file_name(name) {
                diag.error_with_hint(
                    field,
                    format!("`{name}` is not a .json file name"),
                    "use a plain file name such as `inter.json`",
                );
            }
        }

        self.composite.validate(&mut diag);

        diag.into_result().map_err(ConfigError::Diagnostics)
    }

    /// Get the working root directory path
    pub fn get_root(&self) -> &Path {
        &self.root
    }

    /// Composite-name rules with configured exceptions.
    pub fn composite_names(&self) -> CompositeNames {
        CompositeNames::with_exceptions(self.composite.exceptions.iter().cloned())
    }
}

/// A bare `*.json` file name (no directories).
fn is_json_file_name(name: &str) -> bool {
    name.len() > ".json".len()
        && name.ends_with(".json")
        && !name.contains(['/', '\\'])
}

/// Parse config content for tests, failing on unknown fields.
#[cfg(test)]
pub fn test_parse_config(content: &str) -> ProjectConfig {
    let (parsed, ignored) = ProjectConfig::parse_with_ignored(content).unwrap();
    assert!(
        ignored.is_empty(),
        "test config has unknown fields: {:?}",
        ignored
    );
    parsed
}

// ============================================================================
// tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn with_root(mut config: ProjectConfig, root: &Path) -> ProjectConfig {
        config.root = root.to_path_buf();
        config
    }

    #[test]
    fn test_defaults() {
        let config = test_parse_config("");
        assert_eq!(config.connection, ConnectionLayout::default());
        assert_eq!(config.connection.dir, PathBuf::from("connection"));
        assert_eq!(config.connection.global, "inter.json");
        assert_eq!(config.connection.area, "intra.json");
    }

    #[test]
    fn test_connection_override() {
        let config = test_parse_config(
            "[connection]\ndir = \"data/connection\"\nglobal = \"world.json\"",
        );
        assert_eq!(config.connection.dir, PathBuf::from("data/connection"));
        assert_eq!(config.connection.global, "world.json");
        // area uses default
        assert_eq!(config.connection.area, "intra.json");
    }

    #[test]
    fn test_unknown_fields_collected() {
        let (_, ignored) =
            ProjectConfig::parse_with_ignored("[connection]\nglobl = \"x.json\"\n[extra]\na = 1")
                .unwrap();
        assert_eq!(ignored.len(), 2);
        assert!(ignored.iter().any(|f| f == "connection.globl"));
    }

    #[test]
    fn test_invalid_toml() {
        let err = ProjectConfig::parse_with_ignored("[connection\n").unwrap_err();
        assert!(matches!(err, ConfigError::Toml(_)));
    }

    #[test]
    fn test_validate_ok() {
        let dir = TempDir::new().unwrap();
        let config = with_root(test_parse_config(""), dir.path());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_collects_all_errors() {
        let dir = TempDir::new().unwrap();
        let config = with_root(
            test_parse_config(
                "[connection]\ndir = \"\"\nglobal = \"inter.toml\"\narea = \"sub/intra.json\"\n\
                 [composite]\nexceptions = [\"Plain Room\"]",
            ),
            dir.path(),
        );

        let Err(ConfigError::Diagnostics(diag)) = config.validate() else {
            panic!("expected diagnostics");
        };
        let fields: Vec<_> = diag.errors().iter().map(|d| d.field).collect();
        assert_eq!(
            fields,
            vec![
                "connection.dir",
                "connection.global",
                "connection.area",
                "composite.exceptions"
            ]
        );
    }

    #[test]
    fn test_validate_missing_root() {
        let dir = TempDir::new().unwrap();
        let config = with_root(test_parse_config(""), &dir.path().join("missing"));
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_finalize_root_relative_to_config() {
        let dir = TempDir::new().unwrap();
        std::fs::create_dir_all(dir.path().join("data")).unwrap();

        let mut config = test_parse_config("[project]\nroot = \"data\"");
        config.config_path = dir.path().join("roomlink.toml");
        config.finalize(None, Path::new("/"));
        assert_eq!(
            config.root,
            crate::utils::path::normalize_path(&dir.path().join("data"))
        );
    }

    #[test]
    fn test_finalize_root_override() {
        let dir = TempDir::new().unwrap();
        let mut config = test_parse_config("[project]\nroot = \"data\"");
        config.config_path = PathBuf::from("/elsewhere/roomlink.toml");
        config.finalize(Some(Path::new("world")), dir.path());
        // Nonexistent roots are kept as given (validation reports them)
        assert_eq!(config.root, dir.path().join("world"));
    }

    #[test]
    fn test_is_json_file_name() {
        assert!(is_json_file_name("inter.json"));
        assert!(!is_json_file_name(".json"));
        assert!(!is_json_file_name("inter.toml"));
        assert!(!is_json_file_name("a/inter.json"));
    }
}
