//! `[project]` and `[composite]` section configuration.
//!
//! The `[connection]` section is [`ConnectionLayout`](crate::connection::ConnectionLayout).
//!
//! # Example
//!
//! ```toml
//! [project]
//! root = "."              # Working root, relative to the config file
//!
//! [composite]
//! exceptions = ["Save Room / Map Station"]
//! ```

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use super::ConfigDiagnostics;
use crate::composite::SEPARATOR;

/// Project settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ProjectSection {
    /// Working root that connection paths are relative to.
    pub root: PathBuf,
}

impl Default for ProjectSection {
    fn default() -> Self {
        Self {
            root: PathBuf::from("."),
        }
    }
}

/// Composite room naming settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct CompositeSection {
    /// Room names containing the separator that are nevertheless single
    /// rooms. Added to the built-in exception list.
    pub exceptions: Vec<String>,
}

impl CompositeSection {
    pub fn validate(&self, diag: &mut ConfigDiagnostics) {
        for name in &self.exceptions {
            if !name.contains(SEPARATOR) {
                diag.error_with_hint(
                    "composite.exceptions",
                    format!("`{name}` does not contain `{SEPARATOR}`"),
                    "only names with the separator can be mistaken for composite rooms",
                );
            }
        }
    }
}
