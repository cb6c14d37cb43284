//! Connection scopes and their on-disk layout.
//!
//! ```text
//! <root>/connection/inter.json              Global
//! <root>/connection/<area>/intra.json       Area
//! <root>/connection/<area>/<subarea>.json   Room
//! ```

use std::fmt;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::room::RoomIdentity;

/// Default connection directory under the working root.
pub const DEFAULT_DIR: &str = "connection";
/// Default global-scope (inter-area) file name.
pub const DEFAULT_GLOBAL_FILE: &str = "inter.json";
/// Default area-scope (intra-area) file name.
pub const DEFAULT_AREA_FILE: &str = "intra.json";

// ============================================================================
// Layout
// ============================================================================

/// File layout of connection documents, relative to the working root.
///
/// Doubles as the `[connection]` config section.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConnectionLayout {
    /// Connection directory.
    pub dir: PathBuf,
    /// Global-scope file name inside `dir`.
    pub global: String,
    /// Area-scope file name inside `dir/<area>`.
    pub area: String,
}

impl Default for ConnectionLayout {
    fn default() -> Self {
        Self {
            dir: PathBuf::from(DEFAULT_DIR),
            global: DEFAULT_GLOBAL_FILE.to_string(),
            area: DEFAULT_AREA_FILE.to_string(),
        }
    }
}

// ============================================================================
// Scope
// ============================================================================

/// Cache key for one connection document.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum Scope {
    /// Connections near one `(area, subarea)` pair.
    Room { area: String, subarea: String },
    /// Connections crossing subareas within one area.
    Area { area: String },
    /// Connections crossing areas.
    Global,
}

impl Scope {
    pub fn room(area: impl Into<String>, subarea: impl Into<String>) -> Self {
        Self::Room {
            area: area.into(),
            subarea: subarea.into(),
        }
    }

    pub fn area(area: impl Into<String>) -> Self {
        Self::Area { area: area.into() }
    }

    /// Sources for a room, in priority order.
    ///
    /// An earlier scope is authoritative over every later one.
    pub fn priority(room: &RoomIdentity) -> [Self; 3] {
        [
            Self::room(&room.area, &room.subarea),
            Self::area(&room.area),
            Self::Global,
        ]
    }

    /// Path of this scope's document relative to the working root.
    ///
    /// `None` when an area or subarea name is not a single plain path
    /// component, so room data can never address files outside `dir`.
    pub fn logical_path(&self, layout: &ConnectionLayout) -> Option<PathBuf> {
        match self {
            Self::Room { area, subarea } => Some(
                layout
                    .dir
                    .join(path_segment(area)?)
                    .join(format!("{}.json", path_segment(subarea)?)),
            ),
            Self::Area { area } => Some(layout.dir.join(path_segment(area)?).join(&layout.area)),
            Self::Global => Some(layout.dir.join(&layout.global)),
        }
    }

    /// Short scope name for display.
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::Room { .. } => "room",
            Self::Area { .. } => "area",
            Self::Global => "global",
        }
    }
}

/// `name` if it is usable as one directory or file name component.
fn path_segment(name: &str) -> Option<&str> {
    let plain = !name.is_empty()
        && name != "."
        && name != ".."
        && !name.contains(['/', '\\', '\0']);
    plain.then_some(name)
}

impl fmt::Display for Scope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Room { area, subarea } => write!(f, "room-scope {area}/{subarea}"),
            Self::Area { area } => write!(f, "area-scope {area}"),
            Self::Global => f.write_str("global-scope"),
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
