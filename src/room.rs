//! Room documents: the room currently open and its node list.
//!
//! ```json
//! { "id": 100, "name": "Main Shaft", "area": "AQA", "subarea": "Upper East AQA",
//!   "nodes": [ { "id": 5, "name": "Main Shaft - East Door", "nodeType": "door",
//!                "doorOrientation": "right", "nodeAddress": "0x1a2b" } ] }
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// `nodeType` of nodes that represent doors.
pub const DOOR_NODE_TYPE: &str = "door";

// ============================================================================
// RoomError
// ============================================================================

/// Failure to open a room document the user asked for.
#[derive(Debug, Error)]
pub enum RoomError {
    #[error("IO error when reading `{0}`")]
    Io(PathBuf, #[source] std::io::Error),

    #[error("room file `{0}` is not a valid room document")]
    Parse(PathBuf, #[source] serde_json::Error),

    #[error("room {room} has no node with id {node}")]
    NodeNotFound { room: i64, node: i64 },
}

// ============================================================================
// Identity & Nodes
// ============================================================================

/// Identity of the room currently open.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoomIdentity {
    pub room_id: i64,
    pub area: String,
    pub subarea: String,
    pub room_name: String,
}

impl RoomIdentity {
    pub fn new(
        room_id: i64,
        area: impl Into<String>,
        subarea: impl Into<String>,
        room_name: impl Into<String>,
    ) -> Self {
        Self {
            room_id,
            area: area.into(),
            subarea: subarea.into(),
            room_name: room_name.into(),
        }
    }
}

/// A node of a room's node list (doors, items, junctions, ...).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoomNode {
    pub id: i64,
    #[serde(default)]
    pub name: String,
    pub node_type: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub node_sub_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub door_orientation: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub node_address: Option<String>,
}

impl RoomNode {
    /// Create a door node.
    pub fn door(id: i64, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            node_type: DOOR_NODE_TYPE.to_string(),
            node_sub_type: None,
            door_orientation: None,
            node_address: None,
        }
    }

    pub fn is_door(&self) -> bool {
        self.node_type == DOOR_NODE_TYPE
    }
}

// ============================================================================
// RoomDocument
// ============================================================================

/// A room file from the region data.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoomDocument {
    pub id: i64,
    #[serde(default)]
    pub name: String,
    pub area: String,
    pub subarea: String,
    #[serde(default)]
    pub nodes: Vec<RoomNode>,
}

impl RoomDocument {
    /// Read a room document. Unlike connection documents, a room the user
    /// explicitly opened must exist and parse.
    pub fn load(path: &Path) -> Result<Self, RoomError> {
        let text = fs::read_to_string(path).map_err(|e| RoomError::Io(path.to_path_buf(), e))?;
        Self::from_json(&text).map_err(|e| RoomError::Parse(path.to_path_buf(), e))
    }

    pub fn from_json(text: &str) -> serde_json::Result<Self> {
        serde_json::from_str(text)
    }

    pub fn identity(&self) -> RoomIdentity {
        RoomIdentity::new(self.id, &self.area, &self.subarea, &self.name)
    }

    /// Door nodes, in node-list order.
    pub fn doors(&self) -> impl Iterator<Item = &RoomNode> {
        self.nodes.iter().filter(|node| node.is_door())
    }

    pub fn node(&self, id: i64) -> Result<&RoomNode, RoomError> {
        self.nodes
            .iter()
            .find(|node| node.id == id)
            .ok_or(RoomError::NodeNotFound {
                room: self.id,
                node: id,
            })
    }
}

// ============================================================================
// Tests
// ============================================================================
