//! Connection document data model.
//!
//! Mirrors the JSON schema of `connection/**/*.json`:
//!
//! ```json
//! { "connections": [
//!   { "direction": "Forward",
//!     "connectionType": "VerticalDoor",
//!     "nodes": [ { "roomid": 1, "nodeid": 2, ... }, { ... } ] }
//! ] }
//! ```

use serde::{Deserialize, Deserializer, Serialize};

// ============================================================================
// Direction
// ============================================================================

/// Traversal direction of a connection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Direction {
    /// One-way: traversable only from `nodes[0]` to `nodes[1]`.
    Forward,
    /// Traversable from either endpoint.
    Bidirectional,
}

// ============================================================================
// Endpoint & Connection
// ============================================================================

/// One side of a connection.
///
/// `roomid`/`nodeid` are the matching keys; the name fields are labels.
/// Missing or `null` labels read as empty strings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConnectionEndpoint {
    #[serde(rename = "roomid")]
    pub room_id: i64,
    #[serde(rename = "nodeid")]
    pub node_id: i64,
    #[serde(default, deserialize_with = "label")]
    pub room_name: String,
    #[serde(default, deserialize_with = "label")]
    pub node_name: String,
    #[serde(default, deserialize_with = "label")]
    pub area: String,
    #[serde(default, deserialize_with = "label")]
    pub subarea: String,
    #[serde(default, deserialize_with = "label")]
    pub position: String,
}

impl ConnectionEndpoint {
    /// Check if this endpoint addresses the given room node.
    #[inline]
    pub fn addresses(&self, room_id: i64, node_id: i64) -> bool {
        self.room_id == room_id && self.node_id == node_id
    }
}

/// A link between two node endpoints.
///
/// The array type makes "exactly two endpoints" a parse-time guarantee.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Connection {
    pub direction: Direction,
    #[serde(default, deserialize_with = "label")]
    pub connection_type: String,
    pub nodes: [ConnectionEndpoint; 2],
}

impl Connection {
    /// Origin endpoint (the only traversable side of a `Forward` connection).
    pub const fn origin(&self) -> &ConnectionEndpoint {
        &self.nodes[0]
    }

    /// Destination endpoint of a `Forward` connection.
    pub const fn destination(&self) -> &ConnectionEndpoint {
        &self.nodes[1]
    }
}

/// `null` label -> `""`.
fn label<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

// ============================================================================
// Document
// ============================================================================

/// A single connection file (room-, area- or global-scope).
///
/// Entries are decoded one by one: an entry that breaks the schema is
/// dropped (and counted in `skipped`) while the rest of the file stays
/// usable. Only a file that is not a connection document at all fails.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "RawDocument")]
pub struct ConnectionDocument {
    pub connections: Vec<Connection>,
    /// Entries dropped while parsing.
    #[serde(skip)]
    pub skipped: usize,
}

#[derive(Deserialize)]
struct RawDocument {
    #[serde(default)]
    connections: Vec<serde_json::Value>,
}

impl From<RawDocument> for ConnectionDocument {
    fn from(raw: RawDocument) -> Self {
        let mut document = Self::default();
        for (index, entry) in raw.connections.into_iter().enumerate() {
            match serde_json::from_value::<Connection>(entry) {
                Ok(connection) => document.connections.push(connection),
                Err(e) => {
                    crate::debug!("load"; "skipping connection #{}: {}", index, e);
                    document.skipped += 1;
                }
            }
        }
        document
    }
}

impl ConnectionDocument {
    /// Parse a document from JSON text.
    pub fn from_json(text: &str) -> serde_json::Result<Self> {
        serde_json::from_str(text)
    }

    pub fn len(&self) -> usize {
        self.connections.len()
    }

    pub fn is_empty(&self) -> bool {
        self.connections.is_empty()
    }
}

// ============================================================================
// Tests
// ============================================================================
