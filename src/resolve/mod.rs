//! Door connection resolution.
//!
//! Answers "where does this door lead" by scanning the three connection
//! sources of the current room in priority order:
//!
//! ```text
//! room-scope (area/subarea) --> area-scope (area) --> global-scope
//! ```
//!
//! The first usable match wins and later sources are never loaded.
//! A `Forward` connection is usable only from its origin (`nodes[0]`);
//! a door that matches its destination keeps scanning.


use serde::Serialize;

use crate::composite::CompositeNames;
use crate::connection::{
    Connection, ConnectionCache, ConnectionEndpoint, Direction, DocumentLoader, Scope,
};
use crate::room::{RoomIdentity, RoomNode};

// ============================================================================
// Result types
// ============================================================================

/// Where a door leads.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResolvedConnection {
    pub source_node: ConnectionEndpoint,
    pub target_node: ConnectionEndpoint,
    pub target_room: String,
    pub target_area: String,
    pub target_subarea: String,
    /// Sub-room of the target when the target room is composite.
    pub target_subroom: Option<String>,
    pub direction: Direction,
    pub connection_type: String,
    /// Source the match came from.
    pub scope: Scope,
}

impl ResolvedConnection {
    fn new(
        connection: &Connection,
        source: &ConnectionEndpoint,
        target: &ConnectionEndpoint,
        scope: &Scope,
        names: &CompositeNames,
    ) -> Self {
        Self {
            source_node: source.clone(),
            target_node: target.clone(),
            target_room: target.room_name.clone(),
            target_area: target.area.clone(),
            target_subarea: target.subarea.clone(),
            target_subroom: names.subroom_of(target),
            direction: connection.direction,
            connection_type: connection.connection_type.clone(),
            scope: scope.clone(),
        }
    }

    /// Target room label, including the sub-room if any.
    ///
    /// `"North Hall / South Hall"` with sub-room `South Hall` -> `"South Hall"`.
    pub fn target_label(&self) -> &str {
        self.target_subroom.as_deref().unwrap_or(&self.target_room)
    }
}

/// Why nothing was found.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NotFoundReason {
    /// The node is not a door; no source was consulted.
    NotADoor { node_type: String },
    /// Every source was scanned without a usable match.
    NoConnection,
}

/// Outcome of resolving one door.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    Found(ResolvedConnection),
    NotFound(NotFoundReason),
}

impl Resolution {
    pub fn found(&self) -> Option<&ResolvedConnection> {
        match self {
            Self::Found(resolved) => Some(resolved),
            Self::NotFound(_) => None,
        }
    }

    pub fn into_found(self) -> Option<ResolvedConnection> {
        match self {
            Self::Found(resolved) => Some(resolved),
            Self::NotFound(_) => None,
        }
    }

    pub const fn is_found(&self) -> bool {
        matches!(self, Self::Found(_))
    }
}

// ============================================================================
// Matching
// ============================================================================

/// Match a door against one connection entry.
///
/// Returns `(source, target)` when the entry is traversable from the door.
fn traverse(
    connection: &Connection,
    room_id: i64,
    node_id: i64,
) -> Option<(&ConnectionEndpoint, &ConnectionEndpoint)> {
    let index = connection
        .nodes
        .iter()
        .position(|node| node.addresses(room_id, node_id))?;

    match connection.direction {
        // Destination side of a one-way connection: not outbound
        Direction::Forward if index != 0 => None,
        Direction::Forward | Direction::Bidirectional => {
            Some((&connection.nodes[index], &connection.nodes[1 - index]))
        }
    }
}

// ============================================================================
// Resolver
// ============================================================================

/// Resolves doors against the connection sources of one session.
pub struct Resolver<'a, L> {
    cache: &'a mut ConnectionCache<L>,
    names: &'a CompositeNames,
}

impl<'a, L: DocumentLoader> Resolver<'a, L> {
    pub fn new(cache: &'a mut ConnectionCache<L>, names: &'a CompositeNames) -> Self {
        Self { cache, names }
    }

    /// Resolve where `door` in `room` leads.
    ///
    /// Sources are awaited one at a time so an earlier match short-circuits
    /// before a later source is requested.
    pub async fn resolve(&mut self, door: &RoomNode, room: &RoomIdentity) -> Resolution {
        if !door.is_door() {
            crate::debug!("resolve"; "node {} is a {}, not a door", door.id, door.node_type);
            return Resolution::NotFound(NotFoundReason::NotADoor {
                node_type: door.node_type.clone(),
            });
        }

        for scope in Scope::priority(room) {
            let Some(document) = self.cache.get(scope.clone()).await else {
                continue;
            };

            for connection in &document.connections {
                let destination_only = connection.direction == Direction::Forward
                    && connection.destination().addresses(room.room_id, door.id)
                    && !connection.origin().addresses(room.room_id, door.id);

                match traverse(connection, room.room_id, door.id) {
                    Some((source, target)) => {
                        let resolved =
                            ResolvedConnection::new(connection, source, target, &scope, self.names);
                        crate::debug!(
                            "resolve";
                            "door {}:{} -> {} via {}",
                            room.room_id, door.id, resolved.target_label(), scope
                        );
                        return Resolution::Found(resolved);
                    }
                    None if destination_only => {
                        crate::debug!(
                            "resolve";
                            "door {}:{} is the destination of a forward connection in {}, skipping",
                            room.room_id, door.id, scope
                        );
                    }
                    None => {}
                }
            }
        }

        crate::debug!("resolve"; "door {}:{} has no connection", room.room_id, door.id);
        Resolution::NotFound(NotFoundReason::NoConnection)
    }

    /// Resolve every door of a node list, in node order.
    ///
    /// Non-door nodes are skipped.
    pub async fn resolve_room<'n>(
        &mut self,
        nodes: &'n [RoomNode],
        room: &RoomIdentity,
    ) -> Vec<(&'n RoomNode, Resolution)> {
        let mut results = Vec::new();
        for node in nodes.iter().filter(|node| node.is_door()) {
            let resolution = self.resolve(node, room).await;
            results.push((node, resolution));
        }
        results
    }
}
