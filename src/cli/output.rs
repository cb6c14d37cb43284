//! Result formatting for terminal and JSON output.

use owo_colors::{OwoColorize, Stream::Stdout};
use serde::Serialize;

use crate::cli::args::OutputArgs;
use crate::connection::Direction;
use crate::resolve::{NotFoundReason, Resolution, ResolvedConnection};
use crate::room::RoomNode;

/// Message shown for doors without a destination.
pub const NO_CONNECTION: &str = "no connection configured for this door";

/// One resolved (or unresolved) door, as printed with `--json`.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DoorReport<'a> {
    pub door: i64,
    pub door_name: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub door_orientation: Option<&'a str>,
    pub resolved: Option<&'a ResolvedConnection>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
}

impl<'a> DoorReport<'a> {
    pub fn new(node: &'a RoomNode, resolution: &'a Resolution) -> Self {
        let reason = match resolution {
            Resolution::Found(_) => None,
            Resolution::NotFound(reason) => Some(reason_text(reason)),
        };
        Self {
            door: node.id,
            door_name: &node.name,
            door_orientation: node.door_orientation.as_deref(),
            resolved: resolution.found(),
            reason,
        }
    }
}

fn reason_text(reason: &NotFoundReason) -> String {
    match reason {
        NotFoundReason::NotADoor { node_type } => format!("node is a {node_type}, not a door"),
        NotFoundReason::NoConnection => NO_CONNECTION.to_string(),
    }
}

/// Serialize reports as JSON, honoring `--pretty`.
pub fn to_json<T: Serialize + ?Sized>(value: &T, args: &OutputArgs) -> serde_json::Result<String> {
    if args.pretty {
        serde_json::to_string_pretty(value)
    } else {
        serde_json::to_string(value)
    }
}

/// One-line human description of a door's resolution.
///
/// ```text
/// #5 X - East Door <-> Y [AQA / Other] (right, HorizontalDoor, via room-scope AQA/Upper East AQA)
/// #3 X - Fake Door: no connection configured for this door
/// ```
pub fn format_line(node: &RoomNode, resolution: &Resolution) -> String {
    let door = format!("#{} {}", node.id, node.name);
    match resolution {
        Resolution::Found(resolved) => format!(
            "{} {} {} {} ({})",
            door.if_supports_color(Stdout, |t| t.bold()),
            arrow(resolved.direction),
            target_text(resolved).if_supports_color(Stdout, |t| t.bright_green()),
            format!("[{} / {}]", resolved.target_area, resolved.target_subarea)
                .if_supports_color(Stdout, |t| t.dimmed()),
            details(resolved),
        ),
        Resolution::NotFound(reason) => format!(
            "{}: {}",
            door.if_supports_color(Stdout, |t| t.bold()),
            reason_text(reason).if_supports_color(Stdout, |t| t.yellow())
        ),
    }
}

/// Target label; composite rooms show the sub-room and the full room name.
fn target_text(resolved: &ResolvedConnection) -> String {
    match &resolved.target_subroom {
        Some(subroom) => format!("{subroom} (in {})", resolved.target_room),
        None => resolved.target_room.clone(),
    }
}

fn details(resolved: &ResolvedConnection) -> String {
    let mut parts = Vec::with_capacity(3);
    if !resolved.target_node.position.is_empty() {
        parts.push(resolved.target_node.position.clone());
    }
    if !resolved.connection_type.is_empty() {
        parts.push(resolved.connection_type.clone());
    }
    parts.push(format!("via {}", resolved.scope));
    parts.join(", ")
}

const fn arrow(direction: Direction) -> &'static str {
    match direction {
        Direction::Forward => "->",
        Direction::Bidirectional => "<->",
    }
}
