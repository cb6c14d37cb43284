//! Composite room addressing.
//!
//! Some rooms hold several logical sub-rooms, encoded in the display name:
//! `"North Hall / South Hall"`. A node belongs to the sub-room whose name
//! prefixes the node's name (`"South Hall - Bottom Door"` -> `South Hall`).
//!
//! A few single rooms carry the separator in their real name; those are
//! listed in [`BUILTIN_EXCEPTIONS`] and never treated as composite.

use rustc_hash::FxHashSet;

use crate::connection::ConnectionEndpoint;

/// Separator between sub-room names.
pub const SEPARATOR: &str = " / ";

/// Room names that contain [`SEPARATOR`] but are single rooms.
pub const BUILTIN_EXCEPTIONS: &[&str] = &["PYR-TRO Elevator / PYR Entrance Lobby"];

/// Composite-name rules: the built-in exceptions plus configured extras.
#[derive(Debug, Clone, Default)]
pub struct CompositeNames {
    extra: FxHashSet<String>,
}

impl CompositeNames {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add exceptions on top of the built-in ones.
    pub fn with_exceptions<I, S>(exceptions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            extra: exceptions.into_iter().map(Into::into).collect(),
        }
    }

    pub fn is_exception(&self, room_name: &str) -> bool {
        BUILTIN_EXCEPTIONS.iter().any(|name| *name == room_name) || self.extra.contains(room_name)
    }

    /// Exceptions are checked before the separator.
    pub fn is_composite(&self, room_name: &str) -> bool {
        !self.is_exception(room_name) && room_name.contains(SEPARATOR)
    }

    /// Sub-room names in display order; empty for non-composite rooms.
    pub fn segments<'n>(&self, room_name: &'n str) -> Vec<&'n str> {
        if !self.is_composite(room_name) {
            return Vec::new();
        }
        room_name.split(SEPARATOR).collect()
    }

    /// Sub-room of a connection endpoint, if its room is composite.
    ///
    /// First segment in split order that is a literal prefix of the node
    /// name wins.
    pub fn subroom_of(&self, endpoint: &ConnectionEndpoint) -> Option<String> {
        self.segments(&endpoint.room_name)
            .into_iter()
            .find(|segment| endpoint.node_name.starts_with(*segment))
            .map(str::to_string)
    }
}

/// [`CompositeNames::is_composite`] with the built-in exceptions only.
pub fn is_composite(room_name: &str) -> bool {
    CompositeNames::new().is_composite(room_name)
}

/// [`CompositeNames::subroom_of`] with the built-in exceptions only.
pub fn subroom_of(endpoint: &ConnectionEndpoint) -> Option<String> {
    CompositeNames::new().subroom_of(endpoint)
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn endpoint(room_name: &str, node_name: &str) -> ConnectionEndpoint {
        ConnectionEndpoint {
            room_id: 1,
            node_id: 1,
            room_name: room_name.to_string(),
            node_name: node_name.to_string(),
            area: String::new(),
            subarea: String::new(),
            position: String::new(),
        }
    }

    #[test]
    fn test_is_composite() {
        assert!(is_composite("North Hall / South Hall"));
        assert!(!is_composite("Main Shaft"));
        // Separator needs the surrounding spaces
        assert!(!is_composite("Hall/Corridor"));
    }

    #[test]
    fn test_builtin_exception() {
        let name = "PYR-TRO Elevator / PYR Entrance Lobby";
        assert!(!is_composite(name));
        assert_eq!(subroom_of(&endpoint(name, "PYR-TRO Elevator - Door")), None);
        assert_eq!(subroom_of(&endpoint(name, "PYR Entrance Lobby - Door")), None);
    }

    #[test]
    fn test_subroom_prefix_match() {
        let target = endpoint("North Hall / South Hall", "South Hall - Bottom Door");
        assert_eq!(subroom_of(&target).as_deref(), Some("South Hall"));
    }

    #[test]
    fn test_subroom_requires_prefix_not_substring() {
        let target = endpoint("North Hall / South Hall", "Door near South Hall");
        assert_eq!(subroom_of(&target), None);
    }

    #[test]
    fn test_subroom_first_segment_wins() {
        // Both "Hall" and "Hall Annex" prefix the node name
        let target = endpoint("Hall / Hall Annex", "Hall Annex - Left Door");
        assert_eq!(subroom_of(&target).as_deref(), Some("Hall"));
    }

    #[test]
    fn test_subroom_of_single_room() {
        assert_eq!(subroom_of(&endpoint("Main Shaft", "Main Shaft - Top Door")), None);
    }

    #[test]
    fn test_segments() {
        let names = CompositeNames::new();
        assert_eq!(names.segments("A / B / C"), vec!["A", "B", "C"]);
        assert!(names.segments("Main Shaft").is_empty());
        assert!(names.segments("PYR-TRO Elevator / PYR Entrance Lobby").is_empty());
    }

    #[test]
    fn test_configured_exceptions_extend_builtin() {
        let names = CompositeNames::with_exceptions(["Save Room / Map Station"]);
        assert!(!names.is_composite("Save Room / Map Station"));
        assert!(!names.is_composite("PYR-TRO Elevator / PYR Entrance Lobby"));
        assert!(names.is_composite("North Hall / South Hall"));
    }
}
