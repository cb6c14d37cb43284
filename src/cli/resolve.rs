//! `resolve` and `room` command implementation.
//!
//! Each command runs one session: a fresh connection cache over the
//! configured working root, driven on a current-thread runtime. Doors are
//! resolved one after another against the shared cache.

use std::future::Future;
use std::path::Path;

use anyhow::{Context, Result};

use super::output::{DoorReport, format_line, to_json};
use crate::cli::args::OutputArgs;
use crate::config::ProjectConfig;
use crate::connection::{ConnectionCache, FsLoader};
use crate::resolve::Resolver;
use crate::room::RoomDocument;
use crate::utils::{path::resolve_path, plural_count};
use crate::{debug, log};

/// Execute resolve command
pub fn run_resolve(
    config: &ProjectConfig,
    room_path: &Path,
    door_id: i64,
    output: &OutputArgs,
) -> Result<()> {
    let room = open_room(config, room_path)?;
    let node = room.node(door_id)?;
    let identity = room.identity();
    let names = config.composite_names();
    let mut cache = open_session(config);

    let resolution = block_on(async {
        Resolver::new(&mut cache, &names)
            .resolve(node, &identity)
            .await
    })?;

    if output.json {
        println!("{}", to_json(&DoorReport::new(node, &resolution), output)?);
    } else {
        println!("{}", format_line(node, &resolution));
    }
    Ok(())
}

/// Execute room command
pub fn run_room(config: &ProjectConfig, room_path: &Path, output: &OutputArgs) -> Result<()> {
    let room = open_room(config, room_path)?;
    let identity = room.identity();
    let names = config.composite_names();
    let mut cache = open_session(config);

    log!(
        "room";
        "{} ({} / {}): {}",
        identity.room_name,
        identity.area,
        identity.subarea,
        plural_count(room.doors().count(), "door")
    );
    let segments = names.segments(&identity.room_name);
    if !segments.is_empty() {
        debug!("room"; "composite room: {}", segments.join(", "));
    }

    let results = block_on(async {
        Resolver::new(&mut cache, &names)
            .resolve_room(&room.nodes, &identity)
            .await
    })?;

    if output.json {
        let reports: Vec<_> = results
            .iter()
            .map(|(node, resolution)| DoorReport::new(node, resolution))
            .collect();
        println!("{}", to_json(&reports, output)?);
    } else {
        for (node, resolution) in &results {
            println!("{}", format_line(node, resolution));
        }
    }

    let found = results.iter().filter(|(_, r)| r.is_found()).count();
    log!(
        "room";
        "{} resolved, {} without connection ({} loaded)",
        plural_count(found, "door"),
        results.len() - found,
        plural_count(cache.len(), "source")
    );
    Ok(())
}

/// Open the room document, relative to cwd or the working root.
fn open_room(config: &ProjectConfig, path: &Path) -> Result<RoomDocument> {
    let path = resolve_path(path, config.get_root());
    debug!("room"; "opening {}", path.display());
    Ok(RoomDocument::load(&path)?)
}

/// Start a cache session over the configured working root.
fn open_session(config: &ProjectConfig) -> ConnectionCache<FsLoader> {
    ConnectionCache::new(FsLoader, config.connection.clone(), config.get_root())
}

/// Drive a future to completion on a current-thread runtime.
fn block_on<F: Future>(future: F) -> Result<F::Output> {
    let rt = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .context("Failed to create tokio runtime")?;
    Ok(rt.block_on(future))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn project() -> (TempDir, ProjectConfig) {
        let dir = TempDir::new().unwrap();
        let root = crate::utils::path::normalize_path(dir.path());

        fs::create_dir_all(root.join("connection/AQA")).unwrap();
        fs::write(
            root.join("connection/AQA/Upper East AQA.json"),
            r#"{ "connections": [ { "direction": "Bidirectional", "connectionType": "HorizontalDoor",
                "nodes": [
                  { "roomid": 100, "nodeid": 5, "roomName": "X", "nodeName": "X - East Door",
                    "area": "AQA", "subarea": "Upper East AQA", "position": "left" },
                  { "roomid": 200, "nodeid": 9, "roomName": "Y", "nodeName": "Y - West Door",
                    "area": "AQA", "subarea": "Other", "position": "right" } ] } ] }"#,
        )
        .unwrap();
        // Malformed area-scope document is just absent
        fs::write(root.join("connection/AQA/intra.json"), "not json").unwrap();

        fs::create_dir_all(root.join("region")).unwrap();
        fs::write(
            root.join("region/x.json"),
            r#"{ "id": 100, "name": "X", "area": "AQA", "subarea": "Upper East AQA",
                "nodes": [
                  { "id": 5, "name": "X - East Door", "nodeType": "door" },
                  { "id": 6, "name": "X - Fake Door", "nodeType": "door" },
                  { "id": 7, "name": "Energy Tank", "nodeType": "item" } ] }"#,
        )
        .unwrap();

        let config = ProjectConfig {
            root,
            ..ProjectConfig::default()
        };
        (dir, config)
    }

    fn text_output() -> OutputArgs {
        OutputArgs {
            json: false,
            pretty: false,
        }
    }

    #[test]
    fn test_run_resolve_over_files() {
        let (_dir, config) = project();
        assert!(run_resolve(&config, Path::new("region/x.json"), 5, &text_output()).is_ok());
    }

    #[test]
    fn test_run_resolve_unknown_node_fails() {
        let (_dir, config) = project();
        let err = run_resolve(&config, Path::new("region/x.json"), 42, &text_output()).unwrap_err();
        assert!(err.to_string().contains("no node with id 42"));
    }

    #[test]
    fn test_run_room_json() {
        let (_dir, config) = project();
        let output = OutputArgs {
            json: true,
            pretty: true,
        };
        assert!(run_room(&config, Path::new("region/x.json"), &output).is_ok());
    }

    #[test]
    fn test_missing_room_file_fails() {
        let (_dir, config) = project();
        assert!(run_room(&config, Path::new("region/missing.json"), &text_output()).is_err());
    }

    #[test]
    fn test_session_resolves_from_disk() {
        let (_dir, config) = project();
        let room = open_room(&config, Path::new("region/x.json")).unwrap();
        let names = config.composite_names();
        let mut cache = open_session(&config);

        let results = block_on(async {
            Resolver::new(&mut cache, &names)
                .resolve_room(&room.nodes, &room.identity())
                .await
        })
        .unwrap();

        assert_eq!(results.len(), 2);
        let resolved = results[0].1.found().unwrap();
        assert_eq!(resolved.target_room, "Y");
        assert_eq!(resolved.target_subarea, "Other");
        assert!(!results[1].1.is_found());
        // room, area (malformed) and global (missing) scopes all memoized
        assert_eq!(cache.len(), 3);
    }
}
