//! Connection document loading.
//!
//! A missing or unparsable document is a normal condition (an area
//! without intra-area connections, say), so loaders return `Option`
//! and only report the reason through `debug!`.

use std::io::ErrorKind;
use std::path::Path;

use super::ConnectionDocument;

/// Source of connection documents.
pub(crate) trait DocumentLoader {
    /// Load and parse the document at `path`, `None` if absent.
    async fn load(&self, path: &Path) -> Option<ConnectionDocument>;
}

/// Loads documents from the file system.
#[derive(Debug, Clone, Copy, Default)]
pub struct FsLoader;

impl DocumentLoader for FsLoader {
    async fn load(&self, path: &Path) -> Option<ConnectionDocument> {
        let text = match tokio::fs::read_to_string(path).await {
            Ok(text) => text,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                crate::debug!("load"; "missing: {}", path.display());
                return None;
            }
            Err(e) => {
                crate::debug!("load"; "unreadable: {}: {}", path.display(), e);
                return None;
            }
        };

        match ConnectionDocument::from_json(&text) {
            Ok(document) => {
                crate::debug!(
                    "load";
                    "{} ({} connections, {} skipped)",
                    path.display(),
                    document.len(),
                    document.skipped
                );
                Some(document)
            }
            Err(e) => {
                crate::debug!("load"; "malformed: {}: {}", path.display(), e);
                None
            }
        }
    }
}

// ============================================================================
// In-memory loader (tests)
// ============================================================================

#[cfg(test)]
pub(crate) use memory::MemoryLoader;

#[cfg(test)]
mod memory {
    use std::cell::RefCell;
    use std::path::{Path, PathBuf};

    use rustc_hash::FxHashMap;

    use super::DocumentLoader;
    use crate::connection::ConnectionDocument;

    /// Serves documents from memory and records every load request.
    #[derive(Debug, Default)]
    pub(crate) struct MemoryLoader {
        documents: FxHashMap<PathBuf, ConnectionDocument>,
        requests: RefCell<Vec<PathBuf>>,
    }

    impl MemoryLoader {
        pub(crate) fn new() -> Self {
            Self::default()
        }

        pub(crate) fn with(mut self, path: impl Into<PathBuf>, json: &str) -> Self {
            let document = ConnectionDocument::from_json(json).unwrap();
            self.documents.insert(path.into(), document);
            self
        }

        /// All paths requested so far, in request order.
        pub(crate) fn requests(&self) -> Vec<PathBuf> {
            self.requests.borrow().clone()
        }

        pub(crate) fn request_count(&self, path: impl AsRef<Path>) -> usize {
            let path = path.as_ref();
            self.requests.borrow().iter().filter(|p| *p == path).count()
        }
    }

    impl DocumentLoader for MemoryLoader {
        async fn load(&self, path: &Path) -> Option<ConnectionDocument> {
            self.requests.borrow_mut().push(path.to_path_buf());
            self.documents.get(path).cloned()
        }
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_fs_loader_reads_document() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("inter.json");
        fs::write(
            &path,
            r#"{ "connections": [ { "direction": "Forward", "connectionType": "Door",
                "nodes": [ { "roomid": 1, "nodeid": 2 }, { "roomid": 3, "nodeid": 4 } ] } ] }"#,
        )
        .unwrap();

        let document = FsLoader.load(&path).await.unwrap();
        assert_eq!(document.len(), 1);
    }

    #[tokio::test]
    async fn test_fs_loader_keeps_valid_entries() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("inter.json");
        fs::write(
            &path,
            r#"{ "connections": [
                { "direction": "Forward", "connectionType": null,
                  "nodes": [ { "roomid": 1, "nodeid": 2 }, { "roomid": 3, "nodeid": 4 }, { "roomid": 5, "nodeid": 6 } ] },
                { "direction": "Bidirectional", "connectionType": null,
                  "nodes": [ { "roomid": 100, "nodeid": 5 }, { "roomid": 200, "nodeid": 9 } ] } ] }"#,
        )
        .unwrap();

        let document = FsLoader.load(&path).await.unwrap();
        assert_eq!(document.len(), 1);
        assert_eq!(document.skipped, 1);
        assert_eq!(document.connections[0].connection_type, "");
    }

    #[tokio::test]
    async fn test_fs_loader_missing_is_absent() {
        let dir = TempDir::new().unwrap();
        assert!(FsLoader.load(&dir.path().join("nope.json")).await.is_none());
    }

    #[tokio::test]
    async fn test_fs_loader_malformed_is_absent() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("intra.json");
        fs::write(&path, "{ \"connections\": [ oops").unwrap();

        assert!(FsLoader.load(&path).await.is_none());
    }

    #[tokio::test]
    async fn test_fs_loader_directory_is_absent() {
        let dir = TempDir::new().unwrap();
        assert!(FsLoader.load(dir.path()).await.is_none());
    }
}
