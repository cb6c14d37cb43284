//! Per-session memo of connection documents.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use rustc_hash::FxHashMap;

use super::{ConnectionDocument, ConnectionLayout, DocumentLoader, Scope};

/// Connection documents of one working root, keyed by scope.
///
/// Absence is memoized as well, so a missing document is read at most
/// once per session. Every method that touches entries takes `&mut self`:
/// nothing can read the cache while `invalidate_all` runs.
pub struct ConnectionCache<L> {
    loader: L,
    layout: ConnectionLayout,
    root: PathBuf,
    entries: FxHashMap<Scope, Option<Arc<ConnectionDocument>>>,
}

impl<L: DocumentLoader> ConnectionCache<L> {
    pub fn new(loader: L, layout: ConnectionLayout, root: impl Into<PathBuf>) -> Self {
        Self {
            loader,
            layout,
            root: root.into(),
            entries: FxHashMap::default(),
        }
    }

    /// Current working root.
    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn layout(&self) -> &ConnectionLayout {
        &self.layout
    }

    pub fn loader(&self) -> &L {
        &self.loader
    }

    /// Room-scope document for an `(area, subarea)` pair.
    pub async fn room_scope(&mut self, area: &str, subarea: &str) -> Option<Arc<ConnectionDocument>> {
        self.get(Scope::room(area, subarea)).await
    }

    /// Area-scope (intra-area) document.
    pub async fn area_scope(&mut self, area: &str) -> Option<Arc<ConnectionDocument>> {
        self.get(Scope::area(area)).await
    }

    /// The global-scope (inter-area) document.
    pub async fn global_scope(&mut self) -> Option<Arc<ConnectionDocument>> {
        self.get(Scope::Global).await
    }

    /// Document for `scope`, loading it on first reference.
    pub async fn get(&mut self, scope: Scope) -> Option<Arc<ConnectionDocument>> {
        if let Some(entry) = self.entries.get(&scope) {
            return entry.clone();
        }

        let document = match scope.logical_path(&self.layout) {
            Some(path) => self.loader.load(&self.root.join(path)).await.map(Arc::new),
            None => {
                crate::debug!("cache"; "{} does not name a file", scope);
                None
            }
        };
        crate::debug!(
            "cache";
            "{} {}",
            if document.is_some() { "loaded" } else { "absent" },
            scope
        );

        self.entries.insert(scope, document.clone());
        document
    }

    /// Drop every entry. The next request of any scope reloads.
    pub fn invalidate_all(&mut self) {
        let dropped = self.entries.len();
        self.entries.clear();
        crate::debug!("cache"; "invalidated {} entries", dropped);
    }

    /// Move the session to another working root.
    ///
    /// Returns `true` if the root changed (and the cache was invalidated).
    pub fn switch_root(&mut self, root: impl Into<PathBuf>) -> bool {
        let root = root.into();
        if root == self.root {
            return false;
        }
        crate::debug!("cache"; "root changed: {}", root.display());
        self.root = root;
        self.invalidate_all();
        true
    }

    /// Number of memoized scopes, present or absent.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

// ============================================================================
// Tests
// ============================================================================
