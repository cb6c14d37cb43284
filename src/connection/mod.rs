//! Connection data sources.
//!
//! # Module Structure
//!
//! - [`types`]: Document model (`Connection`, `ConnectionEndpoint`, ...)
//! - [`scope`]: Scope keys and their file layout
//! - [`loader`]: Document loading (absence is not an error)
//! - [`cache`]: Per-session memo keyed by scope
//!
//! # Usage
//!
//! ```ignore
//! let mut cache = ConnectionCache::new(FsLoader, ConnectionLayout::default(), root);
//! let global = cache.global_scope().await;
//! cache.switch_root(other_root); // invalidates everything
//! ```

mod cache;
mod loader;
mod scope;
mod types;

pub use cache::ConnectionCache;
pub(crate) use loader::DocumentLoader;
pub use loader::FsLoader;
pub use scope::{ConnectionLayout, Scope};
pub use types::{Connection, ConnectionDocument, ConnectionEndpoint, Direction};

#[cfg(test)]
pub(crate) use loader::MemoryLoader;
