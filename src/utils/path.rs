//! Path helpers for the working root and user-supplied room files.

use std::path::{Path, PathBuf};

/// Absolute form of `path`.
///
/// Canonical when the path exists; otherwise joined onto cwd (if relative)
/// and left as is, so a missing root can still be reported by name.
pub fn normalize_path(path: &Path) -> PathBuf {
    if let Ok(canonical) = path.canonicalize() {
        return canonical;
    }
    match std::env::current_dir() {
        Ok(cwd) if path.is_relative() => cwd.join(path),
        _ => path.to_path_buf(),
    }
}

/// Locate a user-supplied file.
///
/// Absolute paths are taken verbatim. A relative path that exists under
/// cwd wins; anything else is looked up under `root`.
///
/// ```ignore
/// // `roomlink room region/AQA/main_shaft.json` from anywhere in the project
/// let path = resolve_path(Path::new("region/AQA/main_shaft.json"), config.get_root());
/// ```
pub fn resolve_path(path: &Path, root: &Path) -> PathBuf {
    match path {
        p if p.is_absolute() => p.to_path_buf(),
        p if p.exists() => normalize_path(p),
        p => normalize_path(&root.join(p)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_normalize_missing_relative_path() {
        let normalized = normalize_path(Path::new("no-such-dir/room.json"));
        assert!(normalized.is_absolute());
        assert!(normalized.ends_with("no-such-dir/room.json"));
    }

    #[test]
    fn test_normalize_missing_absolute_path_kept() {
        let path = Path::new("/no-such-root/world");
        assert_eq!(normalize_path(path), path);
    }

    #[test]
    fn test_resolve_absolute_verbatim() {
        let resolved = resolve_path(Path::new("/absolute/room.json"), Path::new("/world"));
        assert_eq!(resolved, PathBuf::from("/absolute/room.json"));
    }

    #[test]
    fn test_resolve_missing_goes_under_root() {
        let resolved = resolve_path(Path::new("nonexistent/room.json"), Path::new("/world"));
        assert_eq!(resolved, PathBuf::from("/world/nonexistent/room.json"));
    }

    #[test]
    fn test_resolve_existing_under_root() {
        let dir = TempDir::new().unwrap();
        let region = dir.path().join("region-test-fixture");
        std::fs::create_dir_all(&region).unwrap();
        std::fs::write(region.join("room.json"), "{}").unwrap();

        let resolved = resolve_path(Path::new("region-test-fixture/room.json"), dir.path());
        assert_eq!(resolved, normalize_path(&region.join("room.json")));
    }
}
