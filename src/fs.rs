//! Filesystem probe
//!
//! Template resolution only ever asks three questions of the filesystem:
//! is this a file, is this a directory, and what does this directory
//! contain. The probe trait keeps the template code independent of where
//! configs actually live; `LocalFs` is the standard backend.

use std::path::{Path, PathBuf};

/// Read-only filesystem queries consumed by template resolution.
///
/// All methods are synchronous and side-effect free.
pub trait FsProbe {
    /// Check whether `path` names an existing regular file
    fn is_file(&self, path: &str) -> bool;

    /// Check whether `path` names an existing directory
    fn is_dir(&self, path: &str) -> bool;

    /// List entries of a directory, ascending by filename
    ///
    /// Returned entries are full paths in the caller's namespace
    /// (i.e. `dir` joined with each entry name), so they can be passed
    /// straight back to `is_file`. A missing or unreadable directory
    /// yields an empty list.
    fn list_sorted(&self, dir: &str) -> Vec<String>;

    /// Read a file's contents as UTF-8 text
    fn read_to_string(&self, path: &str) -> std::io::Result<String>;
}

/// Local filesystem probe
///
/// Resolves paths relative to a base directory (the current working
/// directory by default).
#[derive(Debug, Clone)]
pub struct LocalFs {
    /// Base directory for relative paths
    base_dir: PathBuf,
}

impl Default for LocalFs {
    fn default() -> Self {
        Self::new()
    }
}

impl LocalFs {
    /// Create a probe rooted at the current directory
    pub fn new() -> Self {
        Self {
            base_dir: PathBuf::from("."),
        }
    }

    /// Create a probe with a custom base directory
    pub fn with_base_dir(base_dir: impl Into<PathBuf>) -> Self {
        Self {
            base_dir: base_dir.into(),
        }
    }

    /// Get the base directory path
    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    /// Resolve a path relative to the base directory
    fn resolve(&self, path: &str) -> PathBuf {
        self.base_dir.join(path)
    }
}

impl FsProbe for LocalFs {
    fn is_file(&self, path: &str) -> bool {
        self.resolve(path).is_file()
    }

    fn is_dir(&self, path: &str) -> bool {
        self.resolve(path).is_dir()
    }

    fn list_sorted(&self, dir: &str) -> Vec<String> {
        let full_path = self.resolve(dir);

        let mut names: Vec<String> = match std::fs::read_dir(&full_path) {
            Ok(entries) => entries
                .filter_map(|e| e.ok())
                .filter_map(|e| e.file_name().into_string().ok())
                .collect(),
            Err(_) => return Vec::new(),
        };

        names.sort();

        names
            .into_iter()
            .map(|name| Path::new(dir).join(name).to_string_lossy().into_owned())
            .collect()
    }

    fn read_to_string(&self, path: &str) -> std::io::Result<String> {
        std::fs::read_to_string(self.resolve(path))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn setup_test_dir() -> (TempDir, LocalFs) {
        let dir = TempDir::new().unwrap();
        let fs = LocalFs::with_base_dir(dir.path());
        (dir, fs)
    }

    #[test]
    fn test_is_file_and_is_dir() {
        let (dir, fs) = setup_test_dir();

        std::fs::write(dir.path().join("a.json"), "{}").unwrap();
        std::fs::create_dir(dir.path().join("sub")).unwrap();

        assert!(fs.is_file("a.json"));
        assert!(!fs.is_file("sub"));
        assert!(!fs.is_file("missing.json"));

        assert!(fs.is_dir("sub"));
        assert!(!fs.is_dir("a.json"));
        assert!(!fs.is_dir("missing"));
    }

    #[test]
    fn test_list_sorted_orders_by_name() {
        let (dir, fs) = setup_test_dir();

        std::fs::create_dir(dir.path().join("objects")).unwrap();
        std::fs::write(dir.path().join("objects/c.json"), "{}").unwrap();
        std::fs::write(dir.path().join("objects/a.json"), "{}").unwrap();
        std::fs::write(dir.path().join("objects/b.json"), "{}").unwrap();

        let entries = fs.list_sorted("objects");
        let expected: Vec<String> = ["a.json", "b.json", "c.json"]
            .iter()
            .map(|n| Path::new("objects").join(n).to_string_lossy().into_owned())
            .collect();
        assert_eq!(entries, expected);

        // Entries round-trip back through the probe
        for entry in &entries {
            assert!(fs.is_file(entry));
        }
    }

    #[test]
    fn test_read_to_string() {
        let (dir, fs) = setup_test_dir();

        std::fs::write(dir.path().join("cfg.json"), r#"{"mass": 1.0}"#).unwrap();

        assert_eq!(fs.read_to_string("cfg.json").unwrap(), r#"{"mass": 1.0}"#);
        assert!(fs.read_to_string("missing.json").is_err());
    }

    #[test]
    fn test_list_sorted_missing_dir_is_empty() {
        let (_dir, fs) = setup_test_dir();
        assert!(fs.list_sorted("no_such_dir").is_empty());
    }
}
