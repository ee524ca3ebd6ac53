//! Narrow read-only filesystem capability used by the resolver and the fingerprint.
//!
//! Every query answers "no" on failure. A permission error or a file deleted
//! between two calls reads as absence, never as an error.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::time::UNIX_EPOCH;

use walkdir::WalkDir;

/// The filesystem operations the core needs, and nothing more.
pub trait FileSystem: Send + Sync {
    /// Whether anything exists at `path`.
    fn exists(&self, path: &Path) -> bool;

    /// Whether `path` is a directory.
    fn is_dir(&self, path: &Path) -> bool;

    /// Whether `path` is a regular file.
    fn is_file(&self, path: &Path) -> bool;

    /// Modification time in nanoseconds since the Unix epoch.
    fn modified(&self, path: &Path) -> Option<u128>;

    /// Every regular file under `dir`, recursively, in no particular order.
    /// Symbolic links are followed. Unreadable entries and link loops are skipped.
    fn walk_files(&self, dir: &Path) -> Vec<PathBuf>;
}

/// The real filesystem.
#[derive(Debug, Clone, Copy, Default)]
pub struct RealFs;

impl FileSystem for RealFs {
    fn exists(&self, path: &Path) -> bool {
        return path.try_exists().unwrap_or(false);
    }

    fn is_dir(&self, path: &Path) -> bool {
        return path.is_dir();
    }

    fn is_file(&self, path: &Path) -> bool {
        return path.is_file();
    }

    fn modified(&self, path: &Path) -> Option<u128> {
        let modified = std::fs::metadata(path).and_then(|m| return m.modified()).ok()?;
        let since_epoch = modified.duration_since(UNIX_EPOCH).ok()?;
        return Some(since_epoch.as_nanos());
    }

    fn walk_files(&self, dir: &Path) -> Vec<PathBuf> {
        return WalkDir::new(dir)
            .follow_links(true)
            .into_iter()
            .filter_map(Result::ok)
            .filter(|e| return e.file_type().is_file())
            .map(walkdir::DirEntry::into_path)
            .collect();
    }
}

/// In-memory filesystem: a map from file path to modification time.
/// Directories exist implicitly as ancestors of files.
#[derive(Debug, Clone, Default)]
pub struct MemoryFs {
    /// Regular files and their modification times.
    files: BTreeMap<PathBuf, u128>,
}

impl MemoryFs {
    /// Empty filesystem.
    pub fn new() -> Self {
        return Self::default();
    }

    /// Add or replace a file with the given modification time.
    pub fn insert(&mut self, path: impl Into<PathBuf>, mtime: u128) {
        self.files.insert(path.into(), mtime);
    }

    /// Remove a file. Returns whether it was present.
    pub fn remove(&mut self, path: &Path) -> bool {
        return self.files.remove(path).is_some();
    }

    /// Builder form of [`MemoryFs::insert`].
    #[must_use]
    pub fn with_file(mut self, path: impl Into<PathBuf>, mtime: u128) -> Self {
        self.insert(path, mtime);
        return self;
    }
}

impl FileSystem for MemoryFs {
    fn exists(&self, path: &Path) -> bool {
        return self.is_file(path) || self.is_dir(path);
    }

    fn is_dir(&self, path: &Path) -> bool {
        return self
            .files
            .keys()
            .any(|file| return file != path && file.starts_with(path));
    }

    fn is_file(&self, path: &Path) -> bool {
        return self.files.contains_key(path);
    }

    fn modified(&self, path: &Path) -> Option<u128> {
        return self.files.get(path).copied();
    }

    fn walk_files(&self, dir: &Path) -> Vec<PathBuf> {
        // Reverse key order so callers cannot lean on traversal order.
        return self
            .files
            .keys()
            .rev()
            .filter(|file| return *file != dir && file.starts_with(dir))
            .cloned()
            .collect();
    }
}
