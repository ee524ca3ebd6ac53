/// Cache fingerprint over the page directories: one hash for "which page
/// files exist and when they were last modified".
use std::path::{Component, Path};

use sha2::{Digest as _, Sha256};

use crate::config::ConventionTable;
use crate::fs::FileSystem;

/// Identifier of this fingerprint source in a host result cache.
pub const CACHE_KEY: &str = "inertia-pages-cache-meta";

/// Separator between serialized entries before hashing.
const ENTRY_DELIMITER: &str = "|";

/// One page file as seen by the fingerprint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FingerprintEntry {
    /// Modification time in nanoseconds since the Unix epoch.
    pub mtime: u128,
    /// Path relative to the project root, `/`-separated on every platform.
    pub path: String,
}

impl FingerprintEntry {
    /// The `path:mtime` form that is sorted and hashed.
    pub fn serialized(&self) -> String {
        return format!("{}:{}", self.path, self.mtime);
    }
}

/// The `(key, hash)` pair handed to a host result cache.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct CacheMeta {
    /// SHA-256 of the sorted entries, 64 lowercase hex chars.
    pub hash: String,
    /// Always [`CACHE_KEY`].
    pub key: &'static str,
}

/// Collect every page file under every configured directory, recursively.
/// Directories that don't exist are skipped. Files that vanish or cannot be
/// stat'ed mid-walk are left out.
pub fn collect_entries(fs: &dyn FileSystem, root: &Path, table: &ConventionTable) -> Vec<FingerprintEntry> {
    let mut entries = Vec::new();

    for directory in table.directories() {
        let dir = root.join(directory);
        if !fs.is_dir(&dir) {
            continue;
        }

        for file in fs.walk_files(&dir) {
            if !table.has_page_extension(&file) {
                continue;
            }
            let Some(mtime) = fs.modified(&file) else {
                continue;
            };
            entries.push(FingerprintEntry {
                mtime,
                path: portable_relative_path(root, &file),
            });
        }
    }

    return entries;
}

/// Compute the cache fingerprint for the current state of the page directories.
///
/// Normalization: serialize each entry as `path:mtime`, sort, join with `|`,
/// then SHA-256 the result. Traversal order never affects the hash; file
/// contents are not read.
pub fn fingerprint(fs: &dyn FileSystem, root: &Path, table: &ConventionTable) -> CacheMeta {
    let entries = collect_entries(fs, root, table);
    tracing::debug!(files = entries.len(), "fingerprinting page directories");
    return CacheMeta {
        hash: hash_entries(&entries),
        key: CACHE_KEY,
    };
}

/// Sort the serialized entries, join them, and hash the result.
fn hash_entries(entries: &[FingerprintEntry]) -> String {
    let mut serialized: Vec<String> = entries.iter().map(FingerprintEntry::serialized).collect();
    serialized.sort();
    let digest = Sha256::digest(serialized.join(ENTRY_DELIMITER).as_bytes());
    return format!("{digest:x}");
}

/// `root/resources/js/Pages/Home.vue` → `resources/js/Pages/Home.vue`.
fn portable_relative_path(root: &Path, file: &Path) -> String {
    let relative = file.strip_prefix(root).unwrap_or(file);
    return relative
        .components()
        .filter_map(|component| {
            return match component {
                Component::Normal(part) => Some(part.to_string_lossy()),
                Component::CurDir | Component::ParentDir | Component::Prefix(_) | Component::RootDir => None,
            };
        })
        .collect::<Vec<_>>()
        .join("/");
}
