//! The page-exists rule: matcher plus resolver, one call node at a time.

use std::sync::Arc;

use crate::config::{CallPatterns, ConventionTable};
use crate::fs::FileSystem;
use crate::matcher::match_page_reference;
use crate::resolver::{ProjectRoot, page_exists};
use crate::types::{CallNode, Diagnostic};

/// Checks that every literal page reference resolves to a file.
///
/// Holds only immutable state, so one instance can serve many threads.
pub struct PageExistsRule {
    fs: Arc<dyn FileSystem>,
    pages: ConventionTable,
    patterns: CallPatterns,
    root: ProjectRoot,
}

impl PageExistsRule {
    /// Build a rule resolving pages under an already-discovered root.
    pub fn new(
        fs: Arc<dyn FileSystem>,
        root: ProjectRoot,
        pages: ConventionTable,
        patterns: CallPatterns,
    ) -> Self {
        return Self { fs, pages, patterns, root };
    }

    /// The root page paths are resolved against.
    pub const fn root(&self) -> &ProjectRoot {
        return &self.root;
    }

    /// Run the rule on one node. Returns no diagnostic for calls that are not
    /// page references or whose page exists, and exactly one otherwise.
    pub fn process_node(&self, call: &CallNode) -> Vec<Diagnostic> {
        let Some(reference) = match_page_reference(call, &self.patterns) else {
            return Vec::new();
        };

        if page_exists(self.fs.as_ref(), &self.root.path, &reference.raw_name, &self.pages) {
            return Vec::new();
        }

        return vec![Diagnostic::missing_page(&reference)];
    }
}
