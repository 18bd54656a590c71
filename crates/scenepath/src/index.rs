//! Path-keyed scene index.
//!
//! A [`PathIndex`] is a snapshot of a scene (or of one subtree) in which every
//! node is filed under the names of its ancestors joined by a separator, so
//! `Cube` below `Group1A` below `Group1` lands under `"Group1/Group1A"`. Keys
//! read like the object manager's address bar and can be queried with glob or
//! regular-expression patterns.
//!
//! ## Module Structure
//!
//! - `build` - Index construction from a single traversal
//! - `display` - Indented printout and one-line rendering
//!
//! The index stores node handles, not the tree. Renaming or moving nodes in
//! the host after a build leaves the index describing the old shape until it
//! is rebuilt.

mod build;
mod display;

use indexmap::IndexMap;

use crate::config::IndexConfig;
use crate::error::Result;
use crate::query::PathPattern;

pub use build::IndexBuilder;
pub use display::{IndexDisplay, PrintOptions};

/// Nodes grouped by ancestor path, in traversal order.
#[derive(Debug, Clone)]
pub struct PathIndex<N> {
    root: Option<N>,
    children_only: bool,
    entries: IndexMap<String, Vec<N>>,
    max_depth: Option<usize>,
    node_count: usize,
    config: IndexConfig,
}

impl<N: Copy + Eq> PathIndex<N> {
    /// The node the build started from (the first top-level node for a
    /// whole-scene index), or `None` if the scene was empty.
    pub fn root(&self) -> Option<N> {
        self.root
    }

    /// Whether the root itself was excluded from the index.
    pub fn is_children_only(&self) -> bool {
        self.children_only
    }

    pub fn entries(&self) -> &IndexMap<String, Vec<N>> {
        &self.entries
    }

    /// Nodes filed under exactly `key`.
    pub fn get(&self, key: &str) -> Option<&[N]> {
        self.entries.get(key).map(Vec::as_slice)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    /// Every indexed node, key by key.
    pub fn nodes(&self) -> impl Iterator<Item = N> + '_ {
        self.entries.values().flatten().copied()
    }

    /// Number of distinct keys.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Number of nodes that passed the filter.
    pub fn node_count(&self) -> usize {
        self.node_count
    }

    /// Deepest absolute depth seen during the build, filtered nodes included.
    pub fn max_depth(&self) -> Option<usize> {
        self.max_depth
    }

    pub fn config(&self) -> &IndexConfig {
        &self.config
    }

    /// Returns every node whose key matches `pattern`.
    ///
    /// Keys are matched whole unless the config's `strict` is off. See
    /// [`PathIndex::query_with`] for the pattern syntax.
    pub fn query(&self, pattern: &str) -> Result<Vec<N>> {
        self.query_with(pattern, self.config.strict)
    }

    /// Returns every node whose key matches `pattern`.
    ///
    /// The pattern may use `*` (any run of characters) and `?` (one
    /// character), or start with `!` to be used as a regular expression
    /// verbatim. `..` removes the segment before it and a trailing separator
    /// is ignored. With `strict` the whole key must match; otherwise a match
    /// anywhere in the key is enough.
    ///
    /// Results are the node lists of the matching keys concatenated in key
    /// order. An empty pattern or an index without a match gives an empty
    /// list.
    pub fn query_with(&self, pattern: &str, strict: bool) -> Result<Vec<N>> {
        if self.entries.is_empty() {
            return Ok(Vec::new());
        }
        match PathPattern::compile_with(pattern, strict, &self.config)? {
            Some(compiled) => Ok(self.query_pattern(&compiled)),
            None => Ok(Vec::new()),
        }
    }

    /// Runs an already compiled pattern.
    pub fn query_pattern(&self, pattern: &PathPattern) -> Vec<N> {
        let mut keys = Vec::new();
        let mut results = Vec::new();
        for (key, nodes) in &self.entries {
            if pattern.is_match(key) {
                keys.push(key.as_str());
                results.extend_from_slice(nodes);
            }
        }
        log::debug!("keys = {keys:?}");
        results
    }
}
