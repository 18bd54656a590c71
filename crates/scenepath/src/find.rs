//! Name lookup over a scene.

use std::fmt;
use std::str::FromStr;

use crate::error::{Result, ScenePathError};
use crate::graph::SceneGraph;
use crate::walk::TreeWalker;

// ---------------------------------------------------------------------------
// Lookup
// ---------------------------------------------------------------------------

/// Finds the first node named exactly `name`.
///
/// With a `start` node the start itself is tested first, then its
/// descendants. Without one the whole scene is searched.
pub fn find_node<G: SceneGraph>(
    graph: &G,
    name: &str,
    start: Option<G::Node>,
) -> Option<G::Node> {
    find_node_by(graph, name, start, |candidate, name| candidate == name)
}

/// Like [`find_node`] with an additional comparison.
///
/// A node is accepted when `matcher` accepts it or its name equals `name`
/// exactly. `matcher` receives the candidate's name and `name`, in that
/// order.
pub fn find_node_by<G, F>(
    graph: &G,
    name: &str,
    start: Option<G::Node>,
    matcher: F,
) -> Option<G::Node>
where
    G: SceneGraph,
    F: Fn(&str, &str) -> bool,
{
    let accepts = |node: G::Node| {
        let candidate = graph.name(node);
        candidate == name || matcher(&*candidate, name)
    };
    let found = match start {
        Some(start) => std::iter::once(start)
            .chain(TreeWalker::new(graph, start).map(|(node, _)| node))
            .find(|&node| accepts(node)),
        None => scene_nodes(graph).find(|&node| accepts(node)),
    };
    if found.is_none() {
        log::debug!("no node matching {name:?}");
    }
    found
}

/// Every node in the scene named exactly `name`, in traversal order.
pub fn find_nodes<G: SceneGraph>(graph: &G, name: &str) -> Vec<G::Node> {
    scene_nodes(graph)
        .filter(|&node| graph.name(node) == name)
        .collect()
}

fn scene_nodes<G: SceneGraph>(graph: &G) -> impl Iterator<Item = G::Node> + '_ {
    graph.first_root().into_iter().flat_map(move |first| {
        TreeWalker::new(graph, first)
            .with_children_only(false)
            .map(|(node, _)| node)
    })
}

// ---------------------------------------------------------------------------
// Fuzzy comparison
// ---------------------------------------------------------------------------

/// How many leading characters [`fuzzy_compare`] checks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FuzzyLimit {
    /// A fixed number of characters.
    Chars(usize),
    /// A percentage of the longer of the two names.
    Percent(u32),
}

impl FuzzyLimit {
    /// Resolves the limit to a character count for a pair of names.
    pub fn chars_for(self, a: &str, b: &str) -> usize {
        match self {
            Self::Chars(count) => count,
            Self::Percent(percent) => {
                let longest = a.chars().count().max(b.chars().count());
                longest * percent as usize / 100
            }
        }
    }
}

impl Default for FuzzyLimit {
    fn default() -> Self {
        Self::Chars(20)
    }
}

impl FromStr for FuzzyLimit {
    type Err = ScenePathError;

    /// Parses `"20"` as twenty characters and `"75%"` as a percentage.
    fn from_str(s: &str) -> Result<Self> {
        let s = s.trim();
        let invalid = || {
            ScenePathError::InvalidInput(format!(
                "invalid fuzzy limit {s:?}, expected a count or a percentage like \"75%\""
            ))
        };
        match s.strip_suffix('%') {
            Some(percent) => percent.trim().parse().map(Self::Percent).map_err(|_| invalid()),
            None => s.parse().map(Self::Chars).map_err(|_| invalid()),
        }
    }
}

impl fmt::Display for FuzzyLimit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Chars(count) => write!(f, "{count}"),
            Self::Percent(percent) => write!(f, "{percent}%"),
        }
    }
}

/// Compares the leading characters of two names.
///
/// The first `limit` characters of `a` must equal the characters of `b` at
/// the same positions. `b` ending early is a mismatch; `a` ending early is
/// not.
pub fn fuzzy_compare(a: &str, b: &str, limit: FuzzyLimit) -> bool {
    let count = limit.chars_for(a, b);
    let mut theirs = b.chars();
    a.chars()
        .take(count)
        .all(|ours| theirs.next() == Some(ours))
}
