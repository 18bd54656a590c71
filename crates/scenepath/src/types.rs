//! Shared filter and result types.

use std::fmt;

use crate::graph::SceneGraph;

/// Selects which nodes an index or printout handles.
pub enum NodeFilter<'f, G: SceneGraph> {
    /// Every node.
    All,
    /// Nodes whose `kind` equals the given tag.
    Kind(G::Kind),
    /// Nodes accepted by a caller-supplied predicate.
    Predicate(Box<dyn Fn(&G, G::Node) -> bool + 'f>),
}

impl<'f, G: SceneGraph> NodeFilter<'f, G> {
    /// Wraps a predicate closure.
    pub fn predicate(predicate: impl Fn(&G, G::Node) -> bool + 'f) -> Self {
        Self::Predicate(Box::new(predicate))
    }

    pub fn matches(&self, graph: &G, node: G::Node) -> bool {
        match self {
            Self::All => true,
            Self::Kind(kind) => graph.kind(node) == *kind,
            Self::Predicate(predicate) => predicate(graph, node),
        }
    }

    pub fn is_all(&self) -> bool {
        matches!(self, Self::All)
    }
}

impl<G: SceneGraph> Default for NodeFilter<'_, G> {
    fn default() -> Self {
        Self::All
    }
}

impl<G: SceneGraph> From<Option<G::Kind>> for NodeFilter<'_, G> {
    fn from(kind: Option<G::Kind>) -> Self {
        kind.map_or(Self::All, Self::Kind)
    }
}

impl<G: SceneGraph> fmt::Debug for NodeFilter<'_, G> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::All => f.write_str("All"),
            Self::Kind(kind) => f.debug_tuple("Kind").field(kind).finish(),
            Self::Predicate(_) => f.write_str("Predicate(..)"),
        }
    }
}

/// Counts reported by `PathIndex::pretty_print`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PrintSummary {
    /// Nodes written to the sink.
    pub handled: usize,
    /// Nodes visited but elided by the filter.
    pub filtered: usize,
}

impl fmt::Display for PrintSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Plural follows the nodes visited, not the nodes written.
        let plural = if self.handled + self.filtered == 1 { "" } else { "s" };
        write!(f, "processed {} object{plural}", self.handled)?;
        if self.filtered > 0 {
            write!(f, " ({} filtered)", self.filtered)?;
        }
        Ok(())
    }
}
