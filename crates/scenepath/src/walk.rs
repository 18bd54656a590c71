//! Depth-first scene traversal.
//!
//! [`next_node`] is the single-step successor function: pre-order, first
//! child before next sibling, climbing back up through parents when a
//! branch is exhausted, and refusing to step onto or past a stop node.
//! [`TreeWalker`] drives it as an iterator and tracks the depth of each
//! yielded node.

use std::fmt;

use fnv::FnvHashSet;

use crate::graph::{depth_of, SceneGraph};

/// Identity-keyed set of nodes at which traversal halts.
pub struct StopSet<N> {
    nodes: FnvHashSet<N>,
}

impl<N: Copy + Eq + std::hash::Hash> StopSet<N> {
    pub fn new() -> Self {
        Self {
            nodes: FnvHashSet::default(),
        }
    }

    pub fn insert(&mut self, node: N) -> bool {
        self.nodes.insert(node)
    }

    #[inline]
    pub fn contains(&self, node: &N) -> bool {
        self.nodes.contains(node)
    }

    #[inline]
    fn contains_opt(&self, node: Option<N>) -> bool {
        node.is_some_and(|node| self.nodes.contains(&node))
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}

impl<N: Copy + Eq + std::hash::Hash> Default for StopSet<N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<N: Copy + Eq + std::hash::Hash> FromIterator<N> for StopSet<N> {
    fn from_iter<I: IntoIterator<Item = N>>(iter: I) -> Self {
        Self {
            nodes: iter.into_iter().collect(),
        }
    }
}

impl<N: Copy + Eq + std::hash::Hash> Extend<N> for StopSet<N> {
    fn extend<I: IntoIterator<Item = N>>(&mut self, iter: I) {
        self.nodes.extend(iter);
    }
}

impl<N: fmt::Debug> fmt::Debug for StopSet<N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.nodes.iter()).finish()
    }
}

/// One step of the traversal: the node reached and how the depth changed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Step<N> {
    node: N,
    /// +1 when descending into a first child, otherwise minus the number of
    /// levels climbed before moving to a sibling.
    depth_delta: isize,
}

fn advance<G: SceneGraph>(
    graph: &G,
    op: G::Node,
    stops: &StopSet<G::Node>,
) -> Option<Step<G::Node>> {
    if let Some(child) = graph.first_child(op) {
        if stops.contains_opt(graph.next_sibling(op)) || stops.contains(&child) {
            log::trace!("stop node next to {op:?}, ending walk");
            return None;
        }
        return Some(Step {
            node: child,
            depth_delta: 1,
        });
    }

    if stops.contains(&op) {
        return None;
    }

    let mut op = op;
    let mut climbed = 0isize;
    while graph.next_sibling(op).is_none() {
        let Some(parent) = graph.parent(op) else {
            break;
        };
        if stops.contains(&op) || stops.contains(&parent) {
            log::trace!("climbed into stop node {parent:?}, ending walk");
            return None;
        }
        climbed += 1;
        op = parent;
    }

    match graph.next_sibling(op) {
        Some(sibling) if !stops.contains(&sibling) => Some(Step {
            node: sibling,
            depth_delta: -climbed,
        }),
        _ => None,
    }
}

/// Returns the node after `node` in depth-first pre-order.
///
/// Returns `None` at the end of the scene, or when the next step would land
/// on a stop node or climb out through one, so the function can drive a
/// `while let` loop bounded by `stops`.
pub fn next_node<G: SceneGraph>(
    graph: &G,
    node: G::Node,
    stops: &StopSet<G::Node>,
) -> Option<G::Node> {
    advance(graph, node, stops).map(|step| step.node)
}

/// Lazy depth-first iterator over `(node, depth)` pairs.
///
/// By default only the descendants of the start node are visited
/// (`children_only`), and depths are absolute: the start node sits at the
/// number of its ancestors. Once the walk ends it stays ended.
pub struct TreeWalker<'g, G: SceneGraph> {
    graph: &'g G,
    start: G::Node,
    stops: StopSet<G::Node>,
    children_only: bool,
    base_depth: Option<usize>,
    cursor: Option<Cursor<G::Node>>,
}

#[derive(Debug, Clone, Copy)]
enum Cursor<N> {
    /// The start node is yielded before any step is taken.
    Start { depth: usize },
    At { node: N, depth: usize },
    Done,
}

impl<'g, G: SceneGraph> TreeWalker<'g, G> {
    pub fn new(graph: &'g G, start: G::Node) -> Self {
        Self {
            graph,
            start,
            stops: StopSet::new(),
            children_only: true,
            base_depth: None,
            cursor: None,
        }
    }

    /// Whether to skip `start` and stay inside its subtree (default `true`).
    pub fn with_children_only(mut self, children_only: bool) -> Self {
        self.children_only = children_only;
        self
    }

    /// Depth assigned to the start node instead of its ancestor count.
    pub fn with_base_depth(mut self, depth: usize) -> Self {
        self.base_depth = Some(depth);
        self
    }

    /// Adds a node at which the walk halts.
    pub fn with_stop(mut self, node: G::Node) -> Self {
        self.stops.insert(node);
        self
    }

    /// Adds several stop nodes.
    pub fn with_stops(mut self, nodes: impl IntoIterator<Item = G::Node>) -> Self {
        self.stops.extend(nodes);
        self
    }

    fn init(&mut self) -> Cursor<G::Node> {
        let depth = self
            .base_depth
            .unwrap_or_else(|| depth_of(self.graph, self.start));
        if self.children_only {
            self.stops.insert(self.start);
            Cursor::At {
                node: self.start,
                depth,
            }
        } else {
            Cursor::Start { depth }
        }
    }
}

impl<G: SceneGraph> Iterator for TreeWalker<'_, G> {
    type Item = (G::Node, usize);

    fn next(&mut self) -> Option<Self::Item> {
        let cursor = match self.cursor {
            Some(cursor) => cursor,
            None => self.init(),
        };

        match cursor {
            Cursor::Start { depth } => {
                self.cursor = Some(Cursor::At {
                    node: self.start,
                    depth,
                });
                Some((self.start, depth))
            }
            Cursor::At { node, depth } => match advance(self.graph, node, &self.stops) {
                Some(step) => {
                    let depth = depth.saturating_add_signed(step.depth_delta);
                    self.cursor = Some(Cursor::At {
                        node: step.node,
                        depth,
                    });
                    Some((step.node, depth))
                }
                None => {
                    self.cursor = Some(Cursor::Done);
                    None
                }
            },
            Cursor::Done => None,
        }
    }
}

impl<G: SceneGraph> std::iter::FusedIterator for TreeWalker<'_, G> {}

/// Walks the descendants of `start` with absolute depths.
pub fn walk<G: SceneGraph>(graph: &G, start: G::Node) -> TreeWalker<'_, G> {
    TreeWalker::new(graph, start)
}
