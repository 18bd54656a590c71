//! The relation interface a scene graph must expose.
//!
//! Nodes belong to the host application. This crate only reads them through
//! [`SceneGraph`] and never mutates the tree behind it.

use std::borrow::Cow;
use std::fmt::Debug;
use std::hash::Hash;

/// Read-only view of a rooted, ordered scene tree.
///
/// Each node has at most one parent, an optional first child and an optional
/// next sibling. Top-level nodes have no parent and are chained through
/// `next_sibling`, starting at [`SceneGraph::first_root`].
///
/// Implementations must describe a finite, acyclic tree. A cycle makes every
/// traversal in this crate run forever.
pub trait SceneGraph {
    /// Opaque node handle compared by identity.
    type Node: Copy + Eq + Hash + Debug;
    /// Node type tag used for kind filtering.
    type Kind: PartialEq + Debug;

    fn parent(&self, node: Self::Node) -> Option<Self::Node>;

    fn first_child(&self, node: Self::Node) -> Option<Self::Node>;

    fn next_sibling(&self, node: Self::Node) -> Option<Self::Node>;

    fn name(&self, node: Self::Node) -> Cow<'_, str>;

    fn kind(&self, node: Self::Node) -> Self::Kind;

    /// First top-level node of the scene, if the scene is not empty.
    fn first_root(&self) -> Option<Self::Node>;
}

/// Iterator over the ancestors of a node, nearest first.
pub struct Ancestors<'g, G: SceneGraph> {
    graph: &'g G,
    current: Option<G::Node>,
}

impl<G: SceneGraph> Iterator for Ancestors<'_, G> {
    type Item = G::Node;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.current?;
        self.current = self.graph.parent(node);
        Some(node)
    }
}

/// Returns the ancestors of `node` from its parent up to the scene top.
pub fn ancestors<G: SceneGraph>(graph: &G, node: G::Node) -> Ancestors<'_, G> {
    Ancestors {
        graph,
        current: graph.parent(node),
    }
}

/// Computes the depth of a node (number of ancestors, 0 for top-level nodes).
pub fn depth_of<G: SceneGraph>(graph: &G, node: G::Node) -> usize {
    ancestors(graph, node).count()
}

/// Iterator over the direct children of a node, in sibling order.
pub struct Children<'g, G: SceneGraph> {
    graph: &'g G,
    current: Option<G::Node>,
}

impl<G: SceneGraph> Iterator for Children<'_, G> {
    type Item = G::Node;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.current?;
        self.current = self.graph.next_sibling(node);
        Some(node)
    }
}

/// Returns the direct children of `node`.
pub fn children<G: SceneGraph>(graph: &G, node: G::Node) -> Children<'_, G> {
    Children {
        graph,
        current: graph.first_child(node),
    }
}
