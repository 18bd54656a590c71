//! Arena-backed scene tree.
//!
//! `SceneTree` stores nodes in a flat vector addressed by [`NodeId`] and keeps
//! the parent / first-child / next-sibling links the traversal code expects.
//! It is the owned counterpart to a host scene graph: tests build one
//! directly, and callers can snapshot a host tree into one with
//! [`SceneTree::from_graph`].

use std::borrow::Cow;
use std::fmt::Debug;

use fnv::FnvHashMap;

use crate::error::{Result, ScenePathError};
use crate::graph::SceneGraph;
use crate::walk::TreeWalker;

/// A compact 32-bit handle into a [`SceneTree`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(transparent)]
pub struct NodeId(u32);

impl NodeId {
    /// Creates a new NodeId from a usize.
    ///
    /// # Panics
    /// Panics if `index >= u32::MAX`.
    #[inline]
    pub fn new(index: usize) -> Self {
        assert!(
            index < u32::MAX as usize,
            "node index must be less than u32::MAX"
        );
        Self(index as u32)
    }

    /// Returns the index as a usize.
    #[inline]
    pub fn get(&self) -> usize {
        self.0 as usize
    }
}

/// A single node stored in the arena.
#[derive(Debug, Clone)]
pub struct SceneNode<K> {
    name: String,
    kind: K,
    parent: Option<NodeId>,
    first_child: Option<NodeId>,
    last_child: Option<NodeId>,
    next_sibling: Option<NodeId>,
}

impl<K> SceneNode<K> {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn kind(&self) -> &K {
        &self.kind
    }

    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }
}

/// Ordered scene tree with any number of top-level nodes.
#[derive(Debug, Clone)]
pub struct SceneTree<K> {
    nodes: Vec<SceneNode<K>>,
    first_root: Option<NodeId>,
    last_root: Option<NodeId>,
}

impl<K> Default for SceneTree<K> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K> SceneTree<K> {
    pub fn new() -> Self {
        Self {
            nodes: Vec::new(),
            first_root: None,
            last_root: None,
        }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn get(&self, id: NodeId) -> Option<&SceneNode<K>> {
        self.nodes.get(id.get())
    }

    /// Appends a node as the last child of `parent`, or as the last
    /// top-level node when `parent` is `None`.
    pub fn insert(
        &mut self,
        parent: Option<NodeId>,
        name: impl Into<String>,
        kind: K,
    ) -> Result<NodeId> {
        let Some(parent) = parent else {
            return Ok(self.insert_root(name, kind));
        };
        if self.get(parent).is_none() {
            return Err(ScenePathError::NodeNotFound(format!(
                "parent {} is not in the scene",
                parent.get()
            )));
        }
        Ok(self.push_child(parent, name.into(), kind))
    }

    /// Appends a new top-level node.
    pub fn insert_root(&mut self, name: impl Into<String>, kind: K) -> NodeId {
        let id = self.push(None, name.into(), kind);
        match self.last_root.replace(id) {
            Some(previous) => self.nodes[previous.get()].next_sibling = Some(id),
            None => self.first_root = Some(id),
        }
        id
    }

    fn push_child(&mut self, parent: NodeId, name: String, kind: K) -> NodeId {
        let id = self.push(Some(parent), name, kind);
        let previous = {
            let parent_node = &mut self.nodes[parent.get()];
            let previous = parent_node.last_child.replace(id);
            if previous.is_none() {
                parent_node.first_child = Some(id);
            }
            previous
        };
        if let Some(previous) = previous {
            self.nodes[previous.get()].next_sibling = Some(id);
        }
        id
    }

    fn push(&mut self, parent: Option<NodeId>, name: String, kind: K) -> NodeId {
        let id = NodeId::new(self.nodes.len());
        self.nodes.push(SceneNode {
            name,
            kind,
            parent,
            first_child: None,
            last_child: None,
            next_sibling: None,
        });
        id
    }

    /// Renames a node. Indexes built before the rename keep the old name.
    pub fn rename(&mut self, id: NodeId, name: impl Into<String>) -> Result<()> {
        let node = self
            .nodes
            .get_mut(id.get())
            .ok_or_else(|| ScenePathError::NodeNotFound(format!("node {}", id.get())))?;
        node.name = name.into();
        Ok(())
    }

    /// Returns the top-level nodes in order.
    pub fn roots(&self) -> impl Iterator<Item = NodeId> + '_ {
        std::iter::successors(self.first_root, move |id| self.nodes[id.get()].next_sibling)
    }

    fn node(&self, id: NodeId) -> &SceneNode<K> {
        &self.nodes[id.get()]
    }
}

impl<K: Clone + PartialEq + Debug> SceneTree<K> {
    /// Copies the shape, names and kinds of another scene graph into an arena.
    ///
    /// Sibling order is preserved. The copy does not follow later changes to
    /// the source graph.
    pub fn from_graph<G, F>(graph: &G, mut map_kind: F) -> Self
    where
        G: SceneGraph,
        F: FnMut(G::Kind) -> K,
    {
        let mut tree = Self::new();
        let Some(first) = graph.first_root() else {
            return tree;
        };

        let mut mapped: FnvHashMap<G::Node, NodeId> = FnvHashMap::default();
        let walker = TreeWalker::new(graph, first)
            .with_children_only(false)
            .with_base_depth(0);
        for (node, _depth) in walker {
            let parent = graph.parent(node).and_then(|parent| mapped.get(&parent).copied());
            let kind = map_kind(graph.kind(node));
            let name = graph.name(node).into_owned();
            let id = match parent {
                Some(parent) => tree.push_child(parent, name, kind),
                None => tree.insert_root(name, kind),
            };
            mapped.insert(node, id);
        }
        log::debug!("copied {} nodes into scene arena", tree.len());
        tree
    }
}

/// # Panics
///
/// Every method panics when handed a [`NodeId`] that was not produced by this
/// tree.
impl<K: Clone + PartialEq + Debug> SceneGraph for SceneTree<K> {
    type Node = NodeId;
    type Kind = K;

    fn parent(&self, node: NodeId) -> Option<NodeId> {
        self.node(node).parent
    }

    fn first_child(&self, node: NodeId) -> Option<NodeId> {
        self.node(node).first_child
    }

    fn next_sibling(&self, node: NodeId) -> Option<NodeId> {
        self.node(node).next_sibling
    }

    fn name(&self, node: NodeId) -> Cow<'_, str> {
        Cow::Borrowed(self.node(node).name.as_str())
    }

    fn kind(&self, node: NodeId) -> K {
        self.node(node).kind.clone()
    }

    fn first_root(&self) -> Option<NodeId> {
        self.first_root
    }
}

#[cfg(test)]
pub(crate) mod fixtures {
    use std::collections::HashMap;

    use super::{NodeId, SceneTree};

    pub(crate) type Scene = SceneTree<&'static str>;

    /// Builds the object-manager scene used across the tests:
    ///
    /// ```text
    /// Group1
    ///     Group1A
    ///         Cube
    ///         Würfel
    ///         Group1AA
    ///             Cube2
    ///             Wuerfel2
    ///     Group1B
    ///         Sweep-NURBS
    ///             Kreis
    ///             Heart
    /// Group2
    ///     Röhre
    ///     Zylinder
    ///     Zylinder2
    ///     Group3
    ///         Group3A
    ///             Group3AA
    ///             Group3AB
    ///                 Kugel
    ///                 Platonischer Körper
    /// Group4
    ///     Group4A
    ///         Group4AA
    ///         Group4AB
    ///             Kugel2
    ///             Platonischer Körper2
    /// ```
    pub(crate) fn object_manager_scene() -> (Scene, HashMap<&'static str, NodeId>) {
        let layout: &[(&str, Option<&str>, &str)] = &[
            ("Group1", None, "null"),
            ("Group1A", Some("Group1"), "null"),
            ("Cube", Some("Group1A"), "cube"),
            ("Würfel", Some("Group1A"), "cube"),
            ("Group1AA", Some("Group1A"), "null"),
            ("Cube2", Some("Group1AA"), "cube"),
            ("Wuerfel2", Some("Group1AA"), "cube"),
            ("Group1B", Some("Group1"), "null"),
            ("Sweep-NURBS", Some("Group1B"), "sweep"),
            ("Kreis", Some("Sweep-NURBS"), "spline"),
            ("Heart", Some("Sweep-NURBS"), "spline"),
            ("Group2", None, "null"),
            ("Röhre", Some("Group2"), "tube"),
            ("Zylinder", Some("Group2"), "cylinder"),
            ("Zylinder2", Some("Group2"), "cylinder"),
            ("Group3", Some("Group2"), "null"),
            ("Group3A", Some("Group3"), "null"),
            ("Group3AA", Some("Group3A"), "null"),
            ("Group3AB", Some("Group3A"), "null"),
            ("Kugel", Some("Group3AB"), "sphere"),
            ("Platonischer Körper", Some("Group3AB"), "platonic"),
            ("Group4", None, "null"),
            ("Group4A", Some("Group4"), "null"),
            ("Group4AA", Some("Group4A"), "null"),
            ("Group4AB", Some("Group4A"), "null"),
            ("Kugel2", Some("Group4AB"), "sphere"),
            ("Platonischer Körper2", Some("Group4AB"), "platonic"),
        ];
        build(layout)
    }

    /// The small scene from the walker examples:
    /// `Group1{Group1A{Cube, Group1AA{Cube2}}, Group1B}`.
    pub(crate) fn small_scene() -> (Scene, HashMap<&'static str, NodeId>) {
        let layout: &[(&str, Option<&str>, &str)] = &[
            ("Group1", None, "null"),
            ("Group1A", Some("Group1"), "null"),
            ("Cube", Some("Group1A"), "cube"),
            ("Group1AA", Some("Group1A"), "null"),
            ("Cube2", Some("Group1AA"), "cube"),
            ("Group1B", Some("Group1"), "null"),
        ];
        build(layout)
    }

    pub(crate) fn build(
        layout: &[(&'static str, Option<&'static str>, &'static str)],
    ) -> (Scene, HashMap<&'static str, NodeId>) {
        let mut scene = SceneTree::new();
        let mut ids = HashMap::new();
        for &(name, parent, kind) in layout {
            let parent = parent.map(|parent| ids[parent]);
            let id = scene.insert(parent, name, kind).unwrap();
            ids.insert(name, id);
        }
        (scene, ids)
    }
}
