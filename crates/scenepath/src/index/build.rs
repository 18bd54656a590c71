//! Index construction from a single traversal.

use indexmap::IndexMap;

use crate::config::IndexConfig;
use crate::error::Result;
use crate::graph::{ancestors, SceneGraph};
use crate::types::NodeFilter;
use crate::walk::TreeWalker;

use super::PathIndex;

/// Options for building a [`PathIndex`].
///
/// Without a root the whole scene is indexed starting at the first top-level
/// node. With a root only its descendants are indexed unless
/// `with_children_only(false)` is set, in which case the walk includes the
/// root and carries on past it to the end of the scene.
pub struct IndexBuilder<'g, 'f, G: SceneGraph> {
    graph: &'g G,
    root: Option<G::Node>,
    children_only: Option<bool>,
    filter: NodeFilter<'f, G>,
    config: IndexConfig,
}

impl<'g, 'f, G: SceneGraph> IndexBuilder<'g, 'f, G> {
    pub fn new(graph: &'g G) -> Self {
        Self {
            graph,
            root: None,
            children_only: None,
            filter: NodeFilter::All,
            config: IndexConfig::default(),
        }
    }

    pub fn with_root(mut self, root: G::Node) -> Self {
        self.root = Some(root);
        self
    }

    pub fn with_children_only(mut self, children_only: bool) -> Self {
        self.children_only = Some(children_only);
        self
    }

    /// Only index nodes of this kind.
    pub fn with_kind(mut self, kind: G::Kind) -> Self {
        self.filter = NodeFilter::Kind(kind);
        self
    }

    /// Only index nodes accepted by `filter`.
    pub fn with_filter(mut self, filter: NodeFilter<'f, G>) -> Self {
        self.filter = filter;
        self
    }

    /// Replaces the default configuration after validating it.
    pub fn with_config(mut self, config: IndexConfig) -> Result<Self> {
        config.validate()?;
        self.config = config;
        Ok(self)
    }

    pub fn build(self) -> PathIndex<G::Node> {
        let children_only = self.children_only.unwrap_or(self.root.is_some());
        let Some(start) = self.root.or_else(|| self.graph.first_root()) else {
            log::debug!("scene is empty, nothing to index");
            return PathIndex {
                root: None,
                children_only,
                entries: IndexMap::new(),
                max_depth: None,
                node_count: 0,
                config: self.config,
            };
        };

        // In children-only mode the root's own name is left out of every key.
        let boundary = children_only.then_some(start);
        let separator = self.config.separator;

        let mut entries: IndexMap<String, Vec<G::Node>> = IndexMap::new();
        let mut max_depth: Option<usize> = None;
        let mut node_count = 0usize;
        let mut filtered = 0usize;

        let walker = TreeWalker::new(self.graph, start).with_children_only(children_only);
        for (node, depth) in walker {
            max_depth = max_depth.max(Some(depth));
            if !self.filter.matches(self.graph, node) {
                filtered += 1;
                continue;
            }
            let key = parent_path(self.graph, node, boundary, separator);
            entries.entry(key).or_default().push(node);
            node_count += 1;
        }

        log::debug!(
            "indexed {node_count} nodes under {} keys ({filtered} filtered, max depth {max_depth:?})",
            entries.len()
        );

        PathIndex {
            root: Some(start),
            children_only,
            entries,
            max_depth,
            node_count,
            config: self.config,
        }
    }
}

impl<N: Copy + Eq> PathIndex<N> {
    /// Starts an [`IndexBuilder`] over `graph`.
    pub fn builder<'g, 'f, G>(graph: &'g G) -> IndexBuilder<'g, 'f, G>
    where
        G: SceneGraph<Node = N>,
    {
        IndexBuilder::new(graph)
    }

    /// Indexes the descendants of `root`, or the whole scene when `root` is
    /// `None`, keeping only nodes of `kind` when one is given.
    pub fn build<G>(graph: &G, root: Option<N>, kind: Option<G::Kind>) -> Self
    where
        G: SceneGraph<Node = N>,
    {
        let mut builder = IndexBuilder::new(graph).with_filter(kind.into());
        if let Some(root) = root {
            builder = builder.with_root(root);
        }
        builder.build()
    }
}

/// Joins the names of a node's ancestors, outermost first, stopping below
/// `boundary`. A node without such ancestors is keyed by its own name.
fn parent_path<G: SceneGraph>(
    graph: &G,
    node: G::Node,
    boundary: Option<G::Node>,
    separator: char,
) -> String {
    let mut names: Vec<_> = ancestors(graph, node)
        .take_while(|ancestor| Some(*ancestor) != boundary)
        .map(|ancestor| graph.name(ancestor))
        .collect();
    if names.is_empty() {
        return graph.name(node).into_owned();
    }
    names.reverse();

    let mut key = String::new();
    for (position, name) in names.iter().enumerate() {
        if position > 0 {
            key.push(separator);
        }
        key.push_str(name);
    }
    key
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::arena::fixtures::{object_manager_scene, small_scene, Scene};

    #[test]
    fn parent_path_respects_boundary() {
        let (scene, ids) = object_manager_scene();
        let kugel = ids["Kugel"];
        assert_eq!(
            parent_path(&scene, kugel, None, '/'),
            "Group2/Group3/Group3A/Group3AB"
        );
        assert_eq!(
            parent_path(&scene, kugel, Some(ids["Group3"]), '/'),
            "Group3A/Group3AB"
        );
        assert_eq!(parent_path(&scene, kugel, Some(ids["Group3AB"]), '/'), "Kugel");
        assert_eq!(parent_path(&scene, ids["Group2"], None, '/'), "Group2");
    }

    #[test]
    fn custom_separator_in_keys() {
        let (scene, ids) = small_scene();
        let config = IndexConfig {
            separator: '|',
            ..IndexConfig::default()
        };
        let index = PathIndex::builder(&scene).with_config(config).unwrap().build();
        assert_eq!(index.get("Group1|Group1A|Group1AA"), Some(&[ids["Cube2"]][..]));
        assert_eq!(index.query("Group1|Group1A|*").unwrap(), vec![ids["Cube2"]]);
    }

    #[test]
    fn invalid_config_is_rejected() {
        let (scene, _) = small_scene();
        let config = IndexConfig {
            separator: '.',
            ..IndexConfig::default()
        };
        let err = PathIndex::builder(&scene).with_config(config).err().unwrap();
        assert!(matches!(err, crate::error::ScenePathError::Config(_)));
    }

    #[test]
    fn root_included_when_not_children_only() {
        let (scene, ids) = object_manager_scene();
        let index = PathIndex::builder(&scene)
            .with_root(ids["Group3"])
            .with_children_only(false)
            .build();
        assert!(!index.is_children_only());
        // The walk starts at Group3 and runs on through Group4.
        assert_eq!(index.get("Group2"), Some(&[ids["Group3"]][..]));
        assert_eq!(
            index.get("Group4/Group4A/Group4AB"),
            Some(&[ids["Kugel2"], ids["Platonischer Körper2"]][..])
        );
        assert!(index.get("Group1").is_none());
    }

    #[test]
    fn predicate_filter() {
        let (scene, ids) = object_manager_scene();
        let index = PathIndex::builder(&scene)
            .with_filter(NodeFilter::predicate(|scene: &Scene, node| {
                scene.name(node).contains("Körper")
            }))
            .build();
        assert_eq!(
            index.nodes().collect::<Vec<_>>(),
            vec![ids["Platonischer Körper"], ids["Platonischer Körper2"]]
        );
    }

    #[test]
    fn kind_builder_option() {
        let (scene, ids) = object_manager_scene();
        let index = PathIndex::builder(&scene)
            .with_root(ids["Group2"])
            .with_kind("cylinder")
            .build();
        assert_eq!(index.keys().collect::<Vec<_>>(), vec!["Zylinder", "Zylinder2"]);
    }
}
