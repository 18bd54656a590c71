//! Indented printout and one-line rendering of an index.

use std::fmt;
use std::io::Write;

use crate::error::Result;
use crate::graph::SceneGraph;
use crate::types::{NodeFilter, PrintSummary};
use crate::walk::TreeWalker;

use super::PathIndex;

/// Options for [`PathIndex::pretty_print_with`].
pub struct PrintOptions<'f, G: SceneGraph> {
    stop: Option<G::Node>,
    filter: NodeFilter<'f, G>,
    indent_width: Option<usize>,
}

impl<'f, G: SceneGraph> PrintOptions<'f, G> {
    pub fn new() -> Self {
        Self {
            stop: None,
            filter: NodeFilter::All,
            indent_width: None,
        }
    }

    /// Ends the printout before this node.
    pub fn with_stop(mut self, node: G::Node) -> Self {
        self.stop = Some(node);
        self
    }

    pub fn with_kind(mut self, kind: G::Kind) -> Self {
        self.filter = NodeFilter::Kind(kind);
        self
    }

    pub fn with_filter(mut self, filter: NodeFilter<'f, G>) -> Self {
        self.filter = filter;
        self
    }

    /// Overrides the index config's indent width.
    pub fn with_indent_width(mut self, width: usize) -> Self {
        self.indent_width = Some(width);
        self
    }
}

impl<G: SceneGraph> Default for PrintOptions<'_, G> {
    fn default() -> Self {
        Self::new()
    }
}

impl<N: Copy + Eq> PathIndex<N> {
    /// Writes the indexed hierarchy to `sink`, one name per line, followed by
    /// a summary line.
    pub fn pretty_print<G, W>(&self, graph: &G, sink: &mut W) -> Result<PrintSummary>
    where
        G: SceneGraph<Node = N>,
        W: Write + ?Sized,
    {
        self.pretty_print_with(graph, sink, &PrintOptions::new())
    }

    /// Writes the indexed hierarchy to `sink` with explicit options.
    ///
    /// A children-only index prints its root as an unindented header and each
    /// descendant indented by its depth below the root. A whole-scene index
    /// prints every node from the first top-level node at its absolute depth.
    /// Nodes rejected by the filter are counted in the summary but not
    /// written. The header line is not counted.
    ///
    /// The walk reads the graph as it is now, not as it was at build time.
    pub fn pretty_print_with<G, W>(
        &self,
        graph: &G,
        sink: &mut W,
        options: &PrintOptions<'_, G>,
    ) -> Result<PrintSummary>
    where
        G: SceneGraph<Node = N>,
        W: Write + ?Sized,
    {
        let width = options.indent_width.unwrap_or(self.config.indent_width);
        let mut summary = PrintSummary::default();

        if let Some(root) = self.root {
            let mut walker = TreeWalker::new(graph, root).with_children_only(self.children_only);
            if self.children_only {
                writeln!(sink, "{}", graph.name(root))?;
                walker = walker.with_base_depth(0);
            }
            if let Some(stop) = options.stop {
                walker = walker.with_stop(stop);
            }

            for (node, depth) in walker {
                if !options.filter.matches(graph, node) {
                    summary.filtered += 1;
                    continue;
                }
                writeln!(sink, "{:indent$}{}", "", graph.name(node), indent = depth * width)?;
                summary.handled += 1;
            }
        }

        writeln!(sink, "{summary}")?;
        Ok(summary)
    }

    /// Renders the index as `{"key": ["name", ...], ...}` in key order.
    pub fn display<'a, G>(&'a self, graph: &'a G) -> IndexDisplay<'a, G>
    where
        G: SceneGraph<Node = N>,
    {
        IndexDisplay { index: self, graph }
    }
}

/// [`fmt::Display`] adapter returned by [`PathIndex::display`].
pub struct IndexDisplay<'a, G: SceneGraph> {
    index: &'a PathIndex<G::Node>,
    graph: &'a G,
}

impl<G: SceneGraph> fmt::Display for IndexDisplay<'_, G> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("{")?;
        for (position, (key, nodes)) in self.index.entries.iter().enumerate() {
            if position > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{key:?}: [")?;
            for (item, &node) in nodes.iter().enumerate() {
                if item > 0 {
                    f.write_str(", ")?;
                }
                write!(f, "{:?}", self.graph.name(node))?;
            }
            f.write_str("]")?;
        }
        f.write_str("}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::arena::fixtures::{small_scene, Scene};
    use crate::config::IndexConfig;

    fn printout(
        scene: &Scene,
        index: &PathIndex<crate::arena::NodeId>,
        options: &PrintOptions<'_, Scene>,
    ) -> (String, PrintSummary) {
        let mut out = Vec::new();
        let summary = index.pretty_print_with(scene, &mut out, options).unwrap();
        (String::from_utf8(out).unwrap(), summary)
    }

    #[test]
    fn children_only_printout() {
        let (scene, ids) = small_scene();
        let index = PathIndex::build(&scene, Some(ids["Group1"]), None);
        let mut out = Vec::new();
        let summary = index.pretty_print(&scene, &mut out).unwrap();
        assert_eq!(
            String::from_utf8(out).unwrap(),
            "Group1\n    Group1A\n        Cube\n        Group1AA\n            Cube2\n    Group1B\nprocessed 5 objects\n"
        );
        assert_eq!(
            summary,
            PrintSummary {
                handled: 5,
                filtered: 0
            }
        );
    }

    #[test]
    fn whole_scene_printout_counts_top_level() {
        let (scene, _) = small_scene();
        let index = PathIndex::build(&scene, None, None);
        let (text, summary) = printout(&scene, &index, &PrintOptions::new().with_indent_width(2));
        assert_eq!(
            text,
            "Group1\n  Group1A\n    Cube\n    Group1AA\n      Cube2\n  Group1B\nprocessed 6 objects\n"
        );
        assert_eq!(summary.handled, 6);
    }

    #[test]
    fn filtered_nodes_are_counted() {
        let (scene, ids) = small_scene();
        let index = PathIndex::build(&scene, Some(ids["Group1"]), None);
        let (text, summary) = printout(&scene, &index, &PrintOptions::new().with_kind("cube"));
        assert_eq!(
            text,
            "Group1\n        Cube\n            Cube2\nprocessed 2 objects (3 filtered)\n"
        );
        assert_eq!(summary.filtered, 3);
    }

    #[test]
    fn stop_node_ends_printout() {
        let (scene, ids) = small_scene();
        let index = PathIndex::build(&scene, Some(ids["Group1"]), None);
        let (text, _) = printout(&scene, &index, &PrintOptions::new().with_stop(ids["Group1AA"]));
        assert_eq!(text, "Group1\n    Group1A\n        Cube\nprocessed 2 objects\n");
    }

    #[test]
    fn indent_width_from_config() {
        let (scene, ids) = small_scene();
        let index = PathIndex::builder(&scene)
            .with_root(ids["Group1A"])
            .with_config(IndexConfig {
                indent_width: 1,
                ..IndexConfig::default()
            })
            .unwrap()
            .build();
        let (text, _) = printout(&scene, &index, &PrintOptions::new());
        assert_eq!(text, "Group1A\n Cube\n Group1AA\n  Cube2\nprocessed 3 objects\n");
    }

    #[test]
    fn empty_scene_prints_summary_only() {
        let scene = Scene::new();
        let index = PathIndex::build(&scene, None, None);
        let (text, summary) = printout(&scene, &index, &PrintOptions::new());
        assert_eq!(text, "processed 0 objects\n");
        assert_eq!(summary, PrintSummary::default());
    }

    #[test]
    fn display_lists_names_per_key() {
        let (scene, ids) = small_scene();
        let index = PathIndex::build(&scene, Some(ids["Group1"]), None);
        assert_eq!(
            index.display(&scene).to_string(),
            r#"{"Group1A": ["Group1A", "Cube", "Group1AA"], "Group1A/Group1AA": ["Cube2"], "Group1B": ["Group1B"]}"#
        );

        let empty = PathIndex::build(&scene, Some(ids["Cube"]), None);
        assert_eq!(empty.display(&scene).to_string(), "{}");
    }
}
