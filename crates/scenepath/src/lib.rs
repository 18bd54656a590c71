//! Path-indexed lookup over hierarchical scene graphs.
//!
//! This crate provides:
//! - A depth-first walker over any tree exposed through [`SceneGraph`]
//! - A [`PathIndex`] that files nodes under their ancestor path
//! - Glob and regular-expression queries over those paths
//! - Name lookup helpers and an owned arena scene ([`SceneTree`])

pub mod arena;
pub mod config;
pub mod error;
pub mod find;
pub mod graph;
pub mod index;
pub mod query;
pub mod types;
pub mod walk;

// Re-export main types
pub use arena::{NodeId, SceneNode, SceneTree};
pub use config::IndexConfig;
pub use error::{Result, ScenePathError};
pub use find::{find_node, find_node_by, find_nodes, fuzzy_compare, FuzzyLimit};
pub use graph::{ancestors, children, depth_of, SceneGraph};
pub use index::{IndexBuilder, IndexDisplay, PathIndex, PrintOptions};
pub use query::PathPattern;
pub use types::{NodeFilter, PrintSummary};
pub use walk::{next_node, walk, StopSet, TreeWalker};
