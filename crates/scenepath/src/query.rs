//! Path query compilation.
//!
//! This module turns a query string into something that can be tested
//! against index keys:
//! - Normalization (whitespace, trailing separators, `..` segments)
//! - Syntax selection (glob by default, regular expression after `!`)
//! - Compilation to an anchored or unanchored `regex::Regex`

mod path;
mod pattern;

// Re-export public types
pub use path::{normalize_pattern, resolve_parent_segments, NormalizedPattern, PatternSyntax};
pub use pattern::{glob_to_regex, PathPattern};
