//! Path pattern normalization.
//!
//! Turns a raw query string into the body that gets compiled: surrounding
//! whitespace and trailing separators are dropped, a leading `!` selects
//! verbatim regular-expression syntax, and `..` segments are folded into the
//! preceding segment.

use crate::error::{Result, ScenePathError};

/// How the pattern body is interpreted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PatternSyntax {
    /// `*` and `?` wildcards, everything else literal.
    Glob,
    /// A regular expression used as written.
    Regex,
}

/// A query pattern after normalization, ready to compile.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NormalizedPattern {
    pub body: String,
    pub syntax: PatternSyntax,
}

const PARENT_SEGMENT: &str = "..";
const REGEX_MARKER: char = '!';

/// Normalizes a raw query pattern.
///
/// Returns `Ok(None)` when nothing is left to match after normalization.
pub fn normalize_pattern(raw: &str, separator: char) -> Result<Option<NormalizedPattern>> {
    let trimmed = raw.trim();
    let (syntax, body) = match trimmed.strip_prefix(REGEX_MARKER) {
        Some(rest) => (PatternSyntax::Regex, rest),
        None => (PatternSyntax::Glob, trimmed),
    };

    let body = body.trim_end_matches(separator);
    let body = if has_parent_segment(body, separator) {
        resolve_parent_segments(body, separator)?
    } else {
        body.to_string()
    };

    if body.is_empty() {
        return Ok(None);
    }
    Ok(Some(NormalizedPattern { body, syntax }))
}

fn has_parent_segment(path: &str, separator: char) -> bool {
    path.split(separator).any(|segment| segment == PARENT_SEGMENT)
}

/// Removes each `..` segment together with the real segment before it.
///
/// `A/B/../C` becomes `A/C`. A `..` with nothing left to remove is an error.
pub fn resolve_parent_segments(path: &str, separator: char) -> Result<String> {
    let mut resolved: Vec<&str> = Vec::new();
    for segment in path.split(separator) {
        if segment == PARENT_SEGMENT {
            if resolved.pop().is_none() {
                return Err(ScenePathError::UnresolvableParent(path.to_string()));
            }
        } else {
            resolved.push(segment);
        }
    }

    let mut joined = String::with_capacity(path.len());
    for (position, segment) in resolved.iter().enumerate() {
        if position > 0 {
            joined.push(separator);
        }
        joined.push_str(segment);
    }
    Ok(joined)
}
