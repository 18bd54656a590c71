//! Compiled path patterns.

use regex::{Regex, RegexBuilder};

use crate::config::IndexConfig;
use crate::error::Result;

use super::path::{normalize_pattern, PatternSyntax};

/// A query pattern compiled to a regular expression over index keys.
#[derive(Debug, Clone)]
pub struct PathPattern {
    regex: Regex,
    source: String,
    strict: bool,
}

impl PathPattern {
    /// Compiles `raw` with the default configuration.
    ///
    /// See [`PathPattern::compile_with`].
    pub fn compile(raw: &str, strict: bool) -> Result<Option<Self>> {
        Self::compile_with(raw, strict, &IndexConfig::default())
    }

    /// Compiles a raw query pattern.
    ///
    /// The compilation pipeline:
    /// 1. Normalize (trim, strip trailing separators, resolve `..`)
    /// 2. Translate glob wildcards, or take the body verbatim after `!`
    /// 3. Anchor both ends when `strict`
    ///
    /// Returns `Ok(None)` when the pattern normalizes to nothing.
    pub fn compile_with(raw: &str, strict: bool, config: &IndexConfig) -> Result<Option<Self>> {
        let Some(normalized) = normalize_pattern(raw, config.separator)? else {
            return Ok(None);
        };

        let body = match normalized.syntax {
            PatternSyntax::Glob => glob_to_regex(&normalized.body),
            PatternSyntax::Regex => normalized.body,
        };
        let pattern = if strict {
            format!("^(?:{body})$")
        } else {
            body
        };

        let regex = RegexBuilder::new(&pattern)
            .case_insensitive(!config.case_sensitive)
            .build()
            .inspect_err(|error| log::warn!("rejected path pattern {raw:?}: {error}"))?;
        log::debug!("path = {raw:?}, pat = {pattern:?}");

        Ok(Some(Self {
            regex,
            source: raw.to_string(),
            strict,
        }))
    }

    /// Tests a key against the pattern.
    #[inline]
    pub fn is_match(&self, key: &str) -> bool {
        self.regex.is_match(key)
    }

    /// The compiled regular expression.
    pub fn as_str(&self) -> &str {
        self.regex.as_str()
    }

    /// The pattern as it was given.
    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn is_strict(&self) -> bool {
        self.strict
    }
}

/// Translates a glob into regular-expression syntax.
///
/// `?` matches one character, `*` matches any run (non-greedy), and every
/// other character matches itself.
pub fn glob_to_regex(glob: &str) -> String {
    let mut pattern = String::with_capacity(glob.len() * 2);
    let mut buf = [0u8; 4];
    for ch in glob.chars() {
        match ch {
            '?' => pattern.push('.'),
            '*' => pattern.push_str(".*?"),
            _ => pattern.push_str(&regex::escape(ch.encode_utf8(&mut buf))),
        }
    }
    pattern
}
