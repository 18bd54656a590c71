//! Index configuration.
//!
//! Settings that shape how paths are joined, matched and printed. Every field
//! has a default so a partial JSON document is enough to override one value.

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::{Result, ScenePathError};

pub const DEFAULT_SEPARATOR: char = '/';
pub const DEFAULT_INDENT_WIDTH: usize = 4;

/// Configuration for building, querying and printing a [`PathIndex`](crate::PathIndex).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct IndexConfig {
    /// Character joining ancestor names into a path key.
    pub separator: char,
    /// Spaces per depth level in `pretty_print` output.
    pub indent_width: usize,
    /// Whether query patterns match names case sensitively.
    pub case_sensitive: bool,
    /// Default anchoring for `PathIndex::query`.
    pub strict: bool,
}

impl Default for IndexConfig {
    fn default() -> Self {
        Self {
            separator: DEFAULT_SEPARATOR,
            indent_width: DEFAULT_INDENT_WIDTH,
            case_sensitive: true,
            strict: true,
        }
    }
}

impl IndexConfig {
    /// Parses a configuration from a JSON document.
    pub fn from_json_str(data: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(data)?;
        config.validate()?;
        Ok(config)
    }

    /// Reads a configuration file. A missing file yields the defaults.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            log::debug!("no index config at {}, using defaults", path.display());
            return Ok(Self::default());
        }
        let data = std::fs::read_to_string(path)?;
        Self::from_json_str(&data).map_err(|error| {
            ScenePathError::Config(format!(
                "failed to parse index config {}: {error}",
                path.display()
            ))
        })
    }

    /// Writes the configuration as pretty-printed JSON.
    pub fn save(&self, path: &Path) -> Result<()> {
        let data = serde_json::to_string_pretty(self)?;
        std::fs::write(path, data)?;
        Ok(())
    }

    /// Rejects settings that would make keys unqueryable.
    pub fn validate(&self) -> Result<()> {
        if matches!(self.separator, '*' | '?' | '!' | '.') || self.separator.is_whitespace() {
            return Err(ScenePathError::Config(format!(
                "separator {:?} is not allowed",
                self.separator
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_object_manager_paths() {
        let config = IndexConfig::default();
        assert_eq!(config.separator, '/');
        assert_eq!(config.indent_width, 4);
        assert!(config.case_sensitive);
        assert!(config.strict);
    }

    #[test]
    fn partial_json_keeps_defaults() {
        let config = IndexConfig::from_json_str(r#"{"indent_width": 2}"#).unwrap();
        assert_eq!(config.indent_width, 2);
        assert_eq!(config.separator, '/');
        assert!(config.strict);
    }

    #[test]
    fn rejects_wildcard_separator() {
        let err = IndexConfig::from_json_str(r#"{"separator": "*"}"#).unwrap_err();
        assert!(matches!(err, ScenePathError::Config(_)));
    }

    #[test]
    fn rejects_malformed_json() {
        let err = IndexConfig::from_json_str("{indent_width: }").unwrap_err();
        assert!(matches!(err, ScenePathError::Config(_)));
    }

    #[test]
    fn load_missing_file_uses_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = IndexConfig::load(&dir.path().join("absent.json")).unwrap();
        assert_eq!(config, IndexConfig::default());
    }

    #[test]
    fn save_then_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("index.json");
        let config = IndexConfig {
            separator: '|',
            indent_width: 2,
            case_sensitive: false,
            strict: false,
        };
        config.save(&path).unwrap();
        assert_eq!(IndexConfig::load(&path).unwrap(), config);
    }
}
