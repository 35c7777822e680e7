//! Configuration structures for the relink tool.
//!
//! This module provides configuration types for every pipeline stage:
//!
//! - [`ScanConfig`] - Snapshot settings (ignore list, uri base, text allowlist)
//! - [`MatchConfig`] - Correspondence strategy selection
//! - [`RewriteConfig`] - Import pattern and resolvable source extensions
//! - [`Config`] - Root configuration combining all settings
//!
//! Language-specific lists (text extensions, resolvable extensions, the import
//! pattern) live here instead of in process-wide constants so that different
//! import syntaxes can be configured side by side.

use camino::{Utf8Path, Utf8PathBuf};
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Default lexical pattern for ES module imports.
///
/// Recognises the `import` keyword, an optional `type` modifier, optional
/// default/namespace bindings, an optional brace-delimited binding list (which
/// may span lines), `from`, and a quoted path literal. Side-effect imports
/// (`import "./polyfill"`) match as well. The literal is captured by the named
/// group `path`.
pub const DEFAULT_IMPORT_PATTERN: &str = r#"\bimport\s+(?:type\s+)?(?:[\w$*\s,]*(?:\{[^}]*\})?[\w$*\s,]*?\s*from\s*)?["'](?P<path>[^"'\r\n]+)["']"#;

/// Configuration for the snapshot builder.
///
/// # Examples
///
/// ```
/// use rl_core::ScanConfig;
///
/// let config = ScanConfig::default();
/// assert!(config.ignore.contains(&"node_modules".to_owned()));
/// assert!(config.is_text_extension("ts"));
/// assert!(!config.is_text_extension("png"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScanConfig {
    /// Entry names skipped at every depth (exact name match).
    pub ignore: Vec<String>,

    /// Base directory uris are computed against.
    ///
    /// `None` means the scan root itself.
    pub root_dir: Option<Utf8PathBuf>,

    /// Extensions (without the leading dot) whose text is captured.
    pub text_extensions: Vec<String>,

    /// Scan sibling subdirectories on the rayon pool.
    pub parallel: bool,
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            ignore: vec!["node_modules".to_owned(), ".git".to_owned()],
            root_dir: None,
            text_extensions: [
                "js", "jsx", "ts", "tsx", "mjs", "cjs", "json", "css", "scss", "less", "html",
                "vue", "md", "txt",
            ]
            .into_iter()
            .map(str::to_owned)
            .collect(),
            parallel: false,
        }
    }
}

impl ScanConfig {
    /// Returns `true` if `name` is on the ignore list.
    #[inline]
    #[must_use]
    pub fn is_ignored(&self, name: &str) -> bool {
        self.ignore.iter().any(|i| i == name)
    }

    /// Returns `true` if files with this extension have their text captured.
    #[inline]
    #[must_use]
    pub fn is_text_extension(&self, extension: &str) -> bool {
        self.text_extensions.iter().any(|e| e == extension)
    }
}

/// Which identity the correspondence matcher uses.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchStrategy {
    /// Match files by content digest. Detects moves and renames.
    #[default]
    Hash,
    /// Match files by filename (name minus extension). Detects content edits.
    Filename,
    /// Hash matches first, then filename matches for unclaimed files.
    Both,
}

/// Configuration for the correspondence matcher.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(default)]
pub struct MatchConfig {
    /// The identity strategy.
    pub strategy: MatchStrategy,
}

/// Configuration for reference extraction and path rewriting.
///
/// # Examples
///
/// ```
/// use rl_core::RewriteConfig;
///
/// let config = RewriteConfig::default();
/// assert_eq!(config.excluded_marker, "node_modules");
/// assert!(config.resolvable_extensions.contains(&".js".to_owned()));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RewriteConfig {
    /// Regex locating import literals. Must define a named group `path`.
    pub import_pattern: String,

    /// Source extensions (with the leading dot) that may be omitted in imports.
    pub resolvable_extensions: Vec<String>,

    /// Literals containing this marker are discarded before classification.
    pub excluded_marker: String,
}

impl Default for RewriteConfig {
    fn default() -> Self {
        Self {
            import_pattern: DEFAULT_IMPORT_PATTERN.to_owned(),
            resolvable_extensions: [".js", ".jsx", ".ts", ".tsx", ".mjs", ".cjs"]
                .into_iter()
                .map(str::to_owned)
                .collect(),
            excluded_marker: "node_modules".to_owned(),
        }
    }
}

/// Root configuration for the relink tool.
///
/// # Examples
///
/// ```
/// use rl_core::{Config, MatchStrategy};
///
/// let config: Config = serde_json::from_str(r#"{"matching": {"strategy": "both"}}"#)?;
/// assert_eq!(config.matching.strategy, MatchStrategy::Both);
/// assert!(config.validate().is_ok());
/// # Ok::<(), serde_json::Error>(())
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Snapshot configuration.
    pub scan: ScanConfig,

    /// Matcher configuration.
    pub matching: MatchConfig,

    /// Rewriter configuration.
    pub rewrite: RewriteConfig,
}

impl Config {
    /// Loads and validates a JSON configuration file.
    ///
    /// Missing fields fall back to their defaults.
    pub fn from_file(path: &Utf8Path) -> Result<Self, ConfigError> {
        let raw = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_owned(),
            source,
        })?;
        let config: Self = serde_json::from_str(&raw)?;
        config.validate()?;
        Ok(config)
    }

    /// Checks option values that serde cannot reject on its own.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.rewrite.import_pattern.trim().is_empty() {
            return Err(ConfigError::invalid_option(
                "rewrite.import_pattern",
                "must not be empty",
            ));
        }
        if let Some(ext) = self
            .rewrite
            .resolvable_extensions
            .iter()
            .find(|e| !e.starts_with('.') || e.len() < 2)
        {
            return Err(ConfigError::invalid_option(
                "rewrite.resolvable_extensions",
                format!("'{ext}' must start with '.' and name an extension"),
            ));
        }
        if let Some(ext) = self.scan.text_extensions.iter().find(|e| e.starts_with('.')) {
            return Err(ConfigError::invalid_option(
                "scan.text_extensions",
                format!("'{ext}' must be given without the leading '.'"),
            ));
        }
        Ok(())
    }
}
