//! Lexical reference extraction.
//!
//! References are found with a regular expression rather than a parser:
//! the pattern only has to locate the path literal of each import statement,
//! exposed through a named capture group `path`.

use std::sync::OnceLock;

use regex::Regex;
use rl_core::config::DEFAULT_IMPORT_PATTERN;
use rl_core::{Reference, RewriteConfig};

use crate::error::RewriteError;

/// Name of the capture group holding the import literal.
pub const PATH_GROUP: &str = "path";

/// Locates import-path literals in source text.
pub trait ReferenceExtractor: Send + Sync {
    /// Returns every reference in `text`, in text order.
    fn extract(&self, text: &str) -> Vec<Reference>;

    /// Like [`extract`](Self::extract), for raw file content.
    ///
    /// # Errors
    ///
    /// Returns [`RewriteError::InvalidInput`] if `bytes` is not UTF-8.
    fn extract_bytes(&self, bytes: &[u8]) -> Result<Vec<Reference>, RewriteError> {
        let text = std::str::from_utf8(bytes).map_err(|e| {
            RewriteError::invalid_input(format!("content is not valid UTF-8: {e}"))
        })?;
        Ok(self.extract(text))
    }
}

/// Regex-backed [`ReferenceExtractor`].
///
/// # Examples
///
/// ```
/// use rl_rewrite::{PatternExtractor, ReferenceExtractor};
///
/// let extractor = PatternExtractor::standard()?;
/// let refs = extractor.extract(r#"import { x } from "./util";"#);
///
/// assert_eq!(refs.len(), 1);
/// assert_eq!(refs[0].literal, "./util");
/// assert_eq!((refs[0].start, refs[0].end), (19, 25));
/// # Ok::<(), rl_rewrite::RewriteError>(())
/// ```
#[derive(Debug, Clone)]
pub struct PatternExtractor {
    regex: Regex,
}

/// Global cache for the compiled default pattern.
static STANDARD: OnceLock<PatternExtractor> = OnceLock::new();

impl PatternExtractor {
    /// Compiles `pattern`, which must define a named group `path`.
    ///
    /// # Errors
    ///
    /// Returns [`RewriteError::Pattern`] if the pattern does not compile and
    /// [`RewriteError::InvalidInput`] if it has no `path` group.
    pub fn new(pattern: &str) -> Result<Self, RewriteError> {
        let regex = Regex::new(pattern)?;
        if !regex.capture_names().flatten().any(|name| name == PATH_GROUP) {
            return Err(RewriteError::invalid_input(format!(
                "import pattern has no named group '{PATH_GROUP}'"
            )));
        }
        Ok(Self { regex })
    }

    /// Compiles the pattern configured in `config`.
    pub fn from_config(config: &RewriteConfig) -> Result<Self, RewriteError> {
        Self::new(&config.import_pattern)
    }

    /// Returns the extractor for the default pattern.
    ///
    /// The pattern is compiled once and cached for all subsequent calls.
    pub fn standard() -> Result<&'static Self, RewriteError> {
        if let Some(extractor) = STANDARD.get() {
            return Ok(extractor);
        }

        let extractor = Self::new(DEFAULT_IMPORT_PATTERN)?;
        Ok(STANDARD.get_or_init(|| extractor))
    }

    /// The pattern source.
    #[must_use]
    pub fn as_str(&self) -> &str {
        self.regex.as_str()
    }
}

impl ReferenceExtractor for PatternExtractor {
    fn extract(&self, text: &str) -> Vec<Reference> {
        self.regex
            .captures_iter(text)
            .filter_map(|caps| caps.name(PATH_GROUP))
            .map(|m| Reference::new(m.as_str(), m.start()))
            .collect()
    }
}

impl<E: ReferenceExtractor + ?Sized> ReferenceExtractor for &E {
    fn extract(&self, text: &str) -> Vec<Reference> {
        (**self).extract(text)
    }
}
