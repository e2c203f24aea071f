//! Application error types

use thiserror::Error;

/// Errors raised while resolving or substituting variables.
///
/// Every error is fatal to the run: the first one aborts the remaining work
/// and no document is rewritten.
#[derive(Debug, Error)]
pub enum VarsError {
    /// The replacement configuration is structurally invalid.
    #[error("{0}")]
    ConfigInvalid(String),

    /// A source filter matched no document.
    #[error("no source found matching {name}")]
    SourceNotFound {
        /// Replacement name.
        name: String,
    },

    /// A source filter matched more than one document.
    #[error("found more than one source matching {name}")]
    MultipleSources {
        /// Replacement name.
        name: String,
    },

    /// A field path could not be resolved to a scalar.
    #[error("field path {path} of {name} could not be resolved: {source}")]
    PathNotFound {
        /// Replacement name.
        name: String,
        /// The field path as configured.
        path: String,
        /// Why resolution stopped.
        #[source]
        source: PathError,
    },

    /// A template was rendered with the wrong number of values.
    #[error("template of {name} could not be rendered: {source}")]
    TemplateArity {
        /// Replacement name.
        name: String,
        /// Placeholder/value count mismatch.
        #[source]
        source: TemplateError,
    },

    /// The token matcher could not be built.
    #[error("failed to build substitution pattern: {0}")]
    Pattern(#[from] regex::Error),
}

impl VarsError {
    /// Creates a configuration error.
    pub fn config_invalid(message: impl Into<String>) -> Self {
        Self::ConfigInvalid(message.into())
    }
}

/// Reasons a field path fails to resolve.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum PathError {
    /// The path has no segments.
    #[error("field path is empty")]
    Empty,

    /// A segment could not be parsed.
    #[error("malformed segment `{0}`")]
    Malformed(String),

    /// No child matches a segment.
    #[error("nothing matches `{segment}`")]
    NotFound {
        /// The segment that failed.
        segment: String,
    },

    /// A segment was applied to a node of the wrong type.
    #[error("`{segment}` cannot be applied to a {found}")]
    TypeMismatch {
        /// The segment that failed.
        segment: String,
        /// Type of the node it was applied to.
        found: &'static str,
    },

    /// The path ends on a mapping or sequence.
    #[error("path resolves to a {0}, not a scalar")]
    NotScalar(&'static str),
}

/// A template was given a different number of values than it has placeholders.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
#[error("template expects {expected} values, got {actual}")]
pub struct TemplateError {
    /// Number of placeholders in the template.
    pub expected: usize,
    /// Number of values supplied.
    pub actual: usize,
}

/// Result type alias for variable resolution.
pub type VarsResult<T> = Result<T, VarsError>;
