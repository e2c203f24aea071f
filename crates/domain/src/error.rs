//! Domain error types

use thiserror::Error;

/// Domain-level errors raised while building documents.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// A document root was not a mapping.
    #[error("document root must be a mapping, found a {0}")]
    DocumentNotMapping(&'static str),

    /// The text is not valid YAML.
    #[error("invalid YAML: {0}")]
    Yaml(String),

    /// A mapping repeats a key.
    #[error("duplicate mapping key `{0}`")]
    DuplicateKey(String),

    /// A mapping key is a mapping or sequence.
    #[error("mapping keys must be scalars, found a {0}")]
    ComplexKey(&'static str),

    /// An alias names an anchor that was never defined.
    #[error("alias refers to an unknown anchor")]
    UnknownAlias,

    /// Writing YAML failed.
    #[error("failed to write YAML: {0}")]
    Emit(String),
}

/// Result type alias for domain operations.
pub type DomainResult<T> = Result<T, DomainError>;
