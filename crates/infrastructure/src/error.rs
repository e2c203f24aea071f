//! Infrastructure error types

use std::path::PathBuf;

use kvars_application::VarsError;

use crate::serialization::SerializationError;

/// Errors raised while running the function over real input.
#[derive(Debug, thiserror::Error)]
pub enum InfrastructureError {
    /// IO error while reading input or writing output.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// A file could not be read.
    #[error("failed to read {}: {source}", path.display())]
    ReadFile {
        /// The file that was requested.
        path: PathBuf,
        /// The underlying IO error.
        #[source]
        source: std::io::Error,
    },

    /// Serialization/deserialization error.
    #[error("Serialization error: {0}")]
    Serialization(#[from] SerializationError),

    /// Neither a config file nor a `functionConfig` was supplied.
    #[error("no function config: pass a config file or use a ResourceList with functionConfig")]
    MissingFunctionConfig,

    /// Resolution or substitution failed.
    #[error(transparent)]
    Vars(#[from] VarsError),
}

/// Result alias for infrastructure operations.
pub type InfraResult<T> = Result<T, InfrastructureError>;
