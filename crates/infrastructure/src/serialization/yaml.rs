//! YAML stream helpers.

use kvars_domain::document::yaml;
use kvars_domain::{Document, DomainError, Node};
use serde::de::DeserializeOwned;

/// Error type for serialization operations.
#[derive(Debug, thiserror::Error)]
pub enum SerializationError {
    /// A document tree could not be read or written.
    #[error(transparent)]
    Yaml(DomainError),

    /// Converting a tree to a typed value failed.
    #[error("YAML serialization failed: {0}")]
    Serialize(serde_yaml::Error),

    /// YAML deserialization failed.
    #[error("YAML deserialization failed: {0}")]
    Deserialize(serde_yaml::Error),

    /// A document in the stream is not a resource.
    #[error("document {index} is invalid: {source}")]
    InvalidDocument {
        /// Position of the document in the stream.
        index: usize,
        /// Why it was rejected.
        #[source]
        source: DomainError,
    },

    /// A `ResourceList` envelope is missing a field or has the wrong shape.
    #[error("invalid ResourceList: {0}")]
    InvalidResourceList(String),
}

/// Parses a multi-document YAML stream.
///
/// Empty documents (including a stray leading or trailing `---`) are skipped.
/// Scalars keep their source text.
///
/// # Errors
///
/// Returns an error if the YAML is invalid, repeats a mapping key, or a
/// document root is not a mapping.
pub fn from_yaml_stream(input: &str) -> Result<Vec<Document>, SerializationError> {
    let mut documents = Vec::new();
    for (index, node) in yaml::load_all(input)
        .map_err(SerializationError::Yaml)?
        .into_iter()
        .enumerate()
    {
        if node.is_null() {
            continue;
        }
        let document =
            Document::new(node).map_err(|source| SerializationError::InvalidDocument { index, source })?;
        documents.push(document);
    }
    Ok(documents)
}

/// Writes documents as a multi-document YAML stream.
///
/// # Errors
///
/// Returns an error if writing fails.
pub fn to_yaml_stream(documents: &[Document]) -> Result<String, SerializationError> {
    let mut out = String::new();
    for (index, document) in documents.iter().enumerate() {
        if index > 0 {
            out.push_str("---\n");
        }
        out.push_str(&to_yaml(document.root())?);
    }
    Ok(out)
}

/// Writes one tree as a YAML document.
///
/// # Errors
///
/// Returns an error if writing fails.
pub fn to_yaml(node: &Node) -> Result<String, SerializationError> {
    yaml::dump(node).map_err(SerializationError::Yaml)
}

/// Deserializes a value from YAML.
///
/// # Errors
///
/// Returns an error if the YAML is invalid or doesn't match the expected type.
pub fn from_yaml<T: DeserializeOwned>(yaml: &str) -> Result<T, SerializationError> {
    serde_yaml::from_str(yaml).map_err(SerializationError::Deserialize)
}

/// Converts a document tree node into a typed value.
///
/// # Errors
///
/// Returns an error if the node doesn't match the expected type.
pub fn from_node<T: DeserializeOwned>(node: &Node) -> Result<T, SerializationError> {
    let value = serde_yaml::to_value(node).map_err(SerializationError::Serialize)?;
    serde_yaml::from_value(value).map_err(SerializationError::Deserialize)
}
