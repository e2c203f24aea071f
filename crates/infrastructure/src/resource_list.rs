//! KRM function `ResourceList` envelope.
//!
//! A KRM function reads one `ResourceList` document holding the resources to
//! transform (`items`) and its own configuration (`functionConfig`), and writes
//! the list back with the transformed items.

use kvars_domain::document::yaml;
use kvars_domain::{Document, Node};
use serde::de::DeserializeOwned;

use crate::serialization::{SerializationError, from_node, to_yaml};

/// API version written on output lists.
pub const RESOURCE_LIST_API_VERSION: &str = "config.kubernetes.io/v1";

/// Kind of a resource list.
pub const RESOURCE_LIST_KIND: &str = "ResourceList";

/// The function input/output envelope.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResourceList {
    /// `config.kubernetes.io/v1` (older inputs use `v1alpha1`).
    pub api_version: String,

    /// Always `ResourceList`.
    pub kind: String,

    /// Resources to transform.
    pub items: Vec<Document>,

    /// Function configuration.
    pub function_config: Option<Node>,

    /// Results reported by earlier functions, passed through untouched.
    pub results: Option<Node>,
}

impl ResourceList {
    /// Creates a list holding `items`.
    #[must_use]
    pub fn new(items: Vec<Document>) -> Self {
        Self {
            api_version: RESOURCE_LIST_API_VERSION.to_string(),
            kind: RESOURCE_LIST_KIND.to_string(),
            items,
            function_config: None,
            results: None,
        }
    }

    /// Returns true if `document` is a resource list envelope.
    #[must_use]
    pub fn is_resource_list(document: &Document) -> bool {
        document.kind() == Some(RESOURCE_LIST_KIND)
            && document
                .api_version()
                .is_some_and(|v| v.starts_with("config.kubernetes.io/"))
    }

    /// Parses a list from YAML text.
    ///
    /// # Errors
    ///
    /// Returns an error if the YAML is invalid or not a list.
    pub fn from_yaml(text: &str) -> Result<Self, SerializationError> {
        let root = yaml::load(text).map_err(SerializationError::Yaml)?;
        let document = Document::new(root)
            .map_err(|source| SerializationError::InvalidDocument { index: 0, source })?;
        Self::from_document(&document)
    }

    /// Converts an envelope document into a list.
    ///
    /// A missing or null `items` is an empty list.
    ///
    /// # Errors
    ///
    /// Returns an error if the document does not have the list shape.
    pub fn from_document(document: &Document) -> Result<Self, SerializationError> {
        let required = |value: Option<&str>, field: &str| {
            value
                .map(str::to_string)
                .ok_or_else(|| SerializationError::InvalidResourceList(format!("missing `{field}`")))
        };
        let root = document.root();

        let items = match root.get("items") {
            None => Vec::new(),
            Some(node) if node.is_null() => Vec::new(),
            Some(Node::Sequence(items)) => items
                .iter()
                .enumerate()
                .map(|(index, item)| {
                    Document::new(item.clone())
                        .map_err(|source| SerializationError::InvalidDocument { index, source })
                })
                .collect::<Result<_, _>>()?,
            Some(other) => {
                return Err(SerializationError::InvalidResourceList(format!(
                    "`items` must be a sequence, found a {}",
                    other.type_name()
                )));
            }
        };

        Ok(Self {
            api_version: required(document.api_version(), "apiVersion")?,
            kind: required(document.kind(), "kind")?,
            items,
            function_config: optional(root, "functionConfig"),
            results: optional(root, "results"),
        })
    }

    /// Deserializes the function configuration, if present.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration does not match `T`.
    pub fn function_config<T: DeserializeOwned>(&self) -> Result<Option<T>, SerializationError> {
        self.function_config.as_ref().map(from_node).transpose()
    }

    /// Writes the list as YAML. Items keep their scalar text.
    ///
    /// # Errors
    ///
    /// Returns an error if writing fails.
    pub fn to_yaml(&self) -> Result<String, SerializationError> {
        let mut entries = vec![
            ("apiVersion", Node::string(self.api_version.as_str())),
            ("kind", Node::string(self.kind.as_str())),
            (
                "items",
                Node::sequence(self.items.iter().cloned().map(Document::into_root)),
            ),
        ];
        if let Some(config) = &self.function_config {
            entries.push(("functionConfig", config.clone()));
        }
        if let Some(results) = &self.results {
            entries.push(("results", results.clone()));
        }
        to_yaml(&Node::mapping(entries))
    }
}

fn optional(root: &Node, key: &str) -> Option<Node> {
    root.get(key).filter(|node| !node.is_null()).cloned()
}
