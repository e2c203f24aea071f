//! Resource documents and their identifying attributes.

use std::fmt;

use super::node::Node;
use super::yaml;
use crate::error::{DomainError, DomainResult};

/// One resource document.
///
/// The root is always a mapping. Identifying attributes are read from the
/// well-known top-level fields `apiVersion`, `kind`, `metadata.name` and
/// `metadata.namespace`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document {
    root: Node,
}

impl Document {
    /// Wraps a root node.
    ///
    /// # Errors
    ///
    /// Returns [`DomainError::DocumentNotMapping`] if the root is not a
    /// mapping.
    pub fn new(root: Node) -> DomainResult<Self> {
        match root {
            Node::Mapping(_) => Ok(Self { root }),
            other => Err(DomainError::DocumentNotMapping(other.type_name())),
        }
    }

    /// Parses the first document of `text`.
    ///
    /// # Errors
    ///
    /// Returns an error if the text is not valid YAML or its root is not a
    /// mapping.
    pub fn from_yaml(text: &str) -> DomainResult<Self> {
        Self::new(yaml::load(text)?)
    }

    /// Returns the root node.
    #[must_use]
    pub const fn root(&self) -> &Node {
        &self.root
    }

    /// Returns the root node mutably.
    pub const fn root_mut(&mut self) -> &mut Node {
        &mut self.root
    }

    /// Consumes the document and returns its root node.
    #[must_use]
    pub fn into_root(self) -> Node {
        self.root
    }

    /// The `apiVersion` field.
    #[must_use]
    pub fn api_version(&self) -> Option<&str> {
        self.root.get("apiVersion")?.as_str()
    }

    /// The `kind` field.
    #[must_use]
    pub fn kind(&self) -> Option<&str> {
        self.root.get("kind")?.as_str()
    }

    /// The `metadata.name` field.
    #[must_use]
    pub fn name(&self) -> Option<&str> {
        self.root.get("metadata")?.get("name")?.as_str()
    }

    /// The `metadata.namespace` field.
    #[must_use]
    pub fn namespace(&self) -> Option<&str> {
        self.root.get("metadata")?.get("namespace")?.as_str()
    }

    /// The identifying attributes, for diagnostics.
    #[must_use]
    pub fn id(&self) -> ResourceId<'_> {
        ResourceId {
            api_version: self.api_version(),
            kind: self.kind(),
            namespace: self.namespace(),
            name: self.name(),
        }
    }
}

impl TryFrom<Node> for Document {
    type Error = DomainError;

    fn try_from(root: Node) -> DomainResult<Self> {
        Self::new(root)
    }
}

impl From<Document> for Node {
    fn from(document: Document) -> Self {
        document.into_root()
    }
}

/// Borrowed identifying attributes of a [`Document`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResourceId<'a> {
    /// API group and version.
    pub api_version: Option<&'a str>,
    /// Resource kind.
    pub kind: Option<&'a str>,
    /// Metadata namespace.
    pub namespace: Option<&'a str>,
    /// Metadata name.
    pub name: Option<&'a str>,
}

impl fmt::Display for ResourceId<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(api_version) = self.api_version {
            write!(f, "{api_version}/")?;
        }
        write!(f, "{}", self.kind.unwrap_or("<no kind>"))?;
        match self.namespace {
            Some(namespace) => write!(f, " {namespace}/")?,
            None => f.write_str(" ")?,
        }
        f.write_str(self.name.unwrap_or("<no name>"))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
mod tests {
    use super::*;
    use indoc::indoc;
    use pretty_assertions::assert_eq;

    fn config_map() -> Document {
        Document::from_yaml(indoc! {"
            apiVersion: v1
            kind: ConfigMap
            metadata:
              name: config
              namespace: test
            data:
              src: hello
        "})
        .unwrap()
    }

    #[test]
    fn test_identifying_attributes() {
        let doc = config_map();

        assert_eq!(doc.api_version(), Some("v1"));
        assert_eq!(doc.kind(), Some("ConfigMap"));
        assert_eq!(doc.name(), Some("config"));
        assert_eq!(doc.namespace(), Some("test"));
    }

    #[test]
    fn test_missing_namespace_is_none() {
        let doc = Document::from_yaml(indoc! {"
            apiVersion: v1
            kind: Service
            metadata:
              name: web
        "})
        .unwrap();

        assert_eq!(doc.namespace(), None);
        assert_eq!(doc.id().to_string(), "v1/Service web");
    }

    #[test]
    fn test_into_root_returns_the_tree() {
        let root = config_map().into_root();
        assert_eq!(root.get("kind"), Some(&Node::from("ConfigMap")));
    }

    #[test]
    fn test_resource_id_display() {
        assert_eq!(config_map().id().to_string(), "v1/ConfigMap test/config");
    }

    #[test]
    fn test_non_mapping_root_is_rejected() {
        let err = Document::new(Node::sequence([Node::from(1_i64)])).unwrap_err();
        assert_eq!(err, DomainError::DocumentNotMapping("sequence"));

        let err = Document::from_yaml("just a string\n").unwrap_err();
        assert_eq!(err, DomainError::DocumentNotMapping("string"));
    }
}
