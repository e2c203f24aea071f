//! Vars transformer configuration types.
//!
//! These mirror the function configuration document handed to the transformer:
//!
//! ```yaml
//! apiVersion: kvars.dev/v1alpha1
//! kind: VarsTransformer
//! metadata:
//!   name: vars
//! replacements:
//!   - name: TEST
//!     source:
//!       objRef:
//!         apiVersion: v1
//!         kind: ConfigMap
//!         name: config
//!       fieldPath: data.src
//! ```

use serde::{Deserialize, Deserializer, Serialize};

/// Prefix of a placeholder token.
pub const TOKEN_PREFIX: &str = "$(";

/// Suffix of a placeholder token.
pub const TOKEN_SUFFIX: &str = ")";

/// Returns the placeholder token for a replacement name, e.g. `FOO` -> `$(FOO)`.
#[must_use]
pub fn token_for(name: &str) -> String {
    format!("{TOKEN_PREFIX}{name}{TOKEN_SUFFIX}")
}

/// Function configuration for the vars transformer.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VarsTransformerConfig {
    /// API version of the configuration document.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_version: Option<String>,

    /// Kind of the configuration document.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,

    /// Configuration metadata.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<ConfigMetadata>,

    /// Replacements to resolve and substitute, in order.
    #[serde(default)]
    pub replacements: Vec<Replacement>,
}

impl VarsTransformerConfig {
    /// Creates a configuration holding the given replacements.
    #[must_use]
    pub fn new(replacements: Vec<Replacement>) -> Self {
        Self {
            replacements,
            ..Self::default()
        }
    }
}

/// Metadata of the configuration document.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ConfigMetadata {
    /// Name of the configuration.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

/// A named rule computing the value of one placeholder token.
///
/// Exactly one of `source` and `sources` is expected to be set, and `sources`
/// requires a `template`. The engine checks this when it is constructed.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Replacement {
    /// Variable name. The token is `$(name)`.
    #[serde(default)]
    pub name: String,

    /// Single source whose value is used as is.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<SourceRef>,

    /// Multiple sources combined with `template`.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub sources: Vec<SourceRef>,

    /// `%s` template combining the values of `sources`.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub template: String,
}

impl Replacement {
    /// Creates a replacement reading one source.
    pub fn single(name: impl Into<String>, source: SourceRef) -> Self {
        Self {
            name: name.into(),
            source: Some(source),
            ..Self::default()
        }
    }

    /// Creates a replacement combining several sources with a template.
    pub fn templated(
        name: impl Into<String>,
        sources: Vec<SourceRef>,
        template: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            source: None,
            sources,
            template: template.into(),
        }
    }

    /// The placeholder token of this replacement.
    #[must_use]
    pub fn token(&self) -> String {
        token_for(&self.name)
    }
}

/// Where to read a value: a document filter and a field path in it.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SourceRef {
    /// Filter selecting the source document.
    #[serde(rename = "objRef", alias = "objectRef", default)]
    pub obj_ref: ObjectRef,

    /// Dotted path of the field to read.
    #[serde(default)]
    pub field_path: String,
}

impl SourceRef {
    /// Creates a source reference.
    pub fn new(obj_ref: ObjectRef, field_path: impl Into<String>) -> Self {
        Self {
            obj_ref,
            field_path: field_path.into(),
        }
    }
}

/// Document filter. Unset attributes match any document.
///
/// Empty strings from configuration are read as unset.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ObjectRef {
    /// API group and version, e.g. `apps/v1`.
    #[serde(
        default,
        deserialize_with = "empty_as_none",
        skip_serializing_if = "Option::is_none"
    )]
    pub api_version: Option<String>,

    /// Resource kind.
    #[serde(
        default,
        deserialize_with = "empty_as_none",
        skip_serializing_if = "Option::is_none"
    )]
    pub kind: Option<String>,

    /// Metadata name.
    #[serde(
        default,
        deserialize_with = "empty_as_none",
        skip_serializing_if = "Option::is_none"
    )]
    pub name: Option<String>,

    /// Metadata namespace.
    #[serde(
        default,
        deserialize_with = "empty_as_none",
        skip_serializing_if = "Option::is_none"
    )]
    pub namespace: Option<String>,
}

impl ObjectRef {
    /// Creates a filter that matches every document.
    #[must_use]
    pub fn any() -> Self {
        Self::default()
    }

    /// Restricts the filter to an API version.
    #[must_use]
    pub fn with_api_version(mut self, api_version: impl Into<String>) -> Self {
        self.api_version = non_empty(api_version.into());
        self
    }

    /// Restricts the filter to a kind.
    #[must_use]
    pub fn with_kind(mut self, kind: impl Into<String>) -> Self {
        self.kind = non_empty(kind.into());
        self
    }

    /// Restricts the filter to a name.
    #[must_use]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = non_empty(name.into());
        self
    }

    /// Restricts the filter to a namespace.
    #[must_use]
    pub fn with_namespace(mut self, namespace: impl Into<String>) -> Self {
        self.namespace = non_empty(namespace.into());
        self
    }
}

fn non_empty(value: String) -> Option<String> {
    (!value.is_empty()).then_some(value)
}

fn empty_as_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<String>::deserialize(deserializer)?;
    Ok(value.and_then(non_empty))
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
mod tests {
    use super::*;
    use indoc::indoc;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_token_for() {
        assert_eq!(token_for("FOO"), "$(FOO)");
        assert_eq!(Replacement::default().token(), "$()");
    }

    #[test]
    fn test_deserialize_single_source() {
        let config: VarsTransformerConfig = serde_yaml::from_str(indoc! {"
            apiVersion: kvars.dev/v1alpha1
            kind: VarsTransformer
            metadata:
              name: vars
            replacements:
              - name: TEST
                source:
                  objRef:
                    apiVersion: v1
                    kind: ConfigMap
                    name: config
                    namespace: test
                  fieldPath: data.src
        "})
        .unwrap();

        assert_eq!(config.kind.as_deref(), Some("VarsTransformer"));
        assert_eq!(
            config.replacements,
            vec![Replacement::single(
                "TEST",
                SourceRef::new(
                    ObjectRef::any()
                        .with_api_version("v1")
                        .with_kind("ConfigMap")
                        .with_name("config")
                        .with_namespace("test"),
                    "data.src",
                ),
            )]
        );
    }

    #[test]
    fn test_deserialize_sources_with_template() {
        let config: VarsTransformerConfig = serde_yaml::from_str(indoc! {r#"
            replacements:
              - name: ADDR
                sources:
                  - objectRef: {kind: Service, name: source}
                    fieldPath: metadata.name
                  - objRef: {kind: Service, name: source}
                    fieldPath: spec.ports.[name=src-port].port
                template: "%s:%s"
        "#})
        .unwrap();

        let replacement = &config.replacements[0];
        assert!(replacement.source.is_none());
        assert_eq!(replacement.sources.len(), 2);
        assert_eq!(replacement.template, "%s:%s");
        assert_eq!(
            replacement.sources[1].field_path,
            "spec.ports.[name=src-port].port"
        );
    }

    #[test]
    fn test_empty_filter_attributes_are_unset() {
        let obj_ref: ObjectRef = serde_yaml::from_str(indoc! {r#"
            apiVersion: ""
            kind: ConfigMap
            name: ""
        "#})
        .unwrap();

        assert_eq!(obj_ref, ObjectRef::any().with_kind("ConfigMap"));
        assert_eq!(ObjectRef::any().with_namespace(""), ObjectRef::any());
    }
}
