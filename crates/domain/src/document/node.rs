//! Document tree nodes.

use std::hash::{Hash, Hasher};

use indexmap::{Equivalent, IndexMap};
use serde::ser::{Serialize, SerializeMap, SerializeSeq, Serializer};
use yaml_rust2::Yaml;

use super::scalar::{Scalar, ScalarKind};

/// An ordered mapping node. Keys keep their document order and their type,
/// so `1` and `"1"` are different keys.
pub type Mapping = IndexMap<Scalar, Node>;

/// A node of a document tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    /// An ordered key/value mapping.
    Mapping(Mapping),

    /// An ordered sequence.
    Sequence(Vec<Node>),

    /// A scalar leaf.
    Scalar(Scalar),
}

impl Node {
    /// Builds a mapping node with string keys, keeping their order.
    pub fn mapping<K, I>(entries: I) -> Self
    where
        K: Into<String>,
        I: IntoIterator<Item = (K, Self)>,
    {
        Self::Mapping(
            entries
                .into_iter()
                .map(|(k, v)| (Scalar::string(k), v))
                .collect(),
        )
    }

    /// Builds a sequence node.
    pub fn sequence<I>(items: I) -> Self
    where
        I: IntoIterator<Item = Self>,
    {
        Self::Sequence(items.into_iter().collect())
    }

    /// Builds a string scalar node.
    pub fn string(value: impl Into<String>) -> Self {
        Self::Scalar(Scalar::string(value))
    }

    /// Looks up a child by string key if this is a mapping.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Self> {
        self.as_mapping()?.get(&StringKey(key))
    }

    /// Returns the mapping if this is a mapping node.
    #[must_use]
    pub const fn as_mapping(&self) -> Option<&Mapping> {
        match self {
            Self::Mapping(mapping) => Some(mapping),
            _ => None,
        }
    }

    /// Returns the elements if this is a sequence node.
    #[must_use]
    pub fn as_sequence(&self) -> Option<&[Self]> {
        match self {
            Self::Sequence(items) => Some(items),
            _ => None,
        }
    }

    /// Returns the scalar if this is a scalar node.
    #[must_use]
    pub const fn as_scalar(&self) -> Option<&Scalar> {
        match self {
            Self::Scalar(scalar) => Some(scalar),
            _ => None,
        }
    }

    /// Returns the string value if this is a string scalar.
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        self.as_scalar()?.as_str()
    }

    /// Returns true if this is a null scalar.
    #[must_use]
    pub fn is_null(&self) -> bool {
        self.as_scalar().is_some_and(Scalar::is_null)
    }

    /// Short type name used in diagnostics.
    #[must_use]
    pub const fn type_name(&self) -> &'static str {
        match self {
            Self::Mapping(_) => "mapping",
            Self::Sequence(_) => "sequence",
            Self::Scalar(scalar) => scalar.type_name(),
        }
    }
}

/// Borrowed lookup key matching string scalar keys without allocating.
///
/// Hashes like the derived `Hash` of a string [`Scalar`].
struct StringKey<'a>(&'a str);

impl Hash for StringKey<'_> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        ScalarKind::String.hash(state);
        self.0.hash(state);
    }
}

impl Equivalent<Scalar> for StringKey<'_> {
    fn equivalent(&self, key: &Scalar) -> bool {
        key.as_str() == Some(self.0)
    }
}

impl From<Scalar> for Node {
    fn from(value: Scalar) -> Self {
        Self::Scalar(value)
    }
}

impl From<&str> for Node {
    fn from(value: &str) -> Self {
        Self::Scalar(value.into())
    }
}

impl From<i64> for Node {
    fn from(value: i64) -> Self {
        Self::Scalar(value.into())
    }
}

impl From<bool> for Node {
    fn from(value: bool) -> Self {
        Self::Scalar(value.into())
    }
}

impl Serialize for Node {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Mapping(mapping) => {
                let mut map = serializer.serialize_map(Some(mapping.len()))?;
                for (key, value) in mapping {
                    map.serialize_entry(key, value)?;
                }
                map.end()
            }
            Self::Sequence(items) => {
                let mut seq = serializer.serialize_seq(Some(items.len()))?;
                for item in items {
                    seq.serialize_element(item)?;
                }
                seq.end()
            }
            Self::Scalar(scalar) => scalar.serialize(serializer),
        }
    }
}

// Typed values let serde targets such as config structs read numbers and
// booleans. Text that no longer parses as its kind falls back to a string.
impl Serialize for Scalar {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        if self.is_string() {
            return serializer.serialize_str(self.text());
        }
        match Yaml::from_str(self.text()) {
            Yaml::Null => serializer.serialize_unit(),
            Yaml::Boolean(value) => serializer.serialize_bool(value),
            Yaml::Integer(value) => serializer.serialize_i64(value),
            real @ Yaml::Real(_) => match real.as_f64() {
                Some(value) => serializer.serialize_f64(value),
                None => serializer.serialize_str(self.text()),
            },
            _ => serializer.serialize_str(self.text()),
        }
    }
}
