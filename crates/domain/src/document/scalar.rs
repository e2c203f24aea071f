//! Scalar leaf values.

use std::fmt;

use yaml_rust2::Yaml;

/// The type a scalar resolves to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ScalarKind {
    /// `~`, `null` or an empty value.
    Null,
    /// `true` or `false`.
    Bool,
    /// Decimal, `0x` or `0o` integer.
    Int,
    /// Floating point number, including `.inf` and `.nan`.
    Float,
    /// Anything else, and every quoted scalar.
    String,
}

impl ScalarKind {
    /// Resolves the kind of an unquoted scalar from its text.
    #[must_use]
    pub fn resolve_plain(text: &str) -> Self {
        match Yaml::from_str(text) {
            Yaml::Null => Self::Null,
            Yaml::Boolean(_) => Self::Bool,
            Yaml::Integer(_) => Self::Int,
            Yaml::Real(_) => Self::Float,
            _ => Self::String,
        }
    }

    /// Short type name used in diagnostics.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Null => "null",
            Self::Bool => "bool",
            Self::Int => "integer",
            Self::Float => "float",
            Self::String => "string",
        }
    }
}

/// A scalar leaf of a document tree.
///
/// The text is kept exactly as written in the source, so `1.10` stays
/// `1.10` and `0x50` stays `0x50`. Only [`ScalarKind::String`] scalars take
/// part in token substitution.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Scalar {
    kind: ScalarKind,
    text: String,
}

impl Scalar {
    /// Creates a scalar of the given kind.
    pub fn new(kind: ScalarKind, text: impl Into<String>) -> Self {
        Self {
            kind,
            text: text.into(),
        }
    }

    /// Creates a string scalar.
    pub fn string(text: impl Into<String>) -> Self {
        Self::new(ScalarKind::String, text)
    }

    /// Creates a scalar from unquoted text, resolving its kind.
    pub fn plain(text: impl Into<String>) -> Self {
        let text = text.into();
        Self {
            kind: ScalarKind::resolve_plain(&text),
            text,
        }
    }

    /// A `null` scalar.
    #[must_use]
    pub fn null() -> Self {
        Self::new(ScalarKind::Null, "null")
    }

    /// The resolved kind.
    #[must_use]
    pub const fn kind(&self) -> ScalarKind {
        self.kind
    }

    /// The text as written in the source.
    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Returns true if this is a string scalar.
    #[must_use]
    pub fn is_string(&self) -> bool {
        self.kind == ScalarKind::String
    }

    /// Returns true if this is a null scalar.
    #[must_use]
    pub fn is_null(&self) -> bool {
        self.kind == ScalarKind::Null
    }

    /// Returns the string value if this is a string scalar.
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        self.is_string().then_some(self.text.as_str())
    }

    /// Returns the string value mutably if this is a string scalar.
    pub fn as_string_mut(&mut self) -> Option<&mut String> {
        self.is_string().then_some(&mut self.text)
    }

    /// Short type name used in diagnostics.
    #[must_use]
    pub const fn type_name(&self) -> &'static str {
        self.kind.name()
    }
}

impl fmt::Display for Scalar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}

impl From<&str> for Scalar {
    fn from(value: &str) -> Self {
        Self::string(value)
    }
}

impl From<String> for Scalar {
    fn from(value: String) -> Self {
        Self::string(value)
    }
}

impl From<bool> for Scalar {
    fn from(value: bool) -> Self {
        Self::new(ScalarKind::Bool, value.to_string())
    }
}

impl From<i64> for Scalar {
    fn from(value: i64) -> Self {
        Self::new(ScalarKind::Int, value.to_string())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_plain_text_is_kept_verbatim() {
        for (text, kind) in [
            ("1.10", ScalarKind::Float),
            ("0x50", ScalarKind::Int),
            ("1e3", ScalarKind::Float),
            ("~", ScalarKind::Null),
            ("null", ScalarKind::Null),
            ("true", ScalarKind::Bool),
            ("8080", ScalarKind::Int),
            ("app:1.0", ScalarKind::String),
        ] {
            let scalar = Scalar::plain(text);
            assert_eq!(scalar.text(), text);
            assert_eq!(scalar.kind(), kind, "kind of {text}");
        }
    }

    #[test]
    fn test_only_strings_are_strings() {
        assert!(Scalar::from("$(FOO)").is_string());
        assert!(!Scalar::from(80_i64).is_string());
        assert!(!Scalar::null().is_string());
        assert_eq!(Scalar::from("x").as_str(), Some("x"));
        assert_eq!(Scalar::from(false).as_str(), None);
        assert_eq!(Scalar::plain("80").as_str(), None);
    }

    #[test]
    fn test_same_text_different_kind_differs() {
        assert_ne!(Scalar::plain("1"), Scalar::string("1"));
        assert_eq!(Scalar::from(1_i64), Scalar::plain("1"));
    }

    #[test]
    fn test_string_mut_only_for_strings() {
        let mut number = Scalar::plain("80");
        assert!(number.as_string_mut().is_none());

        let mut text = Scalar::string("a");
        text.as_string_mut().unwrap().push('b');
        assert_eq!(text.text(), "ab");
    }
}
