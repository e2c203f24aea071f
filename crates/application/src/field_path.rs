//! Field path parsing and lookup.
//!
//! A field path is a `.` separated list of segments, e.g.
//! `spec.ports.[name=src-port].port`. Supported segments:
//! - `field`: mapping key lookup (or an index when applied to a sequence and
//!   the segment is all digits);
//! - `[key=value]`: first sequence element whose child `key` has the scalar
//!   text `value`;
//! - `[=value]`: first scalar sequence element with the text `value`;
//! - `[3]`: sequence index.
//!
//! Dots inside brackets do not split, so `[host=example.com]` is one segment.
//! A bracket may also follow a field name directly, as in `ports[name=http]`.

use std::fmt;
use std::str::FromStr;

use kvars_domain::{Node, Scalar};

use crate::error::PathError;

/// One step of a [`FieldPath`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Segment {
    /// Mapping key, or sequence index when all digits.
    Field(String),

    /// Sequence index.
    Index(usize),

    /// First mapping element whose `key` child equals `value`.
    Match {
        /// Child field compared.
        key: String,
        /// Expected scalar text.
        value: String,
    },

    /// First scalar element equal to the value.
    Element(String),
}

impl fmt::Display for Segment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Field(name) => f.write_str(name),
            Self::Index(index) => write!(f, "[{index}]"),
            Self::Match { key, value } => write!(f, "[{key}={value}]"),
            Self::Element(value) => write!(f, "[={value}]"),
        }
    }
}

/// A parsed field path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldPath {
    raw: String,
    segments: Vec<Segment>,
}

impl FieldPath {
    /// Parses a field path.
    ///
    /// # Errors
    ///
    /// Returns [`PathError::Empty`] for an empty path and
    /// [`PathError::Malformed`] for empty segments or unbalanced brackets.
    pub fn parse(path: &str) -> Result<Self, PathError> {
        let path = path.trim();
        if path.is_empty() {
            return Err(PathError::Empty);
        }

        let mut segments = Vec::new();
        for raw in split_path_segments(path)? {
            parse_segment(&raw, &mut segments)?;
        }

        Ok(Self {
            raw: path.to_string(),
            segments,
        })
    }

    /// The parsed segments.
    #[must_use]
    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    /// The path as written.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.raw
    }

    /// Walks `root` along this path and returns the scalar it ends on.
    ///
    /// # Errors
    ///
    /// Fails if any segment does not match, is applied to a node of the wrong
    /// type, or if the path ends on a mapping or sequence.
    pub fn resolve<'a>(&self, root: &'a Node) -> Result<&'a Scalar, PathError> {
        let mut current = root;
        for segment in &self.segments {
            current = step(current, segment)?;
        }
        current
            .as_scalar()
            .ok_or_else(|| PathError::NotScalar(current.type_name()))
    }
}

impl FromStr for FieldPath {
    type Err = PathError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for FieldPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}

/// Parses `path` and resolves it against `root`.
///
/// # Errors
///
/// See [`FieldPath::parse`] and [`FieldPath::resolve`].
pub fn resolve_field_path<'a>(root: &'a Node, path: &str) -> Result<&'a Scalar, PathError> {
    FieldPath::parse(path)?.resolve(root)
}

fn step<'a>(node: &'a Node, segment: &Segment) -> Result<&'a Node, PathError> {
    let not_found = || PathError::NotFound {
        segment: segment.to_string(),
    };
    let mismatch = || PathError::TypeMismatch {
        segment: segment.to_string(),
        found: node.type_name(),
    };

    match (segment, node) {
        (Segment::Field(name), Node::Mapping(_)) => node.get(name).ok_or_else(not_found),
        (Segment::Field(name), Node::Sequence(items)) => {
            let index: usize = name.parse().map_err(|_| mismatch())?;
            items.get(index).ok_or_else(not_found)
        }
        (Segment::Index(index), Node::Sequence(items)) => items.get(*index).ok_or_else(not_found),
        (Segment::Match { key, value }, Node::Sequence(items)) => items
            .iter()
            .find(|item| {
                item.get(key)
                    .and_then(Node::as_scalar)
                    .is_some_and(|scalar| scalar.text() == value.as_str())
            })
            .ok_or_else(not_found),
        (Segment::Element(value), Node::Sequence(items)) => items
            .iter()
            .find(|item| {
                item.as_scalar()
                    .is_some_and(|scalar| scalar.text() == value.as_str())
            })
            .ok_or_else(not_found),
        _ => Err(mismatch()),
    }
}

/// Split a path into segments, respecting brackets.
fn split_path_segments(path: &str) -> Result<Vec<String>, PathError> {
    let mut segments = Vec::new();
    let mut current = String::new();
    let mut in_bracket = false;

    for ch in path.chars() {
        match ch {
            '.' if !in_bracket => {
                if current.is_empty() {
                    return Err(PathError::Malformed(path.to_string()));
                }
                segments.push(std::mem::take(&mut current));
            }
            '[' if !in_bracket => {
                in_bracket = true;
                current.push(ch);
            }
            ']' if in_bracket => {
                in_bracket = false;
                current.push(ch);
            }
            _ => current.push(ch),
        }
    }

    if in_bracket || current.is_empty() {
        return Err(PathError::Malformed(path.to_string()));
    }
    segments.push(current);

    Ok(segments)
}

/// Parse one raw segment. `ports[name=http]` yields a field and a predicate.
fn parse_segment(raw: &str, out: &mut Vec<Segment>) -> Result<(), PathError> {
    let malformed = || PathError::Malformed(raw.to_string());

    let Some(bracket_start) = raw.find('[') else {
        if raw.contains(']') {
            return Err(malformed());
        }
        out.push(Segment::Field(raw.to_string()));
        return Ok(());
    };

    let inner = raw[bracket_start + 1..]
        .strip_suffix(']')
        .ok_or_else(malformed)?;
    if inner.contains('[') || inner.contains(']') {
        return Err(malformed());
    }

    let field = &raw[..bracket_start];
    if !field.is_empty() {
        out.push(Segment::Field(field.to_string()));
    }

    let predicate = match inner.split_once('=') {
        Some(("", value)) => Segment::Element(value.to_string()),
        Some((key, value)) => Segment::Match {
            key: key.to_string(),
            value: value.to_string(),
        },
        None => Segment::Index(inner.parse().map_err(|_| malformed())?),
    };
    out.push(predicate);

    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
mod tests {
    use super::*;
    use indoc::indoc;
    use kvars_domain::document::yaml::load;
    use pretty_assertions::assert_eq;

    fn service() -> Node {
        load(indoc! {"
            apiVersion: v1
            kind: Service
            metadata:
              name: source
              labels:
                app.kubernetes.io/name: source
            spec:
              ports:
                - name: http
                  port: 8080
                - name: src-port
                  port: 80
                - name: dns.udp
                  port: 53
              finalizers:
                - first
                - second
              ratio: 0.5
              enabled: true
        "})
        .unwrap()
    }

    fn text(root: &Node, path: &str) -> String {
        resolve_field_path(root, path).unwrap().text().to_string()
    }

    #[test]
    fn test_plain_fields() {
        assert_eq!(text(&service(), "metadata.name"), "source");
        assert_eq!(text(&service(), "kind"), "Service");
    }

    #[test]
    fn test_predicate_selects_sequence_element() {
        assert_eq!(text(&service(), "spec.ports.[name=src-port].port"), "80");
    }

    #[test]
    fn test_predicate_value_may_contain_dots() {
        assert_eq!(text(&service(), "spec.ports.[name=dns.udp].port"), "53");
    }

    #[test]
    fn test_predicate_directly_after_field() {
        assert_eq!(text(&service(), "spec.ports[name=http].port"), "8080");
    }

    #[test]
    fn test_index_segments() {
        assert_eq!(text(&service(), "spec.ports.[0].name"), "http");
        assert_eq!(text(&service(), "spec.ports.1.port"), "80");
        assert_eq!(text(&service(), "spec.finalizers[1]"), "second");
    }

    #[test]
    fn test_scalar_element_predicate() {
        assert_eq!(text(&service(), "spec.finalizers.[=first]"), "first");
    }

    #[test]
    fn test_scalars_keep_their_text() {
        assert_eq!(text(&service(), "spec.ratio"), "0.5");
        assert_eq!(text(&service(), "spec.enabled"), "true");
    }

    #[test]
    fn test_number_spelling_is_kept() {
        let root = load(indoc! {"
            data:
              v: 1.10
              hex: 0x50
              exp: 1e3
              empty: ~
              quoted: '007'
        "})
        .unwrap();

        assert_eq!(text(&root, "data.v"), "1.10");
        assert_eq!(text(&root, "data.hex"), "0x50");
        assert_eq!(text(&root, "data.exp"), "1e3");
        assert_eq!(text(&root, "data.empty"), "~");
        assert_eq!(text(&root, "data.quoted"), "007");
    }

    #[test]
    fn test_field_lookup_uses_string_keys() {
        let root = load("ports:\n  80: numeric\n  '80': text\n").unwrap();
        assert_eq!(text(&root, "ports.80"), "text");
    }

    #[test]
    fn test_missing_key() {
        let err = resolve_field_path(&service(), "spec.missing").unwrap_err();
        assert_eq!(
            err,
            PathError::NotFound {
                segment: "missing".to_string()
            }
        );
    }

    #[test]
    fn test_predicate_without_match() {
        let err = resolve_field_path(&service(), "spec.ports.[name=nope].port").unwrap_err();
        assert_eq!(
            err,
            PathError::NotFound {
                segment: "[name=nope]".to_string()
            }
        );
    }

    #[test]
    fn test_index_out_of_range() {
        let err = resolve_field_path(&service(), "spec.ports.[7].port").unwrap_err();
        assert!(matches!(err, PathError::NotFound { .. }));
    }

    #[test]
    fn test_indexing_into_scalar() {
        let err = resolve_field_path(&service(), "metadata.name.first").unwrap_err();
        assert_eq!(
            err,
            PathError::TypeMismatch {
                segment: "first".to_string(),
                found: "string"
            }
        );
    }

    #[test]
    fn test_predicate_on_mapping() {
        let err = resolve_field_path(&service(), "metadata.[name=source]").unwrap_err();
        assert!(matches!(err, PathError::TypeMismatch { found: "mapping", .. }));
    }

    #[test]
    fn test_composite_result_is_rejected() {
        assert_eq!(
            resolve_field_path(&service(), "spec.ports").unwrap_err(),
            PathError::NotScalar("sequence")
        );
        assert_eq!(
            resolve_field_path(&service(), "metadata").unwrap_err(),
            PathError::NotScalar("mapping")
        );
    }

    #[test]
    fn test_malformed_paths() {
        assert_eq!(FieldPath::parse("").unwrap_err(), PathError::Empty);
        assert!(matches!(FieldPath::parse("a..b"), Err(PathError::Malformed(_))));
        assert!(matches!(FieldPath::parse("a."), Err(PathError::Malformed(_))));
        assert!(matches!(FieldPath::parse("a.[b=c"), Err(PathError::Malformed(_))));
        assert!(matches!(FieldPath::parse("a.[x]"), Err(PathError::Malformed(_))));
        assert!(matches!(FieldPath::parse("a.b]"), Err(PathError::Malformed(_))));
    }

    #[test]
    fn test_parsed_segments() {
        let path: FieldPath = "spec.ports.[name=a=b].port".parse().unwrap();
        assert_eq!(
            path.segments(),
            &[
                Segment::Field("spec".to_string()),
                Segment::Field("ports".to_string()),
                Segment::Match {
                    key: "name".to_string(),
                    value: "a=b".to_string()
                },
                Segment::Field("port".to_string()),
            ]
        );
        assert_eq!(path.to_string(), "spec.ports.[name=a=b].port");
    }
}
