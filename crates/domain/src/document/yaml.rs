//! Lossless YAML loading and dumping for document trees.
//!
//! The loader works on parser events so every scalar keeps its source text.
//! Quoted scalars and `!!str` scalars are strings; plain scalars resolve to
//! null, bool, integer, float or string from their text. Other tags are
//! dropped. Aliases are expanded to a copy of the anchored node.

use std::collections::HashMap;

use yaml_rust2::parser::{Event, EventReceiver, Parser, Tag};
use yaml_rust2::scanner::TScalarStyle;
use yaml_rust2::yaml::Hash;
use yaml_rust2::{Yaml, YamlEmitter};

use super::node::{Mapping, Node};
use super::scalar::{Scalar, ScalarKind};
use crate::error::{DomainError, DomainResult};

const CORE_TAG_PREFIX: &str = "tag:yaml.org,2002:";

/// Loads every document of a YAML stream. Empty documents load as null.
///
/// # Errors
///
/// Fails on invalid YAML, duplicate mapping keys, non-scalar mapping keys and
/// aliases to unknown anchors.
pub fn load_all(text: &str) -> DomainResult<Vec<Node>> {
    let mut loader = Loader::default();
    Parser::new_from_str(text)
        .load(&mut loader, true)
        .map_err(|err| DomainError::Yaml(err.to_string()))?;

    match loader.error {
        Some(err) => Err(err),
        None => Ok(loader.documents),
    }
}

/// Loads the first document of `text`, or null if there is none.
///
/// # Errors
///
/// See [`load_all`].
pub fn load(text: &str) -> DomainResult<Node> {
    Ok(load_all(text)?
        .into_iter()
        .next()
        .unwrap_or_else(|| Node::Scalar(Scalar::null())))
}

/// Writes one node as a YAML document, without a leading `---`.
///
/// Non-string scalars are written with their source text. Strings are quoted
/// when their plain form would read back as another type.
///
/// # Errors
///
/// Returns [`DomainError::Emit`] if the emitter fails.
pub fn dump(node: &Node) -> DomainResult<String> {
    let mut out = String::new();
    YamlEmitter::new(&mut out)
        .dump(&to_yaml(node))
        .map_err(|err| DomainError::Emit(err.to_string()))?;

    let mut body = out.strip_prefix("---\n").unwrap_or(&out).to_string();
    body.push('\n');
    Ok(body)
}

fn to_yaml(node: &Node) -> Yaml {
    match node {
        Node::Mapping(mapping) => Yaml::Hash(
            mapping
                .iter()
                .map(|(key, value)| (scalar_to_yaml(key), to_yaml(value)))
                .collect::<Hash>(),
        ),
        Node::Sequence(items) => Yaml::Array(items.iter().map(to_yaml).collect()),
        Node::Scalar(scalar) => scalar_to_yaml(scalar),
    }
}

// `Real` is written verbatim, which keeps the source spelling of numbers,
// booleans and nulls.
fn scalar_to_yaml(scalar: &Scalar) -> Yaml {
    if scalar.is_string() {
        Yaml::String(scalar.text().to_string())
    } else {
        Yaml::Real(scalar.text().to_string())
    }
}

fn scalar_from_event(text: String, style: TScalarStyle, tag: Option<&Tag>) -> Scalar {
    let is_str_tag = tag.is_some_and(|tag| {
        tag.suffix == "str" && (tag.handle == "!!" || tag.handle == CORE_TAG_PREFIX)
    });
    if style != TScalarStyle::Plain || is_str_tag {
        return Scalar::new(ScalarKind::String, text);
    }
    Scalar::plain(text)
}

#[derive(Debug)]
enum Frame {
    Sequence {
        anchor: usize,
        items: Vec<Node>,
    },
    Mapping {
        anchor: usize,
        entries: Mapping,
        key: Option<Scalar>,
    },
}

#[derive(Debug, Default)]
struct Loader {
    documents: Vec<Node>,
    root: Option<Node>,
    stack: Vec<Frame>,
    anchors: HashMap<usize, Node>,
    error: Option<DomainError>,
}

impl EventReceiver for Loader {
    fn on_event(&mut self, event: Event) {
        if self.error.is_some() {
            return;
        }
        if let Err(err) = self.handle(event) {
            self.error = Some(err);
        }
    }
}

impl Loader {
    fn handle(&mut self, event: Event) -> DomainResult<()> {
        match event {
            Event::Scalar(text, style, anchor, tag) => {
                let scalar = scalar_from_event(text, style, tag.as_ref());
                self.insert(Node::Scalar(scalar), anchor)
            }
            Event::SequenceStart(anchor, ..) => {
                self.stack.push(Frame::Sequence {
                    anchor,
                    items: Vec::new(),
                });
                Ok(())
            }
            Event::MappingStart(anchor, ..) => {
                self.stack.push(Frame::Mapping {
                    anchor,
                    entries: Mapping::new(),
                    key: None,
                });
                Ok(())
            }
            Event::SequenceEnd | Event::MappingEnd => match self.stack.pop() {
                Some(Frame::Sequence { anchor, items }) => {
                    self.insert(Node::Sequence(items), anchor)
                }
                Some(Frame::Mapping {
                    anchor, entries, ..
                }) => self.insert(Node::Mapping(entries), anchor),
                None => Ok(()),
            },
            Event::Alias(id) => {
                let node = self
                    .anchors
                    .get(&id)
                    .cloned()
                    .ok_or(DomainError::UnknownAlias)?;
                self.insert(node, 0)
            }
            Event::DocumentEnd | Event::StreamEnd => {
                if let Some(root) = self.root.take() {
                    self.documents.push(root);
                }
                Ok(())
            }
            _ => Ok(()),
        }
    }

    fn insert(&mut self, node: Node, anchor: usize) -> DomainResult<()> {
        if anchor > 0 {
            self.anchors.insert(anchor, node.clone());
        }

        match self.stack.last_mut() {
            None => {
                self.root = Some(node);
                Ok(())
            }
            Some(Frame::Sequence { items, .. }) => {
                items.push(node);
                Ok(())
            }
            Some(Frame::Mapping { entries, key, .. }) => match key.take() {
                None => match node {
                    Node::Scalar(scalar) => {
                        *key = Some(scalar);
                        Ok(())
                    }
                    other => Err(DomainError::ComplexKey(other.type_name())),
                },
                Some(key) => {
                    if entries.contains_key(&key) {
                        return Err(DomainError::DuplicateKey(key.text().to_string()));
                    }
                    entries.insert(key, node);
                    Ok(())
                }
            },
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
mod tests {
    use super::*;
    use indoc::indoc;
    use pretty_assertions::assert_eq;

    fn scalar_at<'a>(node: &'a Node, key: &str) -> &'a Scalar {
        node.get(key).and_then(Node::as_scalar).unwrap()
    }

    #[test]
    fn test_plain_scalars_keep_source_text() {
        let node = load(indoc! {"
            version: 1.10
            hex: 0x50
            exp: 1e3
            nil: ~
            flag: true
        "})
        .unwrap();

        assert_eq!(scalar_at(&node, "version").text(), "1.10");
        assert_eq!(scalar_at(&node, "version").kind(), ScalarKind::Float);
        assert_eq!(scalar_at(&node, "hex").text(), "0x50");
        assert_eq!(scalar_at(&node, "hex").kind(), ScalarKind::Int);
        assert_eq!(scalar_at(&node, "exp").text(), "1e3");
        assert_eq!(scalar_at(&node, "nil").text(), "~");
        assert_eq!(scalar_at(&node, "flag").kind(), ScalarKind::Bool);
    }

    #[test]
    fn test_quoted_and_str_tagged_scalars_are_strings() {
        let node = load(indoc! {r#"
            double: "80"
            single: '1.10'
            tagged: !!str 0x50
            custom: !thing 80
        "#})
        .unwrap();

        assert_eq!(node.get("double"), Some(&Node::string("80")));
        assert_eq!(node.get("single"), Some(&Node::string("1.10")));
        assert_eq!(node.get("tagged"), Some(&Node::string("0x50")));
        assert_eq!(scalar_at(&node, "custom").kind(), ScalarKind::Int);
    }

    #[test]
    fn test_keys_keep_their_type() {
        let node = load("1: a\n\"1\": b\n").unwrap();
        let mapping = node.as_mapping().unwrap();

        assert_eq!(mapping.len(), 2);
        assert_eq!(mapping.get(&Scalar::plain("1")), Some(&Node::string("a")));
        assert_eq!(mapping.get(&Scalar::string("1")), Some(&Node::string("b")));
    }

    #[test]
    fn test_duplicate_key_is_rejected() {
        let err = load("a: 1\nb: 2\na: 3\n").unwrap_err();
        assert_eq!(err, DomainError::DuplicateKey("a".to_string()));
    }

    #[test]
    fn test_complex_key_is_rejected() {
        let err = load("? [a, b]\n: c\n").unwrap_err();
        assert_eq!(err, DomainError::ComplexKey("sequence"));
    }

    #[test]
    fn test_aliases_are_expanded() {
        let node = load(indoc! {"
            base: &base
              port: 80
            copy: *base
        "})
        .unwrap();

        assert_eq!(node.get("copy"), node.get("base"));
    }

    #[test]
    fn test_invalid_yaml() {
        assert!(matches!(load("a: [unclosed\n"), Err(DomainError::Yaml(_))));
    }

    #[test]
    fn test_stream_documents() {
        let documents = load_all("kind: A\n---\nkind: B\n").unwrap();
        assert_eq!(documents.len(), 2);
        assert_eq!(documents[1].get("kind"), Some(&Node::string("B")));
    }

    #[test]
    fn test_dump_keeps_source_text() {
        let input = indoc! {"
            version: 1.10
            hex: 0x50
            port: 8080
            enabled: true
            nothing: ~
            name: web
        "};

        let output = dump(&load(input).unwrap()).unwrap();

        assert_eq!(output, input);
    }

    #[test]
    fn test_dump_quotes_ambiguous_strings() {
        let node = Node::mapping([
            ("port", Node::string("80")),
            ("version", Node::string("1.10")),
            ("flag", Node::string("true")),
            ("nothing", Node::string("null")),
        ]);

        let reparsed = load(&dump(&node).unwrap()).unwrap();

        assert_eq!(reparsed, node);
    }

    #[test]
    fn test_dump_round_trips_nested_trees() {
        let input = indoc! {"
            metadata:
              name: web
              labels:
                1: numeric
                '1': text
            spec:
              ports:
                - name: http
                  port: 80
              script: |
                echo one
                echo two
        "};
        let node = load(input).unwrap();

        assert_eq!(load(&dump(&node).unwrap()).unwrap(), node);
    }
}
