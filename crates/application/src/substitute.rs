//! Token substitution over document trees.

use std::borrow::Cow;

use indexmap::IndexMap;
use kvars_domain::{Document, Node};
use regex::{Captures, Regex};

/// Resolved token values and the matcher that finds them.
///
/// All tokens are found in one left-to-right scan. When two tokens match at
/// the same position the one inserted first wins. Inserted values are never
/// scanned again.
#[derive(Debug, Clone)]
pub struct Substitutions {
    values: IndexMap<String, String>,
    pattern: Option<Regex>,
}

impl Substitutions {
    /// Builds the matcher for `values`, a map from token to value.
    ///
    /// # Errors
    ///
    /// Returns an error if the combined pattern exceeds the regex size limit.
    pub fn new(values: IndexMap<String, String>) -> Result<Self, regex::Error> {
        let tokens: Vec<String> = values
            .keys()
            .filter(|token| !token.is_empty())
            .map(|token| regex::escape(token))
            .collect();
        let pattern = if tokens.is_empty() {
            None
        } else {
            Some(Regex::new(&tokens.join("|"))?)
        };

        Ok(Self { values, pattern })
    }

    /// The token to value map.
    #[must_use]
    pub const fn values(&self) -> &IndexMap<String, String> {
        &self.values
    }

    /// Returns true if there is nothing to substitute.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Replaces every token occurrence in `text`. Borrowed when unchanged.
    #[must_use]
    pub fn apply_str<'t>(&self, text: &'t str) -> Cow<'t, str> {
        let Some(pattern) = &self.pattern else {
            return Cow::Borrowed(text);
        };
        pattern.replace_all(text, |caps: &Captures<'_>| {
            let token = &caps[0];
            self.values
                .get(token)
                .map_or_else(|| token.to_string(), Clone::clone)
        })
    }

    /// Rewrites every string scalar below `node`. Returns how many changed.
    pub fn apply(&self, node: &mut Node) -> usize {
        match node {
            Node::Mapping(mapping) => mapping.values_mut().map(|child| self.apply(child)).sum(),
            Node::Sequence(items) => items.iter_mut().map(|child| self.apply(child)).sum(),
            Node::Scalar(scalar) => {
                let Some(text) = scalar.as_string_mut() else {
                    return 0;
                };
                match self.apply_str(text) {
                    Cow::Borrowed(_) => 0,
                    Cow::Owned(replaced) => {
                        *text = replaced;
                        1
                    }
                }
            }
        }
    }

    /// Rewrites every document. Returns how many scalars changed.
    pub fn apply_all(&self, documents: &mut [Document]) -> usize {
        documents
            .iter_mut()
            .map(|document| self.apply(document.root_mut()))
            .sum()
    }
}
