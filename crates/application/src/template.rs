//! Positional `%s` templates.
//!
//! `%s` and `%v` are replaced by the next value, `%%` is a literal `%`, and any
//! other `%` sequence is copied as is.

use crate::error::TemplateError;

#[derive(Debug, Clone, PartialEq, Eq)]
enum Piece {
    Literal(String),
    Value,
}

/// A parsed template.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Template {
    pieces: Vec<Piece>,
    placeholders: usize,
}

impl Template {
    /// Parses a template. Parsing never fails.
    #[must_use]
    pub fn parse(template: &str) -> Self {
        let mut pieces = Vec::new();
        let mut literal = String::new();
        let mut placeholders = 0;
        let mut chars = template.chars().peekable();

        while let Some(ch) = chars.next() {
            if ch != '%' {
                literal.push(ch);
                continue;
            }
            match chars.peek() {
                Some('s' | 'v') => {
                    chars.next();
                    if !literal.is_empty() {
                        pieces.push(Piece::Literal(std::mem::take(&mut literal)));
                    }
                    pieces.push(Piece::Value);
                    placeholders += 1;
                }
                Some('%') => {
                    chars.next();
                    literal.push('%');
                }
                _ => literal.push('%'),
            }
        }

        if !literal.is_empty() {
            pieces.push(Piece::Literal(literal));
        }

        Self {
            pieces,
            placeholders,
        }
    }

    /// Number of value placeholders.
    #[must_use]
    pub const fn placeholders(&self) -> usize {
        self.placeholders
    }

    /// Renders the template, consuming `values` left to right.
    ///
    /// # Errors
    ///
    /// Returns [`TemplateError`] if the number of values differs from the
    /// number of placeholders.
    pub fn render<S: AsRef<str>>(&self, values: &[S]) -> Result<String, TemplateError> {
        if values.len() != self.placeholders {
            return Err(TemplateError {
                expected: self.placeholders,
                actual: values.len(),
            });
        }

        let mut values = values.iter();
        let mut out = String::new();
        for piece in &self.pieces {
            match piece {
                Piece::Literal(text) => out.push_str(text),
                Piece::Value => {
                    if let Some(value) = values.next() {
                        out.push_str(value.as_ref());
                    }
                }
            }
        }
        Ok(out)
    }
}
