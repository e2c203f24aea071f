//! Resolution of one replacement to its string value.

use kvars_domain::{Document, Replacement, SourceRef};
use tracing::debug;

use crate::error::{VarsError, VarsResult};
use crate::field_path::FieldPath;
use crate::selector::select;
use crate::template::Template;

/// Resolves a replacement against the document collection.
///
/// A single `source` yields its field value unchanged. Multiple `sources` are
/// resolved in order and rendered into the `template`.
///
/// # Errors
///
/// Fails on the first source that matches no document
/// ([`VarsError::SourceNotFound`]), more than one document
/// ([`VarsError::MultipleSources`]) or whose field path does not resolve to a
/// scalar ([`VarsError::PathNotFound`]).
pub fn resolve_value(replacement: &Replacement, documents: &[Document]) -> VarsResult<String> {
    let name = replacement.name.as_str();

    if let Some(source) = &replacement.source {
        return resolve_source(name, source, documents);
    }
    if replacement.sources.is_empty() {
        return Err(VarsError::config_invalid(format!(
            "replacement {name} must have a source or sources"
        )));
    }

    let values = replacement
        .sources
        .iter()
        .map(|source| resolve_source(name, source, documents))
        .collect::<VarsResult<Vec<_>>>()?;

    Template::parse(&replacement.template)
        .render(&values)
        .map_err(|source| VarsError::TemplateArity {
            name: name.to_string(),
            source,
        })
}

/// Selects exactly one document for `source` and reads its field.
///
/// # Errors
///
/// See [`resolve_value`].
pub fn resolve_source(name: &str, source: &SourceRef, documents: &[Document]) -> VarsResult<String> {
    let matched = select(documents, &source.obj_ref);
    let document = match matched.as_slice() {
        [] => {
            return Err(VarsError::SourceNotFound {
                name: name.to_string(),
            });
        }
        [document] => *document,
        _ => {
            return Err(VarsError::MultipleSources {
                name: name.to_string(),
            });
        }
    };

    let value = FieldPath::parse(&source.field_path)
        .and_then(|path| path.resolve(document.root()).map(|s| s.text().to_string()))
        .map_err(|err| VarsError::PathNotFound {
            name: name.to_string(),
            path: source.field_path.clone(),
            source: err,
        })?;

    debug!(
        replacement = name,
        source = %document.id(),
        field_path = %source.field_path,
        "resolved source value"
    );
    Ok(value)
}
