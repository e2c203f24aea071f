//! Document selection by identifying attributes.

use kvars_domain::{Document, ObjectRef};

/// Returns the documents matching every set attribute of `filter`, in input
/// order. Never fails; no match gives an empty result.
#[must_use]
pub fn select<'a>(documents: &'a [Document], filter: &ObjectRef) -> Vec<&'a Document> {
    documents
        .iter()
        .filter(|document| matches(document, filter))
        .collect()
}

/// Returns true if `document` matches every set attribute of `filter`.
///
/// Unset or empty attributes are wildcards. A document without a namespace
/// never matches a namespace filter.
#[must_use]
pub fn matches(document: &Document, filter: &ObjectRef) -> bool {
    attribute_matches(filter.api_version.as_deref(), document.api_version())
        && attribute_matches(filter.kind.as_deref(), document.kind())
        && attribute_matches(filter.namespace.as_deref(), document.namespace())
        && attribute_matches(filter.name.as_deref(), document.name())
}

fn attribute_matches(wanted: Option<&str>, actual: Option<&str>) -> bool {
    match wanted {
        None | Some("") => true,
        Some(wanted) => actual == Some(wanted),
    }
}
