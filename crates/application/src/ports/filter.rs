//! Document filter port

use kvars_domain::Document;

use crate::VarsResult;

/// A step that rewrites a document collection.
///
/// Adapters in the infrastructure layer read documents, run them through a
/// filter and write the result back out.
pub trait ResourceFilter {
    /// Rewrites `documents` and hands them back.
    ///
    /// # Errors
    ///
    /// Returns an error if the filter cannot process the collection. No
    /// partial output is produced.
    fn filter(&self, documents: Vec<Document>) -> VarsResult<Vec<Document>>;
}
