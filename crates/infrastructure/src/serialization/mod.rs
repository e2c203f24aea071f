//! YAML serialization for document streams.
//!
//! Reads and writes multi-document YAML the way KRM functions exchange it:
//! - Documents separated by `---`
//! - Key and element order preserved
//! - Empty documents dropped on read

mod yaml;

pub use yaml::*;
