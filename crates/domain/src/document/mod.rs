//! In-memory document tree model.
//!
//! A [`Document`] is one resource manifest from the processed collection. Its
//! tree is made of ordered [`Node::Mapping`]s, [`Node::Sequence`]s and typed
//! [`Scalar`] leaves. Scalars keep their source text and [`yaml`] reads and
//! writes trees without losing it, so re-serialization keeps key order,
//! element order and number spelling.

mod node;
mod resource;
mod scalar;
pub mod yaml;

pub use node::{Mapping, Node};
pub use resource::{Document, ResourceId};
pub use scalar::{Scalar, ScalarKind};
