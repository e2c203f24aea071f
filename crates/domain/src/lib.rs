//! kvars Domain - Documents and transformer configuration
//!
//! This crate defines the document tree the transformer rewrites and the
//! configuration types that drive it. All types here are pure Rust with no
//! I/O dependencies.

pub mod config;
pub mod document;
pub mod error;

pub use config::{
    ConfigMetadata, ObjectRef, Replacement, SourceRef, TOKEN_PREFIX, TOKEN_SUFFIX,
    VarsTransformerConfig, token_for,
};
pub use document::{Document, Mapping, Node, ResourceId, Scalar, ScalarKind};
pub use error::{DomainError, DomainResult};
