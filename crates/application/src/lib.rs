//! kvars Application - Variable resolution and substitution
//!
//! Resolves `$(NAME)` variables from fields of documents in a collection and
//! substitutes them into every string scalar of the collection.
//!
//! # Usage
//!
//! ```
//! use kvars_application::VarsTransformer;
//! use kvars_domain::{Document, Node, ObjectRef, Replacement, SourceRef};
//!
//! let config_map = Node::mapping([
//!     ("apiVersion", Node::from("v1")),
//!     ("kind", Node::from("ConfigMap")),
//!     ("metadata", Node::mapping([("name", Node::from("config"))])),
//!     ("data", Node::mapping([("host", Node::from("db.local"))])),
//! ]);
//! let pod = Node::mapping([
//!     ("kind", Node::from("Pod")),
//!     ("metadata", Node::mapping([("name", Node::from("app"))])),
//!     ("env", Node::from("DB=$(DB_HOST)")),
//! ]);
//! let mut documents = vec![Document::new(config_map)?, Document::new(pod)?];
//!
//! let transformer = VarsTransformer::from_replacements(vec![Replacement::single(
//!     "DB_HOST",
//!     SourceRef::new(ObjectRef::any().with_kind("ConfigMap"), "data.host"),
//! )])?;
//! transformer.transform(&mut documents)?;
//!
//! assert_eq!(documents[1].root().get("env"), Some(&Node::from("DB=db.local")));
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod engine;
pub mod error;
pub mod field_path;
pub mod ports;
pub mod replacement;
pub mod selector;
pub mod substitute;
pub mod template;

pub use engine::VarsTransformer;
pub use error::{PathError, TemplateError, VarsError, VarsResult};
pub use field_path::{FieldPath, Segment, resolve_field_path};
pub use ports::ResourceFilter;
pub use replacement::{resolve_source, resolve_value};
pub use selector::select;
pub use substitute::Substitutions;
pub use template::Template;
