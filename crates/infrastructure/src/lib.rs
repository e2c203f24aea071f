//! kvars Infrastructure - YAML and KRM function adapters
//!
//! This crate connects the transformer to real input: YAML document streams,
//! `ResourceList` envelopes and function config files.

pub mod config;
pub mod error;
pub mod pipeline;
pub mod resource_list;
pub mod serialization;

pub use config::{load_config, parse_config};
pub use error::{InfraResult, InfrastructureError};
pub use pipeline::{run_function, run_resource_list};
pub use resource_list::{RESOURCE_LIST_API_VERSION, RESOURCE_LIST_KIND, ResourceList};
pub use serialization::{
    SerializationError, from_node, from_yaml, from_yaml_stream, to_yaml, to_yaml_stream,
};
