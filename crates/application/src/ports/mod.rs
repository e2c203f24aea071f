//! Port definitions (interfaces)
//!
//! Ports define the boundaries between the application core and external systems.
//! Each port is a trait that can be implemented or driven by adapters in the
//! infrastructure layer.

mod filter;

pub use filter::ResourceFilter;
