//! End-to-end function run over YAML text.
//!
//! Input is either a single `ResourceList` envelope, whose `functionConfig`
//! configures the transformer, or a plain multi-document stream used with an
//! explicit config. Output has the same shape as the input.

use kvars_application::{ResourceFilter, VarsTransformer};
use kvars_domain::{Document, VarsTransformerConfig};
use tracing::debug;

use crate::error::{InfraResult, InfrastructureError};
use crate::resource_list::ResourceList;
use crate::serialization::{from_yaml_stream, to_yaml_stream};

/// Runs the vars transformer over `input`.
///
/// An explicit `config` takes precedence over the list's `functionConfig`.
///
/// # Errors
///
/// Returns an error if the input can't be parsed, no config is available,
/// the config is invalid or any replacement fails to resolve.
pub fn run_function(input: &str, config: Option<VarsTransformerConfig>) -> InfraResult<String> {
    let mut documents = from_yaml_stream(input)?;

    if documents.len() == 1 && ResourceList::is_resource_list(&documents[0]) {
        let list = ResourceList::from_document(&documents.remove(0))?;
        return run_resource_list(list, config);
    }

    let config = config.ok_or(InfrastructureError::MissingFunctionConfig)?;
    debug!(documents = documents.len(), "processing document stream");
    let documents = apply(&VarsTransformer::new(config)?, documents)?;
    Ok(to_yaml_stream(&documents)?)
}

/// Runs the transformer over the items of a resource list.
///
/// # Errors
///
/// See [`run_function`].
pub fn run_resource_list(
    mut list: ResourceList,
    config: Option<VarsTransformerConfig>,
) -> InfraResult<String> {
    let config = match config {
        Some(config) => config,
        None => list
            .function_config()?
            .ok_or(InfrastructureError::MissingFunctionConfig)?,
    };
    debug!(items = list.items.len(), "processing resource list");

    let items = std::mem::take(&mut list.items);
    list.items = apply(&VarsTransformer::new(config)?, items)?;
    Ok(list.to_yaml()?)
}

fn apply<F: ResourceFilter>(filter: &F, documents: Vec<Document>) -> InfraResult<Vec<Document>> {
    Ok(filter.filter(documents)?)
}
