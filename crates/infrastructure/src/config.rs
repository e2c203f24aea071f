//! Function config loading.

use std::fs;
use std::path::Path;

use kvars_domain::VarsTransformerConfig;
use tracing::debug;

use crate::error::{InfraResult, InfrastructureError};
use crate::serialization::from_yaml;

/// Reads a transformer config from a YAML file.
///
/// # Errors
///
/// Returns an error if the file can't be read or isn't a valid config.
pub fn load_config(path: &Path) -> InfraResult<VarsTransformerConfig> {
    let contents = fs::read_to_string(path).map_err(|source| InfrastructureError::ReadFile {
        path: path.to_path_buf(),
        source,
    })?;
    let config = parse_config(&contents)?;
    debug!(
        path = %path.display(),
        replacements = config.replacements.len(),
        "loaded function config"
    );
    Ok(config)
}

/// Parses a transformer config from YAML text.
///
/// # Errors
///
/// Returns an error if the text isn't a valid config.
pub fn parse_config(yaml: &str) -> InfraResult<VarsTransformerConfig> {
    Ok(from_yaml(yaml)?)
}
