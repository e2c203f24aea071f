//! The vars transformer engine.
//!
//! Resolves every configured replacement against the document collection,
//! then substitutes the resulting `$(NAME)` tokens in all string scalars.

use indexmap::IndexMap;
use kvars_domain::{Document, Replacement, VarsTransformerConfig};
use tracing::{debug, info, warn};

use crate::error::{VarsError, VarsResult};
use crate::ports::ResourceFilter;
use crate::replacement::resolve_value;
use crate::substitute::Substitutions;
use crate::template::Template;

/// Resolves and substitutes variables across a document collection.
#[derive(Debug, Clone)]
pub struct VarsTransformer {
    replacements: Vec<Replacement>,
}

impl VarsTransformer {
    /// Creates a transformer from its function configuration.
    ///
    /// # Errors
    ///
    /// Returns [`VarsError::ConfigInvalid`] if the configuration has no
    /// replacements or any replacement is malformed.
    pub fn new(config: VarsTransformerConfig) -> VarsResult<Self> {
        Self::from_replacements(config.replacements)
    }

    /// Creates a transformer from a list of replacements.
    ///
    /// # Errors
    ///
    /// See [`VarsTransformer::new`].
    pub fn from_replacements(replacements: Vec<Replacement>) -> VarsResult<Self> {
        validate(&replacements)?;
        warn_duplicate_names(&replacements);
        Ok(Self { replacements })
    }

    /// The configured replacements.
    #[must_use]
    pub fn replacements(&self) -> &[Replacement] {
        &self.replacements
    }

    /// Resolves every replacement to a map from token to value.
    ///
    /// The map keeps replacement order. A later replacement with the same
    /// name overwrites the earlier value.
    ///
    /// # Errors
    ///
    /// Returns the first resolution error.
    pub fn resolve_all(&self, documents: &[Document]) -> VarsResult<IndexMap<String, String>> {
        let mut values = IndexMap::with_capacity(self.replacements.len());
        for replacement in &self.replacements {
            let value = resolve_value(replacement, documents)?;
            debug!(replacement = %replacement.name, value = %value, "resolved replacement");
            values.insert(replacement.token(), value);
        }
        Ok(values)
    }

    /// Resolves all replacements, then rewrites `documents` in place.
    ///
    /// Nothing is rewritten if any replacement fails to resolve.
    ///
    /// # Errors
    ///
    /// Returns the first resolution error.
    pub fn transform(&self, documents: &mut [Document]) -> VarsResult<()> {
        let substitutions = Substitutions::new(self.resolve_all(documents)?)?;
        let changed = substitutions.apply_all(documents);
        info!(
            documents = documents.len(),
            replacements = substitutions.values().len(),
            changed,
            "substituted variables"
        );
        Ok(())
    }
}

impl ResourceFilter for VarsTransformer {
    fn filter(&self, mut documents: Vec<Document>) -> VarsResult<Vec<Document>> {
        self.transform(&mut documents)?;
        Ok(documents)
    }
}

fn validate(replacements: &[Replacement]) -> VarsResult<()> {
    if replacements.is_empty() {
        return Err(VarsError::config_invalid(
            "at least one config replacement is required",
        ));
    }

    for replacement in replacements {
        let name = &replacement.name;
        if name.is_empty() {
            return Err(VarsError::config_invalid("a replacement must have a name"));
        }
        if replacement.source.is_none() && replacement.sources.is_empty() {
            return Err(VarsError::config_invalid(format!(
                "replacement {name} must have a source or sources"
            )));
        }
        if replacement.source.is_some() && !replacement.sources.is_empty() {
            return Err(VarsError::config_invalid(format!(
                "replacement {name} may not have a source and sources"
            )));
        }
        if replacement.sources.is_empty() {
            continue;
        }
        if replacement.template.is_empty() {
            return Err(VarsError::config_invalid(format!(
                "replacement {name} has sources but no template"
            )));
        }
        let placeholders = Template::parse(&replacement.template).placeholders();
        if placeholders != replacement.sources.len() {
            return Err(VarsError::config_invalid(format!(
                "replacement {name} template expects {placeholders} values but has {} sources",
                replacement.sources.len()
            )));
        }
    }

    Ok(())
}

fn warn_duplicate_names(replacements: &[Replacement]) {
    let mut seen = IndexMap::new();
    for replacement in replacements {
        *seen.entry(replacement.name.as_str()).or_insert(0_usize) += 1;
    }
    for (name, count) in seen.into_iter().filter(|(_, count)| *count > 1) {
        warn!(replacement = name, count, "duplicate replacement name, the last one wins");
    }
}
