//! Repositories of index descriptors.
//!
//! [`StaticIndexRepository`] holds descriptors loaded from a YAML or JSON
//! document shaped like:
//!
//! ```yaml
//! indices:
//!   - name: articles
//!     settings:
//!       number_of_shards: 1
//!     properties:
//!       title: { type: text }
//! ```

use std::collections::HashSet;
use std::path::Path;

use serde::Deserialize;
use tracing::debug;

use crate::descriptor::{IndexConfiguration, IndexDescriptor};
use crate::error::{IndexConfigError, Result};

/// A source of index descriptors.
pub trait IndexConfigurationRepository {
    /// All known descriptors, in declaration order.
    fn configurations(&self) -> Vec<&dyn IndexConfiguration>;

    /// Looks up a descriptor by index name.
    fn get(&self, name: &str) -> Option<&dyn IndexConfiguration> {
        self.configurations()
            .into_iter()
            .find(|config| config.name() == name)
    }
}

#[derive(Debug, Deserialize)]
struct ConfigFile {
    #[serde(default)]
    indices: Vec<IndexDescriptor>,
}

/// A fixed set of descriptors, validated on construction.
///
/// Names are non-empty and unique; declaration order is kept.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StaticIndexRepository {
    indices: Vec<IndexDescriptor>,
}

impl StaticIndexRepository {
    /// Builds a repository from descriptors.
    ///
    /// # Errors
    ///
    /// [`IndexConfigError::EmptyName`] if a name is blank and
    /// [`IndexConfigError::DuplicateName`] if a name repeats.
    pub fn new(indices: Vec<IndexDescriptor>) -> Result<Self> {
        let mut seen = HashSet::new();
        for (position, index) in indices.iter().enumerate() {
            if index.name.trim().is_empty() {
                return Err(IndexConfigError::EmptyName { position });
            }
            if !seen.insert(index.name.as_str()) {
                return Err(IndexConfigError::DuplicateName(index.name.clone()));
            }
        }
        Ok(Self { indices })
    }

    /// Parses a YAML document.
    pub fn from_yaml_str(source: &str) -> Result<Self> {
        let file: ConfigFile = serde_yaml::from_str(source)?;
        Self::new(file.indices)
    }

    /// Parses a JSON document.
    pub fn from_json_str(source: &str) -> Result<Self> {
        let file: ConfigFile = serde_json::from_str(source)?;
        Self::new(file.indices)
    }

    /// Loads a configuration file. Files ending in `.json` are parsed as
    /// JSON; anything else as YAML.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let source =
            std::fs::read_to_string(path).map_err(|err| IndexConfigError::io(path, err))?;

        let is_json = path
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));

        let repository = if is_json {
            Self::from_json_str(&source)?
        } else {
            Self::from_yaml_str(&source)?
        };
        debug!(
            path = %path.display(),
            indices = repository.len(),
            "loaded index configuration"
        );
        Ok(repository)
    }

    /// Number of descriptors.
    pub fn len(&self) -> usize {
        self.indices.len()
    }

    /// Whether the repository holds no descriptors.
    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }

    /// The owned descriptors, in declaration order.
    pub fn descriptors(&self) -> &[IndexDescriptor] {
        &self.indices
    }

    /// Index names in declaration order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.indices.iter().map(|index| index.name.as_str())
    }
}

impl IndexConfigurationRepository for StaticIndexRepository {
    fn configurations(&self) -> Vec<&dyn IndexConfiguration> {
        self.indices
            .iter()
            .map(|index| index as &dyn IndexConfiguration)
            .collect()
    }
}
