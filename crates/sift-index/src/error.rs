//! Error types for index configuration loading.

use std::io;
use std::path::PathBuf;

/// Errors that can occur while loading index descriptors.
#[derive(Debug, thiserror::Error)]
pub enum IndexConfigError {
    /// The configuration file could not be read.
    #[error("Failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The YAML document is not a valid configuration.
    #[error("Invalid YAML configuration: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// The JSON document is not a valid configuration.
    #[error("Invalid JSON configuration: {0}")]
    Json(#[from] serde_json::Error),

    /// A descriptor has an empty name.
    #[error("Index descriptor #{position} has an empty name.")]
    EmptyName { position: usize },

    /// Two descriptors share a name.
    #[error("Index '{0}' is declared more than once.")]
    DuplicateName(String),
}

impl IndexConfigError {
    /// Create an I/O error for the given path.
    pub fn io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

/// Result type for index configuration operations.
pub type Result<T> = std::result::Result<T, IndexConfigError>;
