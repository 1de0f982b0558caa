//! The index descriptor contract.
//!
//! An index descriptor names an index and carries its field mappings
//! ("properties") and engine settings. Index-management tooling reads
//! descriptors through [`IndexConfiguration`]; the query path never does.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Read-only view of one index's configuration.
///
/// # Example
///
/// ```
/// use sift_index::{IndexConfiguration, IndexDescriptor};
/// use serde_json::json;
///
/// let descriptor = IndexDescriptor::new("articles")
///     .with_property("title", json!({"type": "text"}))
///     .with_setting("number_of_shards", json!(1));
///
/// assert_eq!(descriptor.name(), "articles");
/// assert_eq!(
///     descriptor.to_descriptor(),
///     json!({
///         "index": "articles",
///         "body": {
///             "settings": {"number_of_shards": 1},
///             "mappings": {"properties": {"title": {"type": "text"}}}
///         }
///     })
/// );
/// ```
pub trait IndexConfiguration: Send + Sync {
    /// The index name.
    fn name(&self) -> &str;

    /// Field mappings, keyed by field name.
    fn properties(&self) -> &Map<String, Value>;

    /// Engine settings.
    fn settings(&self) -> &Map<String, Value>;

    /// The full descriptor as sent to an index-creation endpoint.
    fn to_descriptor(&self) -> Value {
        let mut mappings = Map::new();
        mappings.insert(
            "properties".into(),
            Value::Object(self.properties().clone()),
        );

        let mut body = Map::new();
        body.insert("settings".into(), Value::Object(self.settings().clone()));
        body.insert("mappings".into(), Value::Object(mappings));

        let mut descriptor = Map::new();
        descriptor.insert("index".into(), Value::from(self.name()));
        descriptor.insert("body".into(), Value::Object(body));
        Value::Object(descriptor)
    }
}

/// Owned index descriptor, as loaded from configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct IndexDescriptor {
    /// The index name.
    pub name: String,
    /// Field mappings.
    #[serde(default)]
    pub properties: Map<String, Value>,
    /// Engine settings.
    #[serde(default)]
    pub settings: Map<String, Value>,
}

impl IndexDescriptor {
    /// Creates a descriptor with no properties or settings.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Adds a field mapping.
    pub fn with_property(mut self, field: impl Into<String>, mapping: Value) -> Self {
        self.properties.insert(field.into(), mapping);
        self
    }

    /// Adds an engine setting.
    pub fn with_setting(mut self, key: impl Into<String>, value: Value) -> Self {
        self.settings.insert(key.into(), value);
        self
    }
}

impl IndexConfiguration for IndexDescriptor {
    fn name(&self) -> &str {
        &self.name
    }

    fn properties(&self) -> &Map<String, Value> {
        &self.properties
    }

    fn settings(&self) -> &Map<String, Value> {
        &self.settings
    }
}
