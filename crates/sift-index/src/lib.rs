//! # Sift Index - Index descriptor contracts
//!
//! Describes search indices (name, field mappings, engine settings) for
//! tooling that creates or migrates them. The query side in `sift-query`
//! only ever needs an index *name*; everything else lives here.
//!
//! ## Quick Start
//!
//! ```
//! use sift_index::{IndexConfiguration, IndexConfigurationRepository, StaticIndexRepository};
//!
//! let repo = StaticIndexRepository::from_yaml_str(r#"
//! indices:
//!   - name: articles
//!     properties:
//!       title: { type: text }
//! "#).unwrap();
//!
//! for config in repo.configurations() {
//!     let descriptor = config.to_descriptor();
//!     assert_eq!(descriptor["index"], "articles");
//!     assert_eq!(descriptor["body"]["mappings"]["properties"]["title"]["type"], "text");
//! }
//! ```

mod descriptor;
mod error;
mod repository;

pub use descriptor::{IndexConfiguration, IndexDescriptor};
pub use error::{IndexConfigError, Result};
pub use repository::{IndexConfigurationRepository, StaticIndexRepository};
