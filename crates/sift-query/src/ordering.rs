//! Sort modifiers for compiled requests.
//!
//! Provides [`Dir`] for sort direction and [`Sort`] for the single
//! field-based ordering a request may carry.

use std::str::FromStr;

use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};
use serde_json::{Map, Value};

use crate::error::QueryError;

/// Sort direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Dir {
    /// Ascending order (smallest first).
    #[default]
    Asc,
    /// Descending order (largest first).
    Desc,
}

impl Dir {
    /// Returns the wire name of this direction.
    pub fn as_str(self) -> &'static str {
        match self {
            Dir::Asc => "asc",
            Dir::Desc => "desc",
        }
    }
}

impl std::fmt::Display for Dir {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Dir {
    type Err = QueryError;

    /// Accepts `asc`/`ascending` and `desc`/`descending`, case-insensitively.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "asc" | "ascending" => Ok(Dir::Asc),
            "desc" | "descending" => Ok(Dir::Desc),
            _ => Err(QueryError::InvalidDirection(s.to_string())),
        }
    }
}

impl Serialize for Dir {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

/// A single ordering: field and direction.
///
/// Serializes to `{"<field>": "asc"|"desc"}`, the shape of `body.sort`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sort {
    /// The field to sort by.
    pub field: String,
    /// The sort direction.
    pub dir: Dir,
}

impl Sort {
    /// Creates a new ascending sort for the given field.
    pub fn asc(field: impl Into<String>) -> Self {
        Sort {
            field: field.into(),
            dir: Dir::Asc,
        }
    }

    /// Creates a new descending sort for the given field.
    pub fn desc(field: impl Into<String>) -> Self {
        Sort {
            field: field.into(),
            dir: Dir::Desc,
        }
    }

    /// Creates a new sort with the given direction.
    pub fn new(field: impl Into<String>, dir: Dir) -> Self {
        Sort {
            field: field.into(),
            dir,
        }
    }

    /// Returns the JSON form of this sort.
    pub fn to_value(&self) -> Value {
        let mut map = Map::with_capacity(1);
        map.insert(self.field.clone(), Value::from(self.dir.as_str()));
        Value::Object(map)
    }
}

impl Serialize for Sort {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(1))?;
        map.serialize_entry(&self.field, &self.dir)?;
        map.end()
    }
}
