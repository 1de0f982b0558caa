//! Clause types for the boolean query grammar.
//!
//! A [`Clause`] is one node of the engine's query language. Each variant
//! serializes to a single-key object keyed by the engine clause type:
//!
//! | Variant | Wire form |
//! |---------|-----------|
//! | `Match` | `{"match": {field: {"query": q, "fuzziness": "auto"}}}` |
//! | `MultiMatch` | `{"multi_match": {"query": q, "fields": [...], "fuzziness": "auto"}}` |
//! | `Term` | `{"term": {field: value, "boost": b}}` |
//! | `Terms` | `{"terms": {field: [values]}}` |
//! | `Range` | `{"range": {field: {"gte": v, ...}}}` |
//! | `Exists` | `{"exists": {"field": f}}` |

use serde_json::{Map, Value};

use crate::error::{QueryError, Result};
use crate::value::TermValue;

/// Fuzziness policy attached to full-text clauses.
pub const FUZZINESS_AUTO: &str = "auto";

/// Boost applied to term clauses unless one is given.
pub const DEFAULT_BOOST: f64 = 1.0;

// Sits next to the field inside a term clause body.
const TERM_BOOST_KEY: &str = "boost";

/// One node of the boolean query grammar.
///
/// The set of variants is closed. Construct clauses through the validating
/// constructors ([`Clause::matching`], [`Clause::term`], ...), which reject
/// empty field names up front so that [`Clause::to_value`] cannot fail.
///
/// # Example
///
/// ```
/// use sift_query::Clause;
/// use serde_json::json;
///
/// let clause = Clause::term("status", "published").unwrap();
/// assert_eq!(
///     clause.to_value(),
///     Some(json!({"term": {"status": "published", "boost": 1.0}}))
/// );
/// ```
#[derive(Debug, Clone, PartialEq)]
pub enum Clause {
    /// Fuzzy full-text match on a single field.
    Match { field: String, query: String },
    /// Fuzzy full-text match across several fields.
    ///
    /// Emits nothing when `query` is absent or empty. An empty `fields`
    /// list leaves the choice of fields to the engine.
    MultiMatch {
        query: Option<String>,
        fields: Vec<String>,
    },
    /// Exact match on a single value.
    ///
    /// The field shares an object with the `boost` key, so a field literally
    /// named `boost` cannot be expressed; [`Clause::term`] rejects it.
    Term {
        field: String,
        value: TermValue,
        boost: f64,
    },
    /// Exact match on any of several values.
    Terms {
        field: String,
        values: Vec<TermValue>,
    },
    /// Bounded comparison on a field.
    Range { field: String, bounds: RangeBounds },
    /// The field has a value.
    Exists { field: String },
}

impl Clause {
    /// Creates a fuzzy single-field match clause.
    pub fn matching(field: impl Into<String>, query: impl Into<String>) -> Result<Self> {
        Ok(Clause::Match {
            field: checked_field(field, "match")?,
            query: query.into(),
        })
    }

    /// Creates a multi-field match clause.
    ///
    /// Passing no fields lets the engine pick its default fields.
    pub fn multi_match<I, S>(query: impl Into<String>, fields: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let fields = fields
            .into_iter()
            .map(|f| checked_field(f, "multi_match"))
            .collect::<Result<Vec<_>>>()?;
        Ok(Clause::MultiMatch {
            query: Some(query.into()),
            fields,
        })
    }

    /// Creates an exact-match clause with the default boost.
    pub fn term(field: impl Into<String>, value: impl Into<TermValue>) -> Result<Self> {
        Self::term_with_boost(field, value, DEFAULT_BOOST)
    }

    /// Creates an exact-match clause with an explicit boost.
    pub fn term_with_boost(
        field: impl Into<String>,
        value: impl Into<TermValue>,
        boost: f64,
    ) -> Result<Self> {
        let field = checked_field(field, "term")?;
        if field == TERM_BOOST_KEY {
            return Err(QueryError::ReservedField { field });
        }
        Ok(Clause::Term {
            field,
            value: value.into(),
            boost,
        })
    }

    /// Creates a set-membership clause.
    pub fn terms<I, V>(field: impl Into<String>, values: I) -> Result<Self>
    where
        I: IntoIterator<Item = V>,
        V: Into<TermValue>,
    {
        let field = checked_field(field, "terms")?;
        let values: Vec<TermValue> = values.into_iter().map(Into::into).collect();
        if values.is_empty() {
            return Err(QueryError::EmptyTerms { field });
        }
        Ok(Clause::Terms { field, values })
    }

    /// Creates a range clause.
    pub fn range(field: impl Into<String>, bounds: RangeBounds) -> Result<Self> {
        let field = checked_field(field, "range")?;
        if bounds.is_empty() {
            return Err(QueryError::EmptyRange { field });
        }
        Ok(Clause::Range { field, bounds })
    }

    /// Creates an existence filter.
    pub fn exists(field: impl Into<String>) -> Result<Self> {
        Ok(Clause::Exists {
            field: checked_field(field, "exists")?,
        })
    }

    /// Returns the engine clause-type name this clause serializes under.
    pub fn kind(&self) -> &'static str {
        match self {
            Clause::Match { .. } => "match",
            Clause::MultiMatch { .. } => "multi_match",
            Clause::Term { .. } => "term",
            Clause::Terms { .. } => "terms",
            Clause::Range { .. } => "range",
            Clause::Exists { .. } => "exists",
        }
    }

    /// Returns `true` for [`Clause::MultiMatch`].
    pub fn is_multi_match(&self) -> bool {
        matches!(self, Clause::MultiMatch { .. })
    }

    /// Serializes this clause into the engine's query grammar.
    ///
    /// Returns `None` only for a `MultiMatch` without query text.
    pub fn to_value(&self) -> Option<Value> {
        let body = match self {
            Clause::Match { field, query } => {
                let mut inner = Map::new();
                inner.insert("query".into(), Value::from(query.as_str()));
                inner.insert("fuzziness".into(), Value::from(FUZZINESS_AUTO));
                single(field, Value::Object(inner))
            }
            Clause::MultiMatch { query, fields } => {
                let query = query.as_deref().filter(|q| !q.is_empty())?;
                let mut inner = Map::new();
                inner.insert("query".into(), Value::from(query));
                if !fields.is_empty() {
                    inner.insert("fields".into(), Value::from(fields.clone()));
                }
                inner.insert("fuzziness".into(), Value::from(FUZZINESS_AUTO));
                Value::Object(inner)
            }
            Clause::Term {
                field,
                value,
                boost,
            } => {
                let mut inner = Map::new();
                inner.insert(field.clone(), value.to_json());
                inner.insert(TERM_BOOST_KEY.into(), Value::from(*boost));
                Value::Object(inner)
            }
            Clause::Terms { field, values } => single(
                field,
                Value::Array(values.iter().map(TermValue::to_json).collect()),
            ),
            Clause::Range { field, bounds } => single(field, bounds.to_value()),
            Clause::Exists { field } => single("field", Value::from(field.as_str())),
        };
        Some(single(self.kind(), body))
    }
}

/// Bounds for a [`Clause::Range`].
///
/// Only the bounds that are set are emitted.
///
/// ```
/// use sift_query::{Clause, RangeBounds};
/// use serde_json::json;
///
/// let clause = Clause::range("price", RangeBounds::new().gte(10).lt(20)).unwrap();
/// assert_eq!(
///     clause.to_value(),
///     Some(json!({"range": {"price": {"gte": 10, "lt": 20}}}))
/// );
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RangeBounds {
    /// Exclusive lower bound.
    pub gt: Option<TermValue>,
    /// Inclusive lower bound.
    pub gte: Option<TermValue>,
    /// Exclusive upper bound.
    pub lt: Option<TermValue>,
    /// Inclusive upper bound.
    pub lte: Option<TermValue>,
}

impl RangeBounds {
    /// Creates an unbounded range.
    pub fn new() -> Self {
        RangeBounds::default()
    }

    /// Sets the exclusive lower bound.
    pub fn gt(mut self, value: impl Into<TermValue>) -> Self {
        self.gt = Some(value.into());
        self
    }

    /// Sets the inclusive lower bound.
    pub fn gte(mut self, value: impl Into<TermValue>) -> Self {
        self.gte = Some(value.into());
        self
    }

    /// Sets the exclusive upper bound.
    pub fn lt(mut self, value: impl Into<TermValue>) -> Self {
        self.lt = Some(value.into());
        self
    }

    /// Sets the inclusive upper bound.
    pub fn lte(mut self, value: impl Into<TermValue>) -> Self {
        self.lte = Some(value.into());
        self
    }

    /// Returns `true` if no bound is set.
    pub fn is_empty(&self) -> bool {
        self.gt.is_none() && self.gte.is_none() && self.lt.is_none() && self.lte.is_none()
    }

    fn to_value(&self) -> Value {
        let mut map = Map::new();
        let bounds = [
            ("gt", &self.gt),
            ("gte", &self.gte),
            ("lt", &self.lt),
            ("lte", &self.lte),
        ];
        for (name, bound) in bounds {
            if let Some(value) = bound {
                map.insert(name.into(), value.to_json());
            }
        }
        Value::Object(map)
    }
}

fn checked_field(field: impl Into<String>, clause: &'static str) -> Result<String> {
    let field = field.into();
    if field.trim().is_empty() {
        return Err(QueryError::EmptyField { clause });
    }
    Ok(field)
}

fn single(key: &str, value: Value) -> Value {
    let mut map = Map::with_capacity(1);
    map.insert(key.to_string(), value);
    Value::Object(map)
}
