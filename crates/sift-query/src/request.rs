//! The compiled, engine-facing request.
//!
//! A [`CompiledRequest`] is what a [`BuildCommand`](crate::BuildCommand)
//! compiles into and what a [`SearchClient`](crate::SearchClient) receives:
//!
//! ```text
//! {
//!   index: string,
//!   body: {
//!     query: { bool: { must: [...], should: [...], filter: [...] } },
//!     sort?: { <field>: "asc"|"desc" },
//!   },
//!   from?: int,
//!   size?: int,
//! }
//! ```

use serde::Serialize;
use serde_json::Value;

use crate::ordering::Sort;

/// A complete search request.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CompiledRequest {
    /// Target index. `None` only when compiled from an invalid command.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub index: Option<String>,
    /// Query and sort.
    pub body: RequestBody,
    /// Offset of the first hit.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub from: Option<usize>,
    /// Maximum number of hits.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub size: Option<usize>,
}

impl CompiledRequest {
    /// Returns the same request reduced to counting: no hits, no sort.
    pub fn for_count(&self) -> CompiledRequest {
        CompiledRequest {
            index: self.index.clone(),
            body: RequestBody {
                query: self.body.query.clone(),
                sort: None,
            },
            from: None,
            size: Some(0),
        }
    }

    /// Returns the boolean query of this request.
    pub fn bool_query(&self) -> &BoolQuery {
        &self.body.query.bool_query
    }

    /// Converts the request into a JSON value.
    pub fn to_value(&self) -> serde_json::Result<Value> {
        serde_json::to_value(self)
    }
}

/// The `body` of a request.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RequestBody {
    pub query: QueryBody,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sort: Option<Sort>,
}

/// The `body.query` wrapper around the boolean query.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct QueryBody {
    #[serde(rename = "bool")]
    pub bool_query: BoolQuery,
}

/// A boolean query. All three sections are always present.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct BoolQuery {
    /// Clauses that must match and contribute to the score.
    pub must: Vec<Value>,
    /// Clauses that boost the score when they match.
    pub should: Vec<Value>,
    /// Clauses that must match without scoring.
    pub filter: Vec<Value>,
}

impl BoolQuery {
    /// Returns `true` if no section holds a clause (matches everything).
    pub fn is_match_all(&self) -> bool {
        self.must.is_empty() && self.should.is_empty() && self.filter.is_empty()
    }

    /// Total number of clauses across all sections.
    pub fn clause_count(&self) -> usize {
        self.must.len() + self.should.len() + self.filter.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn sample() -> CompiledRequest {
        CompiledRequest {
            index: Some("articles".into()),
            body: RequestBody {
                query: QueryBody {
                    bool_query: BoolQuery {
                        must: vec![json!({"term": {"a": 1, "boost": 1.0}})],
                        should: vec![],
                        filter: vec![json!({"exists": {"field": "b"}})],
                    },
                },
                sort: Some(Sort::desc("id")),
            },
            from: Some(10),
            size: Some(100),
        }
    }

    #[test]
    fn serializes_to_wire_shape() {
        assert_eq!(
            sample().to_value().unwrap(),
            json!({
                "index": "articles",
                "body": {
                    "query": {"bool": {
                        "must": [{"term": {"a": 1, "boost": 1.0}}],
                        "should": [],
                        "filter": [{"exists": {"field": "b"}}]
                    }},
                    "sort": {"id": "desc"}
                },
                "from": 10,
                "size": 100
            })
        );
    }

    #[test]
    fn absent_options_are_omitted() {
        let request = CompiledRequest {
            index: None,
            body: RequestBody {
                query: QueryBody {
                    bool_query: BoolQuery::default(),
                },
                sort: None,
            },
            from: None,
            size: None,
        };
        assert_eq!(
            request.to_value().unwrap(),
            json!({"body": {"query": {"bool": {"must": [], "should": [], "filter": []}}}})
        );
    }

    #[test]
    fn for_count_drops_paging_and_sort() {
        let count = sample().for_count();
        assert_eq!(count.index.as_deref(), Some("articles"));
        assert_eq!(count.from, None);
        assert_eq!(count.size, Some(0));
        assert!(count.body.sort.is_none());
        assert_eq!(count.bool_query(), sample().bool_query());
    }

    #[test]
    fn bool_query_counts() {
        assert!(BoolQuery::default().is_match_all());
        assert_eq!(sample().bool_query().clause_count(), 2);
        assert!(!sample().bool_query().is_match_all());
    }
}
