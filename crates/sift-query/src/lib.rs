//! Sift - boolean query builder and result adapter for document-search engines.
//!
//! Sift turns an application's search intent into the engine's native
//! boolean query and turns the engine's answer back into a typed result set.
//! It supports:
//!
//! - A closed set of clauses: match, multi-match, term, terms, range, exists
//! - Clause groups: must, should, filter
//! - Equality shortcuts folded into `must` as term clauses
//! - Free-text search over default fields
//! - Single-field sort and all-or-nothing pagination
//! - Total-count normalization across engine versions
//!
//! It does not execute queries. Requests go through an injected
//! [`SearchClient`].
//!
//! # Quick Start
//!
//! ```rust
//! use sift_query::{BuildCommand, Clause, Dir, Finder, MockClient};
//! use serde_json::json;
//!
//! // Any SearchClient works; the mock replays a canned answer.
//! let client = MockClient::responding(json!({
//!     "hits": {
//!         "total": "2",
//!         "hits": [
//!             {"_index": "articles", "_id": "1", "_score": 1.2, "_source": {"title": "Lorem"}},
//!             {"_index": "articles", "_id": "2", "_score": 0.8, "_source": {"title": "Ipsum"}}
//!         ]
//!     }
//! }));
//!
//! let command = BuildCommand::new()
//!     .index("articles")
//!     .where_eq("subtitle", "Dolor sit amet")
//!     .query("fuzzy search")
//!     .default_search_fields(["title", "body"])
//!     .filter(Clause::exists("published_at").unwrap())
//!     .order_by("id", Dir::Desc)
//!     .offset(0)
//!     .limit(10);
//!
//! let results = Finder::new(&client).find(&command).unwrap();
//! assert_eq!(results.total(), 2);
//! assert_eq!(results.count(), 2);
//!
//! let sent = client.last_request().unwrap().to_value().unwrap();
//! assert_eq!(
//!     sent["body"]["query"]["bool"]["must"][0],
//!     json!({"term": {"subtitle": "Dolor sit amet", "boost": 1.0}})
//! );
//! ```
//!
//! # Compilation Rules
//!
//! ```text
//! must   = explicit must clauses
//!        + one term (boost 1.0) per where entry, in insertion order
//!        + multi_match(query, default fields)   if query set and no explicit multi_match
//! should = explicit should clauses
//! filter = explicit filter clauses
//! sort   = {field: "asc"|"desc"}                if set
//! from, size                                    only if offset AND limit are set
//! ```
//!
//! A command with only an index compiles to a match-everything query with
//! all three sections present and empty.

mod clause;
mod client;
mod error;
mod finder;
mod ordering;
mod query;
mod request;
mod result;
mod value;

// Re-export public API
pub use clause::{Clause, RangeBounds, DEFAULT_BOOST, FUZZINESS_AUTO};
pub use client::{ClientFn, MockClient, MockClientError, SearchClient};
pub use error::{FindError, QueryError, ResponseError, Result};
pub use finder::Finder;
pub use ordering::{Dir, Sort};
pub use query::BuildCommand;
pub use request::{BoolQuery, CompiledRequest, QueryBody, RequestBody};
pub use result::{normalize_total, read_count, RawHit, ResultSet};
pub use value::{Number, TermValue};
