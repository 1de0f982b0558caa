//! Query builder and compiler.
//!
//! The [`BuildCommand`] struct provides a fluent builder API for collecting
//! clauses, shortcuts, paging and sort, and compiles them into a
//! [`CompiledRequest`].

use indexmap::IndexMap;

use crate::clause::{Clause, DEFAULT_BOOST};
use crate::ordering::{Dir, Sort};
use crate::request::{BoolQuery, CompiledRequest, QueryBody, RequestBody};
use crate::value::TermValue;

/// A search command under construction.
///
/// Commands collect three clause groups that map onto the engine's boolean
/// query:
/// - **must**: all clauses must match and contribute to the score
/// - **should**: matching clauses raise the score
/// - **filter**: all clauses must match, without scoring
///
/// On top of that:
/// - `where` entries are equality shortcuts folded into `must` as term clauses
/// - a free-text `query` becomes a multi-field match over the default
///   search fields
/// - paging is emitted only when both offset and limit are set
///
/// Building never fails. A command without an index still compiles; the
/// [`Finder`](crate::Finder) refuses to execute it.
///
/// # Example
///
/// ```
/// use sift_query::{BuildCommand, Clause, Dir};
///
/// let request = BuildCommand::new()
///     .index("articles")
///     .must(Clause::matching("title", "rust").unwrap())
///     .where_eq("status", "published")
///     .filter(Clause::exists("author").unwrap())
///     .order_by("published_at", Dir::Desc)
///     .offset(0)
///     .limit(20)
///     .compile();
///
/// assert_eq!(request.bool_query().must.len(), 2);
/// assert_eq!(request.size, Some(20));
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BuildCommand {
    index: Option<String>,
    must: Vec<Clause>,
    should: Vec<Clause>,
    filter: Vec<Clause>,
    where_terms: IndexMap<String, TermValue>,
    query: Option<String>,
    default_search_fields: Vec<String>,
    offset: Option<usize>,
    limit: Option<usize>,
    sort: Option<Sort>,
}

impl BuildCommand {
    /// Creates a new empty command.
    ///
    /// Once given an index, an empty command matches all documents.
    pub fn new() -> Self {
        BuildCommand::default()
    }

    /// Sets the target index.
    pub fn index(mut self, index: impl Into<String>) -> Self {
        self.index = Some(index.into());
        self
    }

    // ========================================================================
    // Clause groups
    // ========================================================================

    /// Adds a `must` clause.
    pub fn must(mut self, clause: Clause) -> Self {
        self.must.push(clause);
        self
    }

    /// Adds a `should` clause.
    pub fn should(mut self, clause: Clause) -> Self {
        self.should.push(clause);
        self
    }

    /// Adds a `filter` clause.
    pub fn filter(mut self, clause: Clause) -> Self {
        self.filter.push(clause);
        self
    }

    /// Replaces the `must` clauses.
    pub fn set_must(mut self, clauses: impl IntoIterator<Item = Clause>) -> Self {
        self.must = clauses.into_iter().collect();
        self
    }

    /// Replaces the `should` clauses.
    pub fn set_should(mut self, clauses: impl IntoIterator<Item = Clause>) -> Self {
        self.should = clauses.into_iter().collect();
        self
    }

    /// Replaces the `filter` clauses.
    pub fn set_filter(mut self, clauses: impl IntoIterator<Item = Clause>) -> Self {
        self.filter = clauses.into_iter().collect();
        self
    }

    // ========================================================================
    // Shortcuts
    // ========================================================================

    /// Adds an equality shortcut.
    ///
    /// Setting the same field twice keeps its original position and the
    /// latest value. A field named `boost` collides with the term boost on
    /// the wire and is shadowed by it; match such a field with
    /// [`Clause::terms`] instead.
    pub fn where_eq(mut self, field: impl Into<String>, value: impl Into<TermValue>) -> Self {
        self.where_terms.insert(field.into(), value.into());
        self
    }

    /// Replaces all equality shortcuts, keeping the iteration order given.
    pub fn set_where<I, K, V>(mut self, terms: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<TermValue>,
    {
        self.where_terms = terms
            .into_iter()
            .map(|(k, v)| (k.into(), v.into()))
            .collect();
        self
    }

    /// Sets the free-text query.
    pub fn query(mut self, text: impl Into<String>) -> Self {
        self.query = Some(text.into());
        self
    }

    /// Sets the fields searched by the free-text query.
    pub fn default_search_fields<I, S>(mut self, fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.default_search_fields = fields.into_iter().map(Into::into).collect();
        self
    }

    // ========================================================================
    // Sort
    // ========================================================================

    /// Sets the sort, replacing any previous one.
    pub fn sort(mut self, sort: Sort) -> Self {
        self.sort = Some(sort);
        self
    }

    /// Sets the sort from a field and direction.
    pub fn order_by(self, field: impl Into<String>, dir: Dir) -> Self {
        self.sort(Sort::new(field, dir))
    }

    /// Sets an ascending sort.
    pub fn order_asc(self, field: impl Into<String>) -> Self {
        self.order_by(field, Dir::Asc)
    }

    /// Sets a descending sort.
    pub fn order_desc(self, field: impl Into<String>) -> Self {
        self.order_by(field, Dir::Desc)
    }

    // ========================================================================
    // Limits
    // ========================================================================

    /// Sets the number of hits to skip.
    ///
    /// Has no effect on the compiled request unless a limit is set too.
    pub fn offset(mut self, n: usize) -> Self {
        self.offset = Some(n);
        self
    }

    /// Sets the maximum number of hits to return.
    ///
    /// Has no effect on the compiled request unless an offset is set too.
    pub fn limit(mut self, n: usize) -> Self {
        self.limit = Some(n);
        self
    }

    // ========================================================================
    // Introspection
    // ========================================================================

    /// Returns the target index, if set.
    pub fn get_index(&self) -> Option<&str> {
        self.index.as_deref()
    }

    /// Returns `true` if the command can be executed (an index is set).
    pub fn is_valid(&self) -> bool {
        self.index.is_some()
    }

    /// Returns the `must` clauses.
    pub fn must_clauses(&self) -> &[Clause] {
        &self.must
    }

    /// Returns the `should` clauses.
    pub fn should_clauses(&self) -> &[Clause] {
        &self.should
    }

    /// Returns the `filter` clauses.
    pub fn filter_clauses(&self) -> &[Clause] {
        &self.filter
    }

    /// Returns the equality shortcuts in insertion order.
    pub fn where_terms(&self) -> &IndexMap<String, TermValue> {
        &self.where_terms
    }

    /// Returns the free-text query, if set.
    pub fn get_query(&self) -> Option<&str> {
        self.query.as_deref()
    }

    /// Returns the default search fields.
    pub fn get_default_search_fields(&self) -> &[String] {
        &self.default_search_fields
    }

    /// Returns the offset, if set.
    pub fn get_offset(&self) -> Option<usize> {
        self.offset
    }

    /// Returns the limit, if set.
    pub fn get_limit(&self) -> Option<usize> {
        self.limit
    }

    /// Returns the sort, if set.
    pub fn get_sort(&self) -> Option<&Sort> {
        self.sort.as_ref()
    }

    /// Returns `true` if the command has no clauses, shortcuts or query text.
    pub fn is_empty(&self) -> bool {
        self.must.is_empty()
            && self.should.is_empty()
            && self.filter.is_empty()
            && self.where_terms.is_empty()
            && self.query.is_none()
    }

    // ========================================================================
    // Compilation
    // ========================================================================

    /// Compiles the command into a request.
    ///
    /// `must` is assembled as: explicit must clauses, then one term clause
    /// per `where` entry, then the free-text multi-match (unless `must`
    /// already holds a multi-match clause). Compilation is pure and can be
    /// repeated.
    pub fn compile(&self) -> CompiledRequest {
        let mut must: Vec<_> = self.must.iter().filter_map(Clause::to_value).collect();
        must.extend(self.folded_where().filter_map(|clause| clause.to_value()));
        if let Some(value) = self.text_clause().and_then(|clause| clause.to_value()) {
            must.push(value);
        }

        let bool_query = BoolQuery {
            must,
            should: self.should.iter().filter_map(Clause::to_value).collect(),
            filter: self.filter.iter().filter_map(Clause::to_value).collect(),
        };

        let (from, size) = match (self.offset, self.limit) {
            (Some(offset), Some(limit)) => (Some(offset), Some(limit)),
            _ => (None, None),
        };

        CompiledRequest {
            index: self.index.clone(),
            body: RequestBody {
                query: QueryBody { bool_query },
                sort: self.sort.clone(),
            },
            from,
            size,
        }
    }

    fn folded_where(&self) -> impl Iterator<Item = Clause> + '_ {
        self.where_terms.iter().map(|(field, value)| Clause::Term {
            field: field.clone(),
            value: value.clone(),
            boost: DEFAULT_BOOST,
        })
    }

    fn text_clause(&self) -> Option<Clause> {
        let text = self.query.as_ref()?;
        // A multi_match without text emits nothing and does not count.
        if self
            .must
            .iter()
            .any(|clause| clause.is_multi_match() && clause.to_value().is_some())
        {
            return None;
        }
        Some(Clause::MultiMatch {
            query: Some(text.clone()),
            fields: self.default_search_fields.clone(),
        })
    }
}
