//! Typed view of a raw engine response.
//!
//! The engine answers a search with:
//!
//! ```text
//! { hits: { total: <int | "int" | {value: int}>, hits: [ RawHit... ] } }
//! ```
//!
//! [`ResultSet::from_response`] normalizes `total` and keeps the hit records
//! exactly as they arrived.

use serde_json::Value;

use crate::error::ResponseError;

/// One matched document, as returned by the engine.
///
/// The record is kept untouched; the accessors only read the usual
/// `_index`, `_type`, `_id`, `_score` and `_source` keys.
#[derive(Debug, Clone, PartialEq)]
pub struct RawHit(Value);

impl RawHit {
    /// Wraps a raw hit record.
    pub fn new(record: Value) -> Self {
        RawHit(record)
    }

    /// The index the document lives in.
    pub fn index(&self) -> Option<&str> {
        self.0.get("_index").and_then(Value::as_str)
    }

    /// The legacy mapping type label.
    pub fn doc_type(&self) -> Option<&str> {
        self.0.get("_type").and_then(Value::as_str)
    }

    /// The document identity.
    pub fn id(&self) -> Option<&str> {
        self.0.get("_id").and_then(Value::as_str)
    }

    /// The relevance score. `None` when the engine did not score the hit.
    pub fn score(&self) -> Option<f64> {
        self.0.get("_score").and_then(Value::as_f64)
    }

    /// The stored document payload.
    pub fn source(&self) -> Option<&Value> {
        self.0.get("_source")
    }

    /// The full record.
    pub fn as_value(&self) -> &Value {
        &self.0
    }

    /// Consumes the hit, returning the full record.
    pub fn into_value(self) -> Value {
        self.0
    }
}

impl From<Value> for RawHit {
    fn from(record: Value) -> Self {
        RawHit(record)
    }
}

/// The hits of one search page plus the engine's total hit count.
///
/// [`count`](Self::count) is the number of hits on this page, which is not
/// [`total`](Self::total) once paging is in play. Iteration follows the
/// engine's order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ResultSet {
    total: u64,
    hits: Vec<RawHit>,
}

impl ResultSet {
    /// Creates a result set.
    pub fn new(total: u64, hits: Vec<RawHit>) -> Self {
        ResultSet { total, hits }
    }

    /// Creates an empty result set.
    pub fn empty() -> Self {
        ResultSet::default()
    }

    /// Adapts a raw search response.
    pub fn from_response(mut response: Value) -> Result<Self, ResponseError> {
        let hits = response
            .get_mut("hits")
            .filter(|hits| hits.is_object())
            .ok_or(ResponseError::MissingKey("hits"))?;

        let total = hits
            .get("total")
            .ok_or(ResponseError::MissingKey("hits.total"))
            .and_then(parse_total)?;

        let records = match hits.get_mut("hits").map(Value::take) {
            Some(Value::Array(records)) => records,
            Some(_) => return Err(ResponseError::NotAnArray("hits.hits")),
            None => return Err(ResponseError::MissingKey("hits.hits")),
        };

        Ok(ResultSet::new(
            total,
            records.into_iter().map(RawHit::new).collect(),
        ))
    }

    /// Total number of matching documents reported by the engine.
    pub fn total(&self) -> u64 {
        self.total
    }

    /// Number of hits on this page.
    pub fn count(&self) -> usize {
        self.hits.len()
    }

    /// Number of hits on this page.
    pub fn len(&self) -> usize {
        self.hits.len()
    }

    /// Returns `true` if this page holds no hits.
    pub fn is_empty(&self) -> bool {
        self.hits.is_empty()
    }

    /// The hits, in engine order.
    pub fn hits(&self) -> &[RawHit] {
        &self.hits
    }

    /// Iterates over the hits in engine order.
    pub fn iter(&self) -> std::slice::Iter<'_, RawHit> {
        self.hits.iter()
    }

    /// Iterates over the `_source` payloads of the hits that carry one.
    pub fn sources(&self) -> impl Iterator<Item = &Value> {
        self.hits.iter().filter_map(RawHit::source)
    }

    /// Consumes the set, returning the hits.
    pub fn into_hits(self) -> Vec<RawHit> {
        self.hits
    }
}

impl IntoIterator for ResultSet {
    type Item = RawHit;
    type IntoIter = std::vec::IntoIter<RawHit>;

    fn into_iter(self) -> Self::IntoIter {
        self.hits.into_iter()
    }
}

impl<'a> IntoIterator for &'a ResultSet {
    type Item = &'a RawHit;
    type IntoIter = std::slice::Iter<'a, RawHit>;

    fn into_iter(self) -> Self::IntoIter {
        self.hits.iter()
    }
}

/// Normalizes a total hit count.
///
/// Accepts a non-negative integer, a string holding one, or an object whose
/// `value` key holds either form. Returns `None` for anything else.
///
/// ```
/// use sift_query::normalize_total;
/// use serde_json::json;
///
/// assert_eq!(normalize_total(&json!(2)), Some(2));
/// assert_eq!(normalize_total(&json!("2")), Some(2));
/// assert_eq!(normalize_total(&json!({"value": 2, "relation": "eq"})), Some(2));
/// assert_eq!(normalize_total(&json!(-1)), None);
/// ```
pub fn normalize_total(total: &Value) -> Option<u64> {
    match total {
        Value::Number(n) => n.as_u64().or_else(|| {
            n.as_f64()
                .filter(|f| f.is_finite() && *f >= 0.0 && f.fract() == 0.0)
                .map(|f| f as u64)
        }),
        Value::String(s) => s.trim().parse().ok(),
        Value::Object(map) => map.get("value").and_then(normalize_total),
        _ => None,
    }
}

/// Reads the hit count from a count response.
///
/// Dedicated count endpoints answer `{count: n}`; a size-0 search answers
/// with `hits.total`. Both are accepted.
pub fn read_count(response: &Value) -> Result<u64, ResponseError> {
    if let Some(count) = response.get("count") {
        return parse_total(count);
    }
    response
        .get("hits")
        .and_then(|hits| hits.get("total"))
        .ok_or(ResponseError::MissingKey("hits.total"))
        .and_then(parse_total)
}

fn parse_total(total: &Value) -> Result<u64, ResponseError> {
    normalize_total(total).ok_or_else(|| ResponseError::InvalidTotal(total.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn hit(id: &str) -> Value {
        json!({
            "_index": "articles",
            "_type": "_doc",
            "_id": id,
            "_score": 1.5,
            "_source": {"title": format!("doc {id}")}
        })
    }

    #[test]
    fn adapts_response_with_string_total() {
        let response = json!({"hits": {"total": "2", "hits": [hit("1"), hit("2")]}});
        let results = ResultSet::from_response(response).unwrap();

        assert_eq!(results.total(), 2);
        assert_eq!(results.count(), 2);
        let ids: Vec<_> = results.iter().filter_map(RawHit::id).collect();
        assert_eq!(ids, ["1", "2"]);
    }

    #[test]
    fn total_forms_are_equivalent() {
        for total in [json!(2), json!("2"), json!({"value": 2}), json!({"value": "2"})] {
            let response = json!({"hits": {"total": total, "hits": [hit("a"), hit("b")]}});
            let results = ResultSet::from_response(response).unwrap();
            assert_eq!(results.total(), 2);
            assert_eq!(results.len(), 2);
        }
    }

    #[test]
    fn count_is_page_size_not_total() {
        let response = json!({"hits": {"total": {"value": 240, "relation": "eq"}, "hits": [hit("1")]}});
        let results = ResultSet::from_response(response).unwrap();

        assert_eq!(results.total(), 240);
        assert_eq!(results.count(), 1);
    }

    #[test]
    fn hits_pass_through_unchanged() {
        let record = hit("7");
        let response = json!({"hits": {"total": 1, "hits": [record.clone()]}});
        let results = ResultSet::from_response(response).unwrap();

        let first = &results.hits()[0];
        assert_eq!(first.as_value(), &record);
        assert_eq!(first.index(), Some("articles"));
        assert_eq!(first.doc_type(), Some("_doc"));
        assert_eq!(first.score(), Some(1.5));
        assert_eq!(first.source(), Some(&json!({"title": "doc 7"})));
    }

    #[test]
    fn missing_keys_are_reported() {
        assert_eq!(
            ResultSet::from_response(json!({})).unwrap_err(),
            ResponseError::MissingKey("hits")
        );
        assert_eq!(
            ResultSet::from_response(json!({"hits": {"hits": []}})).unwrap_err(),
            ResponseError::MissingKey("hits.total")
        );
        assert_eq!(
            ResultSet::from_response(json!({"hits": {"total": 0}})).unwrap_err(),
            ResponseError::MissingKey("hits.hits")
        );
    }

    #[test]
    fn invalid_shapes_are_reported() {
        assert!(matches!(
            ResultSet::from_response(json!({"hits": {"total": "many", "hits": []}})),
            Err(ResponseError::InvalidTotal(_))
        ));
        assert_eq!(
            ResultSet::from_response(json!({"hits": {"total": 1, "hits": {}}})).unwrap_err(),
            ResponseError::NotAnArray("hits.hits")
        );
    }

    #[test]
    fn normalize_total_edge_cases() {
        assert_eq!(normalize_total(&json!(0)), Some(0));
        assert_eq!(normalize_total(&json!(3.0)), Some(3));
        assert_eq!(normalize_total(&json!(3.5)), None);
        assert_eq!(normalize_total(&json!(" 12 ")), Some(12));
        assert_eq!(normalize_total(&json!("-4")), None);
        assert_eq!(normalize_total(&json!(null)), None);
        assert_eq!(normalize_total(&json!({"relation": "eq"})), None);
    }

    #[test]
    fn read_count_accepts_both_shapes() {
        assert_eq!(read_count(&json!({"count": 9})), Ok(9));
        assert_eq!(read_count(&json!({"hits": {"total": {"value": 9}, "hits": []}})), Ok(9));
        assert_eq!(
            read_count(&json!({"took": 1})),
            Err(ResponseError::MissingKey("hits.total"))
        );
    }

    #[test]
    fn iteration_owned_and_borrowed() {
        let results = ResultSet::new(2, vec![RawHit::new(hit("1")), RawHit::new(hit("2"))]);

        let borrowed: Vec<_> = (&results).into_iter().filter_map(RawHit::id).collect();
        assert_eq!(borrowed, ["1", "2"]);
        assert_eq!(results.sources().count(), 2);

        let owned: Vec<RawHit> = results.into_iter().collect();
        assert_eq!(owned.len(), 2);
    }

    #[test]
    fn empty_result_set() {
        let results = ResultSet::empty();
        assert!(results.is_empty());
        assert_eq!(results.total(), 0);
        assert!(results.into_hits().is_empty());
    }
}
