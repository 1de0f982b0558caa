//! End-to-end checks of the compiled request and result adaptation.

use serde_json::{json, Value};
use sift_query::{
    BuildCommand, Clause, ClientFn, Dir, FindError, Finder, MockClient, MockClientError, Number,
    RangeBounds, ResultSet, Sort, TermValue,
};

fn compiled(command: &BuildCommand) -> Value {
    command.compile().to_value().unwrap()
}

fn response(total: Value, ids: &[&str]) -> Value {
    let hits: Vec<Value> = ids
        .iter()
        .map(|id| {
            json!({
                "_index": "articles",
                "_type": "_doc",
                "_id": id,
                "_score": 1.0,
                "_source": {"id": id}
            })
        })
        .collect();
    json!({"took": 3, "timed_out": false, "hits": {"total": total, "max_score": 1.0, "hits": hits}})
}

// ============================================================================
// Compiled request shape
// ============================================================================

#[test]
fn empty_command_compiles_to_match_all() {
    let value = compiled(&BuildCommand::new().index("articles"));

    assert_eq!(
        value,
        json!({
            "index": "articles",
            "body": {"query": {"bool": {"must": [], "should": [], "filter": []}}}
        })
    );
    assert!(value.get("from").is_none());
    assert!(value.get("size").is_none());
    assert!(value["body"].get("sort").is_none());
}

#[test]
fn full_command_compiles_to_expected_request() {
    let command = BuildCommand::new()
        .index("articles")
        .must(Clause::matching("title", "lorem ipsum").unwrap())
        .should(Clause::terms("tags", ["rust", "search"]).unwrap())
        .filter(Clause::exists("published_at").unwrap())
        .filter(Clause::range("views", RangeBounds::new().gte(100u32)).unwrap())
        .where_eq("subtitle", "Dolor sit amet")
        .where_eq("featured", true)
        .query("fuzzy search")
        .default_search_fields(["f1", "f2"])
        .sort(Sort::new("id", Dir::Desc))
        .offset(10)
        .limit(100);

    assert_eq!(
        compiled(&command),
        json!({
            "index": "articles",
            "body": {
                "query": {"bool": {
                    "must": [
                        {"match": {"title": {"query": "lorem ipsum", "fuzziness": "auto"}}},
                        {"term": {"subtitle": "Dolor sit amet", "boost": 1.0}},
                        {"term": {"featured": true, "boost": 1.0}},
                        {"multi_match": {"query": "fuzzy search", "fields": ["f1", "f2"], "fuzziness": "auto"}}
                    ],
                    "should": [{"terms": {"tags": ["rust", "search"]}}],
                    "filter": [
                        {"exists": {"field": "published_at"}},
                        {"range": {"views": {"gte": 100}}}
                    ]
                }},
                "sort": {"id": "desc"}
            },
            "from": 10,
            "size": 100
        })
    );
}

#[test]
fn where_only_command() {
    let command = BuildCommand::new()
        .index("articles")
        .set_where([("subtitle", "Dolor sit amet")]);

    assert_eq!(
        compiled(&command)["body"]["query"]["bool"]["must"],
        json!([{"term": {"subtitle": "Dolor sit amet", "boost": 1.0}}])
    );
}

#[test]
fn mixed_where_value_types() {
    let command = BuildCommand::new().index("i").set_where(vec![
        ("name", TermValue::from("x")),
        ("flag", TermValue::from(false)),
        ("ratio", TermValue::Number(Number::F64(0.5))),
        ("count", TermValue::from(-3i64)),
    ]);

    assert_eq!(
        compiled(&command)["body"]["query"]["bool"]["must"],
        json!([
            {"term": {"name": "x", "boost": 1.0}},
            {"term": {"flag": false, "boost": 1.0}},
            {"term": {"ratio": 0.5, "boost": 1.0}},
            {"term": {"count": -3, "boost": 1.0}}
        ])
    );
}

#[test]
fn partial_pagination_is_dropped() {
    let offset_only = compiled(&BuildCommand::new().index("i").offset(10));
    let limit_only = compiled(&BuildCommand::new().index("i").limit(100));

    for value in [offset_only, limit_only] {
        assert!(value.get("from").is_none());
        assert!(value.get("size").is_none());
    }
}

#[test]
fn zero_offset_counts_as_set() {
    let value = compiled(&BuildCommand::new().index("i").offset(0).limit(25));
    assert_eq!(value["from"], json!(0));
    assert_eq!(value["size"], json!(25));
}

#[test]
fn parsed_direction_drives_sort() {
    let dir: Dir = "descending".parse().unwrap();
    let value = compiled(&BuildCommand::new().index("i").order_by("id", dir));
    assert_eq!(value["body"]["sort"], json!({"id": "desc"}));
}

// ============================================================================
// Finder
// ============================================================================

#[test]
fn finder_rejects_command_without_index() {
    let client = MockClient::responding(response(json!(1), &["1"]));

    let result = Finder::new(&client).find(&BuildCommand::new().where_eq("a", 1));

    assert!(matches!(result, Err(FindError::InvalidQuery(_))));
    assert_eq!(client.call_count(), 0);
}

#[test]
fn finder_returns_hits_in_engine_order() {
    let client = MockClient::responding(response(json!({"value": 3, "relation": "eq"}), &["c", "a", "b"]));

    let results = Finder::new(&client)
        .find(&BuildCommand::new().index("articles"))
        .unwrap();

    let ids: Vec<&str> = results.iter().filter_map(|hit| hit.id()).collect();
    assert_eq!(ids, ["c", "a", "b"]);
    assert_eq!(results.total(), 3);
}

#[test]
fn finder_with_closure_client_sees_request() {
    let client = ClientFn::new(|request: &sift_query::CompiledRequest| {
        if request.index.as_deref() == Some("articles") {
            Ok(response(json!(1), &["1"]))
        } else {
            Err(MockClientError("unknown index".into()))
        }
    });
    let finder = Finder::new(client);

    assert_eq!(
        finder
            .find(&BuildCommand::new().index("articles"))
            .unwrap()
            .len(),
        1
    );
    let err = finder
        .find(&BuildCommand::new().index("other"))
        .unwrap_err();
    assert_eq!(err.to_string(), "unknown index");
}

#[test]
fn finder_is_shareable_across_threads() {
    let client = std::sync::Arc::new(MockClient::responding(response(json!(1), &["1"])));

    let handles: Vec<_> = (0..4)
        .map(|i| {
            let client = std::sync::Arc::clone(&client);
            std::thread::spawn(move || {
                let command = BuildCommand::new().index(format!("index-{i}"));
                Finder::new(client).find(&command).map(|r| r.total())
            })
        })
        .collect();

    for handle in handles {
        assert_eq!(handle.join().unwrap().unwrap(), 1);
    }
    assert_eq!(client.call_count(), 4);
}

// ============================================================================
// ResultSet
// ============================================================================

#[test]
fn result_set_from_numeric_string_total() {
    let results = ResultSet::from_response(response(json!("2"), &["1", "2"])).unwrap();
    assert_eq!(results.count(), 2);
    assert_eq!(results.hits().len(), 2);
}

#[test]
fn result_set_is_iterable_by_reference_and_value() {
    let results = ResultSet::from_response(response(json!(2), &["1", "2"])).unwrap();

    let mut seen = Vec::new();
    for hit in &results {
        seen.push(hit.id().unwrap().to_string());
    }
    assert_eq!(seen, ["1", "2"]);

    let sources: Vec<Value> = results.into_iter().map(|hit| hit.into_value()["_source"].clone()).collect();
    assert_eq!(sources, [json!({"id": "1"}), json!({"id": "2"})]);
}
