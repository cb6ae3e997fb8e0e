use engine::Request;
use indoc::indoc;
use pretty_assertions::assert_eq;
use rstest::rstest;
use serde_json::json;

use crate::fixtures::{fields_schema, new_engine};

#[rstest]
#[case::skip_literal("{ a @skip(if: true) c }", json!({"c": 3}))]
#[case::include_literal("{ a @include(if: false) c @include(if: true) }", json!({"c": 3}))]
#[case::both_directives("{ a @skip(if: false) @include(if: false) c }", json!({"c": 3}))]
#[case::skipped_fragment("{ ... on Query @skip(if: true) { a } c }", json!({"c": 3}))]
#[case::unknown_field("{ a unknown c }", json!({"a": 1, "c": 3}))]
#[case::unknown_type_condition("{ ... on Mutation { a } c }", json!({"c": 3}))]
#[case::fragment_spread_once("{ ...F c ...F } fragment F on Query { a }", json!({"a": 1, "c": 3}))]
#[case::inline_fragment_without_condition("{ ... { c } a }", json!({"c": 3, "a": 1}))]
#[tokio::test]
async fn collected_fields(#[case] query: &str, #[case] expected: serde_json::Value) {
    let engine = new_engine(fields_schema());

    let response = engine.execute(Request::new(query)).await;

    assert_eq!(response.to_json(), json!({"data": expected}));
}

#[tokio::test]
async fn directives_with_variables() {
    let engine = new_engine(fields_schema());
    let query = indoc! {r#"
        query ($skipA: Boolean!, $withUser: Boolean = true) {
          a @skip(if: $skipA)
          user @include(if: $withUser) { name }
          c
        }
    "#};

    let response = engine
        .execute(Request::new(query).variables(json!({"skipA": true})))
        .await;
    assert_eq!(response.to_json(), json!({"data": {"user": {"name": "Ada"}, "c": 3}}));

    let response = engine
        .execute(Request::new(query).variables(json!({"skipA": false, "withUser": false})))
        .await;
    assert_eq!(response.to_json(), json!({"data": {"a": 1, "c": 3}}));
}

#[tokio::test]
async fn first_occurrence_decides_the_position() {
    let engine = new_engine(fields_schema());

    let response = engine
        .execute(Request::new("{ c ...F a } fragment F on Query { a b c }"))
        .await;

    let keys = response
        .data
        .as_ref()
        .map(|data| data.keys().map(|key| key.to_string()).collect::<Vec<_>>())
        .unwrap_or_default();
    assert_eq!(keys, ["c", "a", "b"]);
}
