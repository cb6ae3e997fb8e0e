use engine::Request;
use pretty_assertions::assert_eq;
use serde_json::json;

use crate::fixtures::{fields_schema, new_engine, Gates, Log};

#[tokio::test]
async fn deferred_field_between_synchronous_ones() {
    let engine = new_engine(fields_schema());

    let response = engine.execute(Request::new("{ a b c }")).await;

    insta::assert_json_snapshot!(response, @r#"
    {
      "data": {
        "a": 1,
        "b": 2,
        "c": 3
      }
    }
    "#);
}

#[tokio::test]
async fn fields_keep_their_order_whatever_the_settlement_order() {
    let engine = new_engine(fields_schema());
    let (gates, mut senders) = Gates::new(["first", "second", "third"]);
    let request = Request::new("{ third first sync second }").data(gates);

    let (response, ()) = tokio::join!(engine.execute(request), async move {
        senders.remove("second").unwrap().send(json!("2")).unwrap();
        tokio::task::yield_now().await;
        senders.remove("third").unwrap().send(json!("3")).unwrap();
        tokio::task::yield_now().await;
        senders.remove("first").unwrap().send(json!("1")).unwrap();
    });

    insta::assert_json_snapshot!(response, @r#"
    {
      "data": {
        "third": "3",
        "first": "1",
        "sync": "s",
        "second": "2"
      }
    }
    "#);
}

#[tokio::test]
async fn sibling_resolvers_are_invoked_before_any_of_them_settles() {
    let engine = new_engine(fields_schema());
    let log = Log::default();

    let response = engine.execute(Request::new("{ logA logB }").data(log.clone())).await;

    assert_eq!(response.to_json(), json!({"data": {"logA": 1, "logB": 2}}));
    assert_eq!(
        log.entries(),
        ["logA invoked", "logB invoked", "logA settled", "logB settled"]
    );
}

#[tokio::test]
async fn aliases_and_merged_fields() {
    let engine = new_engine(fields_schema());

    let response = engine
        .execute(Request::new("{ y: b x: a user { id } a user { name } }"))
        .await;

    insta::assert_json_snapshot!(response, @r#"
    {
      "data": {
        "y": 2,
        "x": 1,
        "user": {
          "id": "1",
          "name": "Ada"
        },
        "a": 1
      }
    }
    "#);
}

#[tokio::test]
async fn nested_deferred_objects() {
    let engine = new_engine(fields_schema());

    let response = engine
        .execute(Request::new("{ user { deferredName bestFriend { name deferredName id } id } c }"))
        .await;

    insta::assert_json_snapshot!(response, @r#"
    {
      "data": {
        "user": {
          "deferredName": "Ada",
          "bestFriend": {
            "name": "Cy",
            "deferredName": "Cy",
            "id": "3"
          },
          "id": "1"
        },
        "c": 3
      }
    }
    "#);
}

#[test]
fn synchronous_execution_blocks_until_complete() {
    let engine = new_engine(fields_schema());

    let response = engine.execute_sync(Request::new("{ c b a }"));

    assert_eq!(response.to_json(), json!({"data": {"c": 3, "b": 2, "a": 1}}));
    let keys = response
        .data
        .map(|data| data.keys().map(|key| key.to_string()).collect::<Vec<_>>())
        .unwrap_or_default();
    assert_eq!(keys, ["c", "b", "a"]);
}
