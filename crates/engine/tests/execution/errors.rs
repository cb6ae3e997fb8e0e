use engine::Request;
use pretty_assertions::assert_eq;
use serde_json::json;

use crate::fixtures::{fields_schema, new_engine, Log};

#[tokio::test]
async fn rejected_nullable_field_becomes_null() {
    let engine = new_engine(fields_schema());

    let response = engine.execute(Request::new("{ a rejected }")).await;

    insta::assert_json_snapshot!(response, @r#"
    {
      "data": {
        "a": 1,
        "rejected": null
      },
      "errors": [
        {
          "message": "X",
          "locations": [
            {
              "line": 1,
              "column": 5
            }
          ],
          "path": [
            "rejected"
          ]
        }
      ]
    }
    "#);
}

#[tokio::test]
async fn synchronous_resolver_error() {
    let engine = new_engine(fields_schema());

    let response = engine.execute(Request::new("{ failing c }")).await;

    insta::assert_json_snapshot!(response, @r#"
    {
      "data": {
        "failing": null,
        "c": 3
      },
      "errors": [
        {
          "message": "sync failure",
          "locations": [
            {
              "line": 1,
              "column": 3
            }
          ],
          "path": [
            "failing"
          ]
        }
      ]
    }
    "#);
}

#[tokio::test]
async fn non_null_root_field_nulls_the_data() {
    let engine = new_engine(fields_schema());

    let response = engine.execute(Request::new("{ a nonNullRejected }")).await;

    insta::assert_json_snapshot!(response, @r#"
    {
      "data": null,
      "errors": [
        {
          "message": "boom",
          "locations": [
            {
              "line": 1,
              "column": 5
            }
          ],
          "path": [
            "nonNullRejected"
          ]
        }
      ]
    }
    "#);
}

#[tokio::test]
async fn deferred_null_for_non_null_field() {
    let engine = new_engine(fields_schema());

    let response = engine.execute(Request::new("{ a nonNullDeferredNull }")).await;

    insta::assert_json_snapshot!(response, @r#"
    {
      "data": null,
      "errors": [
        {
          "message": "Cannot return null for non-nullable field Query.nonNullDeferredNull.",
          "locations": [
            {
              "line": 1,
              "column": 5
            }
          ],
          "path": [
            "nonNullDeferredNull"
          ]
        }
      ]
    }
    "#);
}

#[tokio::test]
async fn null_propagates_to_the_nearest_nullable_parent() {
    let engine = new_engine(fields_schema());

    let response = engine.execute(Request::new("{ anonymous { id name } a }")).await;

    insta::assert_json_snapshot!(response, @r#"
    {
      "data": {
        "anonymous": null,
        "a": 1
      },
      "errors": [
        {
          "message": "Cannot return null for non-nullable field User.name.",
          "locations": [
            {
              "line": 1,
              "column": 18
            }
          ],
          "path": [
            "anonymous",
            "name"
          ]
        }
      ]
    }
    "#);
}

#[tokio::test]
async fn rejected_non_null_field_of_a_nullable_object() {
    let engine = new_engine(fields_schema());

    let response = engine.execute(Request::new("{ user { id failingName } }")).await;

    insta::assert_json_snapshot!(response, @r#"
    {
      "data": {
        "user": null
      },
      "errors": [
        {
          "message": "name unavailable",
          "locations": [
            {
              "line": 1,
              "column": 13
            }
          ],
          "path": [
            "user",
            "failingName"
          ]
        }
      ]
    }
    "#);
}

#[tokio::test]
async fn propagation_through_deferred_objects_reports_a_single_error() {
    let engine = new_engine(fields_schema());

    let response = engine
        .execute(Request::new("{ user { bestFriend { id failingName } id } }"))
        .await;

    insta::assert_json_snapshot!(response, @r#"
    {
      "data": {
        "user": {
          "bestFriend": null,
          "id": "1"
        }
      },
      "errors": [
        {
          "message": "name unavailable",
          "locations": [
            {
              "line": 1,
              "column": 26
            }
          ],
          "path": [
            "user",
            "bestFriend",
            "failingName"
          ]
        }
      ]
    }
    "#);
}

#[tokio::test]
async fn scalar_serialization_errors() {
    let engine = new_engine(fields_schema());

    let response = engine.execute(Request::new("{ notAnInt color badColor }")).await;

    insta::assert_json_snapshot!(response, @r#"
    {
      "data": {
        "notAnInt": null,
        "color": "RED",
        "badColor": null
      },
      "errors": [
        {
          "message": "Enum \"Color\" cannot represent value: \"PURPLE\"",
          "locations": [
            {
              "line": 1,
              "column": 18
            }
          ],
          "path": [
            "badColor"
          ]
        },
        {
          "message": "Int cannot represent non-integer value: \"abc\"",
          "locations": [
            {
              "line": 1,
              "column": 3
            }
          ],
          "path": [
            "notAnInt"
          ]
        }
      ]
    }
    "#);
}

#[tokio::test]
async fn response_helpers() {
    let engine = new_engine(fields_schema());

    let ok = engine.execute(Request::new("{ a }")).await;
    assert!(ok.is_ok());
    assert!(!ok.has_request_errors());

    let partial = engine.execute(Request::new("{ a rejected }")).await;
    assert!(!partial.is_ok());
    assert!(!partial.has_request_errors());
    assert_eq!(partial.to_json()["data"], json!({"a": 1, "rejected": null}));
}

#[tokio::test]
async fn propagated_rejection_lets_siblings_settle() {
    let engine = new_engine(fields_schema());
    let log = Log::default();

    let response = engine
        .execute(Request::new("{ nonNullRejected logB rejected }").data(log.clone()))
        .await;

    assert_eq!(response.data, None);
    assert_eq!(
        response
            .to_json()["errors"]
            .as_array()
            .map(|errors| errors.iter().map(|error| (error["message"].clone(), error["path"].clone())).collect::<Vec<_>>()),
        Some(vec![
            (json!("X"), json!(["rejected"])),
            (json!("boom"), json!(["nonNullRejected"])),
        ])
    );
    assert_eq!(log.entries(), ["logB invoked", "logB settled"]);
}

#[tokio::test]
async fn synchronous_propagation_lets_started_siblings_settle() {
    let engine = new_engine(fields_schema());
    let log = Log::default();

    let response = engine
        .execute(Request::new("{ logB rejected nonNullFailing logA }").data(log.clone()))
        .await;

    insta::assert_json_snapshot!(response, @r#"
    {
      "data": null,
      "errors": [
        {
          "message": "X",
          "locations": [
            {
              "line": 1,
              "column": 8
            }
          ],
          "path": [
            "rejected"
          ]
        },
        {
          "message": "sync boom",
          "locations": [
            {
              "line": 1,
              "column": 17
            }
          ],
          "path": [
            "nonNullFailing"
          ]
        }
      ]
    }
    "#);
    // Fields after the failing one are never resolved.
    assert_eq!(log.entries(), ["logB invoked", "logB settled"]);
}
