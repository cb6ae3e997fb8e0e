use std::{
    collections::HashMap,
    sync::{Arc, Mutex},
};

use engine::{
    defer, Config, ConstValue, Engine, EnumDefinition, FieldDefinition, GraphqlError, InputValueDefinition, InterfaceDefinition,
    ObjectDefinition, Resolution, ResolverContext, Schema, UnionDefinition,
};
use futures::channel::oneshot;
use serde_json::json;

/// Deferred values settled by the test, one per field name.
#[derive(Default)]
pub struct Gates(Mutex<HashMap<String, oneshot::Receiver<serde_json::Value>>>);

impl Gates {
    pub fn new<const N: usize>(names: [&str; N]) -> (Self, HashMap<String, oneshot::Sender<serde_json::Value>>) {
        let mut receivers = HashMap::new();
        let mut senders = HashMap::new();
        for name in names {
            let (sender, receiver) = oneshot::channel();
            receivers.insert(name.to_string(), receiver);
            senders.insert(name.to_string(), sender);
        }
        (Gates(Mutex::new(receivers)), senders)
    }

    fn open(&self, name: &str) -> Resolution {
        match self.0.lock().unwrap().remove(name) {
            Some(receiver) => defer(async move { receiver.await.map_err(|_| GraphqlError::resolver("gate dropped")) }),
            None => Resolution::err(GraphqlError::resolver("no gate")),
        }
    }
}

/// Resolver waiting on the gate of the same name.
pub fn gated(name: &'static str) -> impl Fn(ResolverContext<'_>) -> Resolution + Send + Sync + 'static {
    move |ctx| match ctx.data::<Gates>() {
        Some(gates) => gates.open(name),
        None => Resolution::err(GraphqlError::resolver("no gates")),
    }
}

/// Shared record of resolver invocations and settlements.
#[derive(Clone, Default)]
pub struct Log(Arc<Mutex<Vec<String>>>);

impl Log {
    pub fn push(&self, entry: impl Into<String>) {
        self.0.lock().unwrap().push(entry.into());
    }

    pub fn entries(&self) -> Vec<String> {
        self.0.lock().unwrap().clone()
    }
}

/// Resolver logging its invocation, then settling with `value` after yielding to the executor.
pub fn logged(name: &'static str, value: serde_json::Value) -> impl Fn(ResolverContext<'_>) -> Resolution + Send + Sync + 'static {
    move |ctx| {
        let Some(log) = ctx.data::<Log>().cloned() else {
            return Resolution::err(GraphqlError::resolver("no log"));
        };
        log.push(format!("{name} invoked"));
        let value = value.clone();
        defer(async move {
            tokio::task::yield_now().await;
            log.push(format!("{name} settled"));
            Ok(value)
        })
    }
}

fn rejected(message: &'static str) -> impl Fn(ResolverContext<'_>) -> Resolution + Send + Sync + 'static {
    move |_| defer(async move { Err(GraphqlError::resolver(message)) })
}

fn deferred(value: serde_json::Value) -> impl Fn(ResolverContext<'_>) -> Resolution + Send + Sync + 'static {
    move |_| {
        let value = value.clone();
        defer(async move { Ok(value) })
    }
}

fn ready(value: serde_json::Value) -> impl Fn(ResolverContext<'_>) -> Resolution + Send + Sync + 'static {
    move |_| Resolution::ok(value.clone())
}

fn string_argument(ctx: &ResolverContext<'_>, name: &str) -> String {
    match ctx.argument(name) {
        Some(ConstValue::String(value)) => value.clone(),
        _ => String::new(),
    }
}

pub fn new_engine(schema: Schema) -> Engine {
    Engine::new(Arc::new(schema), Config::default())
}

pub fn engine_with_config(schema: Schema, config: Config) -> Engine {
    Engine::new(Arc::new(schema), config)
}

/// Scalars and errors, sync or deferred, nullable or not.
pub fn fields_schema() -> Schema {
    let user = ObjectDefinition::new("User")
        .field(FieldDefinition::new("id", "ID!"))
        .field(FieldDefinition::new("name", "String!"))
        .field(FieldDefinition::new("nickname", "String"))
        .field(FieldDefinition::new("deferredName", "String!").resolver(|ctx| {
            let name = ctx.parent.get("name").cloned().unwrap_or_default();
            defer(async move { Ok(name) })
        }))
        .field(FieldDefinition::new("failingName", "String!").resolver(rejected("name unavailable")))
        .field(FieldDefinition::new("bestFriend", "User").resolver(deferred(json!({"id": "3", "name": "Cy"}))));

    let query = ObjectDefinition::new("Query")
        .field(FieldDefinition::new("a", "Int").resolver(ready(json!(1))))
        .field(FieldDefinition::new("b", "Int").resolver(deferred(json!(2))))
        .field(FieldDefinition::new("c", "Int").resolver(ready(json!(3))))
        .field(FieldDefinition::new("rejected", "Int").resolver(rejected("X")))
        .field(FieldDefinition::new("failing", "Int").resolver(|_| Resolution::err("sync failure".into())))
        .field(FieldDefinition::new("nonNullRejected", "Int!").resolver(rejected("boom")))
        .field(FieldDefinition::new("nonNullFailing", "Int!").resolver(|_| Resolution::err("sync boom".into())))
        .field(FieldDefinition::new("nonNullDeferredNull", "Int!").resolver(deferred(json!(null))))
        .field(FieldDefinition::new("notAnInt", "Int").resolver(deferred(json!("abc"))))
        .field(FieldDefinition::new("color", "Color").resolver(ready(json!("RED"))))
        .field(FieldDefinition::new("badColor", "Color").resolver(ready(json!("PURPLE"))))
        .field(FieldDefinition::new("user", "User").resolver(ready(json!({"id": "1", "name": "Ada"}))))
        .field(FieldDefinition::new("anonymous", "User").resolver(ready(json!({"id": "2", "name": null}))))
        .field(FieldDefinition::new("first", "String").resolver(gated("first")))
        .field(FieldDefinition::new("second", "String").resolver(gated("second")))
        .field(FieldDefinition::new("third", "String").resolver(gated("third")))
        .field(FieldDefinition::new("sync", "String").resolver(ready(json!("s"))))
        .field(FieldDefinition::new("logA", "Int").resolver(logged("logA", json!(1))))
        .field(FieldDefinition::new("logB", "Int").resolver(logged("logB", json!(2))))
        .field(
            FieldDefinition::new("greeting", "String")
                .argument(InputValueDefinition::new("name", "String").default_value(ConstValue::String("world".to_string())))
                .resolver(|ctx| {
                    let name = string_argument(&ctx, "name");
                    Resolution::ok(json!(format!("Hello {name}")))
                }),
        )
        .field(
            FieldDefinition::new("echo", "Int")
                .argument(InputValueDefinition::new("value", "Int!"))
                .resolver(|ctx| match ctx.argument("value") {
                    Some(value) => value.clone().into_json().map_err(|err| GraphqlError::resolver(err.to_string())).into(),
                    None => Resolution::ok(json!(null)),
                }),
        );

    Schema::build("Query")
        .register(query)
        .register(user)
        .register(EnumDefinition::new("Color").value("RED").value("GREEN"))
        .finish()
        .unwrap()
}

/// Lists of scalars and objects, with deferred items.
pub fn lists_schema() -> Schema {
    let item = ObjectDefinition::new("Item")
        .field(FieldDefinition::new("id", "Int!"))
        .field(FieldDefinition::new("label", "String").resolver(|ctx| {
            let id = ctx.parent.get("id").cloned().unwrap_or_default();
            defer(async move {
                tokio::task::yield_now().await;
                Ok(json!(format!("item {id}")))
            })
        }))
        .field(FieldDefinition::new("loggedLabel", "String").resolver(logged("label", json!("logged"))))
        .field(FieldDefinition::new("strictLabel", "String!").resolver(|ctx| {
            let id = ctx.parent.get("id").and_then(serde_json::Value::as_i64).unwrap_or_default();
            defer(async move {
                if id == 2 {
                    Err(GraphqlError::resolver("no label for 2"))
                } else {
                    Ok(json!(format!("item {id}")))
                }
            })
        }));

    let query = ObjectDefinition::new("Query")
        .field(FieldDefinition::new("withNullItem", "[Item!]").resolver(ready(json!([{"id": 1}, {"id": 2}, null]))))
        .field(FieldDefinition::new("numbers", "[Int]").resolver(ready(json!([1, "x", 3]))))
        .field(FieldDefinition::new("strictNumbers", "[Int!]").resolver(ready(json!([1, "x", 3]))))
        .field(FieldDefinition::new("deferredNumbers", "[Int!]!").resolver(deferred(json!([1, 2, 3]))))
        .field(FieldDefinition::new("matrix", "[[Int]]").resolver(ready(json!([[1, 2], [], null, [3]]))))
        .field(FieldDefinition::new("notAList", "[Int]").resolver(ready(json!(5))))
        .field(FieldDefinition::new("deferredNotAList", "[Int]").resolver(deferred(json!({"a": 1}))))
        .field(FieldDefinition::new("items", "[Item]").resolver(ready(json!([{"id": 1}, {"id": 2}, {"id": 3}]))))
        .field(FieldDefinition::new("emptyItems", "[Item!]!").resolver(ready(json!([]))));

    Schema::build("Query")
        .register(query)
        .register(item)
        .finish()
        .unwrap()
}

/// Interfaces, unions and fragments.
pub fn search_schema() -> Schema {
    let search = json!([
        {"__typename": "Book", "id": "b1", "title": "Dune"},
        {"__typename": "Author", "id": "a1", "name": "Frank"},
    ]);

    let query = ObjectDefinition::new("Query")
        .field(FieldDefinition::new("search", "[SearchResult!]!").resolver(ready(search)))
        .field(
            FieldDefinition::new("node", "Node")
                .argument(InputValueDefinition::new("id", "ID!"))
                .resolver(|ctx| {
                    let id = string_argument(&ctx, "id");
                    defer(async move {
                        Ok(match id.as_str() {
                            "b1" => json!({"kind": "book", "id": "b1", "title": "Dune"}),
                            "a1" => json!({"kind": "author", "id": "a1", "name": "Frank"}),
                            "x" => json!({"kind": "unknown", "id": "x"}),
                            _ => json!(null),
                        })
                    })
                }),
        )
        .field(FieldDefinition::new("untyped", "SearchResult").resolver(ready(json!({"id": "b1"}))))
        .field(FieldDefinition::new("misplaced", "SearchResult").resolver(ready(json!({"__typename": "Query"}))))
        .field(FieldDefinition::new("ghost", "SearchResult").resolver(ready(json!({"__typename": "Ghost"}))));

    let node = InterfaceDefinition::new("Node")
        .field(FieldDefinition::new("id", "ID!"))
        .type_resolver(|value| match value.get("kind").and_then(serde_json::Value::as_str) {
            Some("book") => Some("Book".to_string()),
            Some("author") => Some("Author".to_string()),
            _ => None,
        });

    Schema::build("Query")
        .register(query)
        .register(node)
        .register(
            ObjectDefinition::new("Book")
                .implements("Node")
                .field(FieldDefinition::new("id", "ID!"))
                .field(FieldDefinition::new("title", "String!")),
        )
        .register(
            ObjectDefinition::new("Author")
                .implements("Node")
                .field(FieldDefinition::new("id", "ID!"))
                .field(FieldDefinition::new("name", "String!")),
        )
        .register(UnionDefinition::new("SearchResult").member("Book").member("Author"))
        .finish()
        .unwrap()
}

/// Mutation fields logging their invocation and settlement.
pub fn mutation_schema() -> Schema {
    let query = ObjectDefinition::new("Query").field(FieldDefinition::new("version", "Int").resolver(ready(json!(1))));
    let mutation = ObjectDefinition::new("Mutation")
        .field(FieldDefinition::new("first", "Int").resolver(logged("first", json!(1))))
        .field(FieldDefinition::new("second", "Int").resolver(logged("second", json!(2))))
        .field(FieldDefinition::new("sync", "Int").resolver(|ctx| {
            if let Some(log) = ctx.data::<Log>() {
                log.push("sync invoked");
            }
            Resolution::ok(json!(0))
        }))
        .field(FieldDefinition::new("failing", "Int!").resolver(|ctx| {
            if let Some(log) = ctx.data::<Log>() {
                log.push("failing invoked");
            }
            defer(async { Err(GraphqlError::resolver("mutation failed")) })
        }));

    Schema::build("Query")
        .mutation("Mutation")
        .subscription("Query")
        .register(query)
        .register(mutation)
        .finish()
        .unwrap()
}
