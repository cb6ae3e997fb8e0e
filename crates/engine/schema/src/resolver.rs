use std::{future::Future, sync::Arc};

use async_graphql_value::{ConstValue, Name};
use deferred::{Deferred, MaybeDeferred};
use error::GraphqlError;
use indexmap::IndexMap;

use crate::{Data, FieldDefinition};

/// What a resolver hands back: a value available right away or one that settles later.
pub type Resolution = MaybeDeferred<'static, serde_json::Value, GraphqlError>;

/// Coerced argument values of a field, declared defaults included.
pub type Arguments = IndexMap<Name, ConstValue>;

/// Everything a resolver can see while resolving one field.
pub struct ResolverContext<'r> {
    pub parent: &'r serde_json::Value,
    pub parent_type: &'r str,
    pub field: &'r FieldDefinition,
    pub arguments: &'r Arguments,
    pub root: &'r serde_json::Value,
    pub data: &'r Data,
}

impl<'r> ResolverContext<'r> {
    pub fn argument(&self, name: &str) -> Option<&'r ConstValue> {
        self.arguments.get(name)
    }

    pub fn data<T: std::any::Any + Send + Sync>(&self) -> Option<&'r T> {
        self.data.get::<T>()
    }
}

#[derive(Clone)]
pub struct Resolver(Arc<dyn Fn(ResolverContext<'_>) -> Resolution + Send + Sync>);

impl Resolver {
    pub fn new(f: impl Fn(ResolverContext<'_>) -> Resolution + Send + Sync + 'static) -> Self {
        Resolver(Arc::new(f))
    }

    pub fn call(&self, ctx: ResolverContext<'_>) -> Resolution {
        (self.0)(ctx)
    }
}

impl std::fmt::Debug for Resolver {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("Resolver(..)")
    }
}

/// Property lookup of the field name on the parent object, `null` when there is none.
pub fn default_resolver(ctx: ResolverContext<'_>) -> Resolution {
    let value = ctx
        .parent
        .as_object()
        .and_then(|object| object.get(ctx.field.name.as_str()))
        .cloned()
        .unwrap_or_default();
    Resolution::ok(value)
}

/// Adopts a future as a deferred resolution.
pub fn defer<F>(future: F) -> Resolution
where
    F: Future<Output = Result<serde_json::Value, GraphqlError>> + 'static,
{
    MaybeDeferred::Deferred(Deferred::new(future))
}

/// Picks the concrete object type of a value for an interface or a union.
#[derive(Clone)]
pub struct TypeResolver(Arc<dyn Fn(&serde_json::Value) -> Option<String> + Send + Sync>);

impl TypeResolver {
    pub fn new(f: impl Fn(&serde_json::Value) -> Option<String> + Send + Sync + 'static) -> Self {
        TypeResolver(Arc::new(f))
    }

    pub fn call(&self, value: &serde_json::Value) -> Option<String> {
        (self.0)(value)
    }
}

impl std::fmt::Debug for TypeResolver {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("TypeResolver(..)")
    }
}
