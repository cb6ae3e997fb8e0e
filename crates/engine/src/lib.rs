//! GraphQL execution over a programmatic schema, where resolvers may hand back deferred values.
//!
//! Fields of a selection set are resolved left to right. As long as every resolver answers
//! synchronously the response is assembled without allocating a single future; as soon as one
//! of them defers, the level is merged through an ordered combinator so the response keeps the
//! declared field order whatever the settlement order.

mod engine;
mod execution;
mod request;
mod response;

pub use config::{Config, OperationLimits};
pub use deferred::{for_list, for_map, Deferred, MaybeDeferred};
pub use engine::Engine;
pub use error::{ErrorCode, ErrorPath, ErrorPathSegment, GraphqlError, Location};
pub use operation::{ConstValue, Name};
pub use request::Request;
pub use response::Response;
pub use schema::{
    defer, Arguments, Data, EnumDefinition, FieldDefinition, InputValueDefinition, InterfaceDefinition,
    ObjectDefinition, Resolution, ResolverContext, ScalarDefinition, Schema, SchemaBuilder, SchemaError, TypeRef,
    UnionDefinition,
};
