use async_graphql_parser::types::OperationType;

use crate::TypeKind;

#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum SchemaError {
    #[error("Type '{0}' is defined more than once.")]
    DuplicateType(String),
    #[error("'{0}' is not a valid GraphQL name.")]
    InvalidName(String),
    #[error("Root type '{name}' for {operation} operations is not defined.")]
    MissingRootType { operation: OperationType, name: String },
    #[error("Root type '{name}' for {operation} operations must be an object type, found {kind}.")]
    RootTypeNotObject {
        operation: OperationType,
        name: String,
        kind: TypeKind,
    },
    #[error("Unknown type '{name}' referenced by '{location}'.")]
    UnknownType { name: String, location: String },
    #[error("Argument '{location}' must have an input type, found {kind} '{name}'.")]
    InvalidInputType {
        location: String,
        name: String,
        kind: TypeKind,
    },
    #[error("Union '{union}' can only include object types, found {kind} '{member}'.")]
    InvalidUnionMember { union: String, member: String, kind: TypeKind },
    #[error("Object '{object}' can only implement interfaces, found {kind} '{interface}'.")]
    InvalidInterface {
        object: String,
        interface: String,
        kind: TypeKind,
    },
}
