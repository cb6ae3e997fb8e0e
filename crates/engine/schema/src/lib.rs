mod builder;
mod data;
mod enum_def;
mod field;
mod interface;
mod object;
mod resolver;
mod scalar;
mod type_ref;
mod union;

use async_graphql_parser::types::OperationType;
use async_graphql_value::Name;
use indexmap::IndexMap;

pub use builder::{SchemaBuilder, SchemaError};
pub use data::Data;
pub use enum_def::EnumDefinition;
pub use field::{FieldDefinition, InputValueDefinition};
pub use interface::InterfaceDefinition;
pub use object::ObjectDefinition;
pub use resolver::{default_resolver, defer, Arguments, Resolution, Resolver, ResolverContext, TypeResolver};
pub use scalar::{ScalarDefinition, ScalarSerializer, BUILTIN_SCALARS};
pub use type_ref::TypeRef;
pub use union::UnionDefinition;

/// An executable schema: type definitions and their resolvers.
#[derive(Debug)]
pub struct Schema {
    types: IndexMap<Name, TypeDefinition>,
    query_type: Name,
    mutation_type: Option<Name>,
    subscription_type: Option<Name>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, strum::Display, strum::AsRefStr)]
pub enum TypeKind {
    Scalar,
    Object,
    Interface,
    Union,
    Enum,
}

#[derive(Debug, Clone)]
pub enum TypeDefinition {
    Scalar(ScalarDefinition),
    Object(ObjectDefinition),
    Interface(InterfaceDefinition),
    Union(UnionDefinition),
    Enum(EnumDefinition),
}

impl TypeDefinition {
    pub fn name(&self) -> &Name {
        match self {
            TypeDefinition::Scalar(scalar) => &scalar.name,
            TypeDefinition::Object(object) => &object.name,
            TypeDefinition::Interface(interface) => &interface.name,
            TypeDefinition::Union(union) => &union.name,
            TypeDefinition::Enum(enum_def) => &enum_def.name,
        }
    }

    pub fn kind(&self) -> TypeKind {
        match self {
            TypeDefinition::Scalar(_) => TypeKind::Scalar,
            TypeDefinition::Object(_) => TypeKind::Object,
            TypeDefinition::Interface(_) => TypeKind::Interface,
            TypeDefinition::Union(_) => TypeKind::Union,
            TypeDefinition::Enum(_) => TypeKind::Enum,
        }
    }

    pub fn is_leaf(&self) -> bool {
        matches!(self, TypeDefinition::Scalar(_) | TypeDefinition::Enum(_))
    }

    pub fn is_abstract(&self) -> bool {
        matches!(self, TypeDefinition::Interface(_) | TypeDefinition::Union(_))
    }

    pub fn as_object(&self) -> Option<&ObjectDefinition> {
        match self {
            TypeDefinition::Object(object) => Some(object),
            _ => None,
        }
    }

    pub fn type_resolver(&self) -> Option<&TypeResolver> {
        match self {
            TypeDefinition::Interface(interface) => interface.type_resolver.as_ref(),
            TypeDefinition::Union(union) => union.type_resolver.as_ref(),
            _ => None,
        }
    }
}

impl From<ScalarDefinition> for TypeDefinition {
    fn from(scalar: ScalarDefinition) -> Self {
        TypeDefinition::Scalar(scalar)
    }
}

impl From<ObjectDefinition> for TypeDefinition {
    fn from(object: ObjectDefinition) -> Self {
        TypeDefinition::Object(object)
    }
}

impl From<InterfaceDefinition> for TypeDefinition {
    fn from(interface: InterfaceDefinition) -> Self {
        TypeDefinition::Interface(interface)
    }
}

impl From<UnionDefinition> for TypeDefinition {
    fn from(union: UnionDefinition) -> Self {
        TypeDefinition::Union(union)
    }
}

impl From<EnumDefinition> for TypeDefinition {
    fn from(enum_def: EnumDefinition) -> Self {
        TypeDefinition::Enum(enum_def)
    }
}

impl Schema {
    pub fn build(query_type: impl AsRef<str>) -> SchemaBuilder {
        SchemaBuilder::new(query_type)
    }

    pub fn definition_by_name(&self, name: &str) -> Option<&TypeDefinition> {
        self.types.get(name)
    }

    pub fn object_by_name(&self, name: &str) -> Option<&ObjectDefinition> {
        self.definition_by_name(name).and_then(TypeDefinition::as_object)
    }

    pub fn definitions(&self) -> impl Iterator<Item = &TypeDefinition> + '_ {
        self.types.values()
    }

    pub fn query_type(&self) -> &Name {
        &self.query_type
    }

    pub fn mutation_type(&self) -> Option<&Name> {
        self.mutation_type.as_ref()
    }

    pub fn subscription_type(&self) -> Option<&Name> {
        self.subscription_type.as_ref()
    }

    /// Root object for an operation type, if the schema supports that operation type.
    pub fn root_object(&self, ty: OperationType) -> Option<&ObjectDefinition> {
        let name = match ty {
            OperationType::Query => Some(&self.query_type),
            OperationType::Mutation => self.mutation_type.as_ref(),
            OperationType::Subscription => self.subscription_type.as_ref(),
        }?;
        self.object_by_name(name)
    }

    /// Whether `object` can be the runtime type of a value of the `parent` type.
    pub fn is_possible_type(&self, parent: &TypeDefinition, object: &str) -> bool {
        match parent {
            TypeDefinition::Object(parent) => parent.name.as_str() == object,
            TypeDefinition::Interface(interface) => interface.possible_types.iter().any(|name| name.as_str() == object),
            TypeDefinition::Union(union) => union.members.iter().any(|name| name.as_str() == object),
            TypeDefinition::Scalar(_) | TypeDefinition::Enum(_) => false,
        }
    }
}
