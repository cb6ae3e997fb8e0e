use async_graphql_value::{ConstValue, Name};
use indexmap::IndexMap;

use crate::{default_resolver, Resolution, Resolver, ResolverContext, TypeRef};

#[derive(Debug, Clone)]
pub struct FieldDefinition {
    pub name: Name,
    pub ty: TypeRef,
    pub arguments: IndexMap<Name, InputValueDefinition>,
    pub resolver: Option<Resolver>,
}

impl FieldDefinition {
    pub fn new(name: impl AsRef<str>, ty: impl Into<TypeRef>) -> Self {
        FieldDefinition {
            name: Name::new(name),
            ty: ty.into(),
            arguments: IndexMap::new(),
            resolver: None,
        }
    }

    #[must_use]
    pub fn argument(mut self, argument: InputValueDefinition) -> Self {
        self.arguments.insert(argument.name.clone(), argument);
        self
    }

    #[must_use]
    pub fn resolver(mut self, f: impl Fn(ResolverContext<'_>) -> Resolution + Send + Sync + 'static) -> Self {
        self.resolver = Some(Resolver::new(f));
        self
    }

    /// Runs the field resolver, or the default property lookup when there is none.
    pub fn resolve(&self, ctx: ResolverContext<'_>) -> Resolution {
        match &self.resolver {
            Some(resolver) => resolver.call(ctx),
            None => default_resolver(ctx),
        }
    }
}

#[derive(Debug, Clone)]
pub struct InputValueDefinition {
    pub name: Name,
    pub ty: TypeRef,
    pub default_value: Option<ConstValue>,
}

impl InputValueDefinition {
    pub fn new(name: impl AsRef<str>, ty: impl Into<TypeRef>) -> Self {
        InputValueDefinition {
            name: Name::new(name),
            ty: ty.into(),
            default_value: None,
        }
    }

    #[must_use]
    pub fn default_value(mut self, value: impl Into<ConstValue>) -> Self {
        self.default_value = Some(value.into());
        self
    }
}
