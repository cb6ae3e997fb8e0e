use async_graphql_value::Name;

use crate::TypeResolver;

#[derive(Debug, Clone)]
pub struct UnionDefinition {
    pub name: Name,
    pub members: Vec<Name>,
    pub type_resolver: Option<TypeResolver>,
}

impl UnionDefinition {
    pub fn new(name: impl AsRef<str>) -> Self {
        UnionDefinition {
            name: Name::new(name),
            members: Vec::new(),
            type_resolver: None,
        }
    }

    #[must_use]
    pub fn member(mut self, object: impl AsRef<str>) -> Self {
        self.members.push(Name::new(object));
        self
    }

    #[must_use]
    pub fn type_resolver(mut self, f: impl Fn(&serde_json::Value) -> Option<String> + Send + Sync + 'static) -> Self {
        self.type_resolver = Some(TypeResolver::new(f));
        self
    }
}
