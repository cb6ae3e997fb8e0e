use async_graphql_value::Name;
use indexmap::IndexMap;

use crate::{FieldDefinition, TypeResolver};

#[derive(Debug, Clone)]
pub struct InterfaceDefinition {
    pub name: Name,
    pub fields: IndexMap<Name, FieldDefinition>,
    pub type_resolver: Option<TypeResolver>,
    /// Objects implementing this interface, filled in when the schema is built.
    pub possible_types: Vec<Name>,
}

impl InterfaceDefinition {
    pub fn new(name: impl AsRef<str>) -> Self {
        InterfaceDefinition {
            name: Name::new(name),
            fields: IndexMap::new(),
            type_resolver: None,
            possible_types: Vec::new(),
        }
    }

    #[must_use]
    pub fn field(mut self, field: FieldDefinition) -> Self {
        self.fields.insert(field.name.clone(), field);
        self
    }

    #[must_use]
    pub fn type_resolver(mut self, f: impl Fn(&serde_json::Value) -> Option<String> + Send + Sync + 'static) -> Self {
        self.type_resolver = Some(TypeResolver::new(f));
        self
    }

    pub fn find_field_by_name(&self, name: &str) -> Option<&FieldDefinition> {
        self.fields.get(name)
    }
}
