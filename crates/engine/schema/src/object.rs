use async_graphql_value::Name;
use indexmap::IndexMap;

use crate::FieldDefinition;

#[derive(Debug, Clone)]
pub struct ObjectDefinition {
    pub name: Name,
    pub fields: IndexMap<Name, FieldDefinition>,
    pub interfaces: Vec<Name>,
}

impl ObjectDefinition {
    pub fn new(name: impl AsRef<str>) -> Self {
        ObjectDefinition {
            name: Name::new(name),
            fields: IndexMap::new(),
            interfaces: Vec::new(),
        }
    }

    #[must_use]
    pub fn field(mut self, field: FieldDefinition) -> Self {
        self.fields.insert(field.name.clone(), field);
        self
    }

    #[must_use]
    pub fn implements(mut self, interface: impl AsRef<str>) -> Self {
        self.interfaces.push(Name::new(interface));
        self
    }

    pub fn find_field_by_name(&self, name: &str) -> Option<&FieldDefinition> {
        self.fields.get(name)
    }

    pub fn implements_interface(&self, interface: &str) -> bool {
        self.interfaces.iter().any(|name| name.as_str() == interface)
    }
}
