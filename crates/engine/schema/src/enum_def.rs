use async_graphql_value::{ConstValue, Name};

#[derive(Debug, Clone)]
pub struct EnumDefinition {
    pub name: Name,
    pub values: Vec<Name>,
}

impl EnumDefinition {
    pub fn new(name: impl AsRef<str>) -> Self {
        EnumDefinition {
            name: Name::new(name),
            values: Vec::new(),
        }
    }

    #[must_use]
    pub fn value(mut self, value: impl AsRef<str>) -> Self {
        self.values.push(Name::new(value));
        self
    }

    pub fn serialize(&self, value: &serde_json::Value) -> Result<ConstValue, String> {
        value
            .as_str()
            .and_then(|value| self.values.iter().find(|declared| declared.as_str() == value))
            .map(|declared| ConstValue::Enum(declared.clone()))
            .ok_or_else(|| format!(r#"Enum "{}" cannot represent value: {value}"#, self.name))
    }
}
