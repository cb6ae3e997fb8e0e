use async_graphql_value::{ConstValue, Name, Value};
use indexmap::IndexMap;

use crate::{Error, Location, ParsedOperation, Result};

/// Variable values of one request, bound against the variable definitions of the executed
/// operation. Undeclared inputs are dropped.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct Variables(IndexMap<Name, ConstValue>);

impl Variables {
    pub fn bind(operation: &ParsedOperation, mut input: serde_json::Map<String, serde_json::Value>) -> Result<Self> {
        let mut variables = IndexMap::new();

        for definition in &operation.definition.node.variable_definitions {
            let name = &definition.node.name.node;
            let ty = &definition.node.var_type.node;
            let location = Location::from(definition.pos);

            match input.remove(name.as_str()) {
                Some(serde_json::Value::Null) if !ty.nullable => {
                    return Err(Error::variable(format!(
                        r#"Variable "${name}" of non-null type "{ty}" must not be null."#
                    ))
                    .with_location(location));
                }
                Some(value) => {
                    let value = ConstValue::from_json(value).map_err(|err| {
                        Error::variable(format!(r#"Variable "${name}" got invalid value: {err}"#))
                            .with_location(location)
                    })?;
                    variables.insert(name.clone(), value);
                }
                None => {
                    if let Some(default_value) = &definition.node.default_value {
                        variables.insert(name.clone(), default_value.node.clone());
                    } else if !ty.nullable {
                        return Err(Error::variable(format!(
                            r#"Variable "${name}" of required type "{ty}" was not provided."#
                        ))
                        .with_location(location));
                    }
                }
            }
        }

        Ok(Variables(variables))
    }

    pub fn get(&self, name: &str) -> Option<&ConstValue> {
        self.0.get(name)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&Name, &ConstValue)> + '_ {
        self.0.iter()
    }

    /// Replaces variable references with their bound value, `null` when not provided.
    pub fn resolve(&self, value: &Value) -> ConstValue {
        let resolved = value
            .clone()
            .into_const_with(|name| Ok::<_, std::convert::Infallible>(self.get(&name).cloned().unwrap_or(ConstValue::Null)));
        match resolved {
            Ok(value) => value,
            Err(never) => match never {},
        }
    }
}

impl FromIterator<(Name, ConstValue)> for Variables {
    fn from_iter<T: IntoIterator<Item = (Name, ConstValue)>>(iter: T) -> Self {
        Variables(iter.into_iter().collect())
    }
}
