use std::sync::Arc;

use async_graphql_value::{ConstValue, Name};
use serde_json::{Number, Value};

pub const BUILTIN_SCALARS: [&str; 5] = ["Int", "Float", "String", "Boolean", "ID"];

#[derive(Clone)]
pub struct ScalarSerializer(Arc<dyn Fn(&Value) -> Result<ConstValue, String> + Send + Sync>);

impl std::fmt::Debug for ScalarSerializer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("ScalarSerializer(..)")
    }
}

#[derive(Debug, Clone)]
pub struct ScalarDefinition {
    pub name: Name,
    pub serializer: Option<ScalarSerializer>,
}

impl ScalarDefinition {
    pub fn new(name: impl AsRef<str>) -> Self {
        ScalarDefinition {
            name: Name::new(name),
            serializer: None,
        }
    }

    #[must_use]
    pub fn serializer(mut self, f: impl Fn(&Value) -> Result<ConstValue, String> + Send + Sync + 'static) -> Self {
        self.serializer = Some(ScalarSerializer(Arc::new(f)));
        self
    }

    pub fn is_builtin(&self) -> bool {
        BUILTIN_SCALARS.contains(&self.name.as_str())
    }

    /// Serializes a resolved value into a response value. Built-in scalars follow the usual
    /// GraphQL result coercion, custom scalars without a serializer pass the value through.
    pub fn serialize(&self, value: &Value) -> Result<ConstValue, String> {
        match self.name.as_str() {
            "Int" => serialize_int(value),
            "Float" => serialize_float(value),
            "String" => serialize_string(value),
            "Boolean" => serialize_boolean(value),
            "ID" => serialize_id(value),
            _ => match &self.serializer {
                Some(serializer) => (serializer.0)(value),
                None => ConstValue::from_json(value.clone()).map_err(|err| err.to_string()),
            },
        }
    }
}

fn coerce_number(value: &Value) -> Option<f64> {
    match value {
        Value::Bool(value) => Some(if *value { 1.0 } else { 0.0 }),
        Value::Number(number) => number.as_f64(),
        Value::String(value) if !value.is_empty() => value.trim().parse::<f64>().ok(),
        _ => None,
    }
    .filter(|number| number.is_finite())
}

fn serialize_int(value: &Value) -> Result<ConstValue, String> {
    let Some(number) = coerce_number(value).filter(|number| number.fract() == 0.0) else {
        return Err(format!("Int cannot represent non-integer value: {value}"));
    };
    if number > f64::from(i32::MAX) || number < f64::from(i32::MIN) {
        return Err(format!("Int cannot represent non 32-bit signed integer value: {value}"));
    }
    Ok(ConstValue::Number((number as i32).into()))
}

fn serialize_float(value: &Value) -> Result<ConstValue, String> {
    if let Value::Number(number) = value {
        return Ok(ConstValue::Number(number.clone()));
    }
    coerce_number(value)
        .and_then(Number::from_f64)
        .map(ConstValue::Number)
        .ok_or_else(|| format!("Float cannot represent non numeric value: {value}"))
}

fn serialize_string(value: &Value) -> Result<ConstValue, String> {
    match value {
        Value::String(value) => Ok(ConstValue::String(value.clone())),
        Value::Bool(value) => Ok(ConstValue::String(value.to_string())),
        Value::Number(number) => Ok(ConstValue::String(number.to_string())),
        _ => Err(format!("String cannot represent value: {value}")),
    }
}

fn serialize_boolean(value: &Value) -> Result<ConstValue, String> {
    match value {
        Value::Bool(value) => Ok(ConstValue::Boolean(*value)),
        Value::Number(number) => match number.as_f64() {
            Some(number) => Ok(ConstValue::Boolean(number != 0.0)),
            None => Err(format!("Boolean cannot represent a non boolean value: {value}")),
        },
        _ => Err(format!("Boolean cannot represent a non boolean value: {value}")),
    }
}

fn serialize_id(value: &Value) -> Result<ConstValue, String> {
    match value {
        Value::String(value) => Ok(ConstValue::String(value.clone())),
        Value::Number(number) if number.is_i64() || number.is_u64() => Ok(ConstValue::String(number.to_string())),
        _ => Err(format!("ID cannot represent value: {value}")),
    }
}
