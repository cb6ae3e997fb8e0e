use error::{ErrorCode, GraphqlError};
use operation::{ast::Field, ConstValue, Value};
use schema::{Arguments, FieldDefinition};

use super::ExecutionContext;

/// Argument values of a field: literals, bound variables and declared defaults.
pub(super) fn coerce_arguments(
    ctx: &ExecutionContext<'_>,
    definition: &FieldDefinition,
    field: &Field,
) -> Result<Arguments, GraphqlError> {
    let mut arguments = Arguments::with_capacity(definition.arguments.len());

    for (name, value) in &field.arguments {
        if let Value::Variable(variable) = &value.node {
            // An unbound variable leaves the argument unset.
            if ctx.variables.get(variable).is_none() {
                continue;
            }
        }
        arguments.insert(name.node.clone(), ctx.variables.resolve(&value.node));
    }

    for (name, argument) in &definition.arguments {
        match arguments.get(name) {
            Some(ConstValue::Null) if argument.ty.is_non_null() => {
                return Err(GraphqlError::new(
                    format!(r#"Argument "{name}" of non-null type "{}" must not be null."#, argument.ty),
                    ErrorCode::ArgumentError,
                ));
            }
            Some(_) => {}
            None => {
                if let Some(default_value) = &argument.default_value {
                    arguments.insert(name.clone(), default_value.clone());
                } else if argument.ty.is_non_null() {
                    return Err(GraphqlError::new(
                        format!(r#"Argument "{name}" of required type "{}" was not provided."#, argument.ty),
                        ErrorCode::ArgumentError,
                    ));
                }
            }
        }
    }

    Ok(arguments)
}
