use std::rc::Rc;

use deferred::{for_map, reject_after_settled, Deferred, MaybeDeferred};
use error::GraphqlError;
use indexmap::IndexMap;
use operation::ConstValue;
use schema::{ObjectDefinition, ResolverContext};

use super::{
    arguments::coerce_arguments,
    collect::{FieldGroups, FieldNodes},
    complete::{complete_or_recover, FieldInfo},
    Completed, ExecutionContext, Path,
};

/// Executes the fields of one selection set, all resolvers being invoked right away.
///
/// Without any deferred result the object is built directly. Otherwise the results are merged
/// in field order once they all settle. A propagated error rejects the whole level once the
/// fields started before it settled. Fields after it are not resolved.
pub(super) fn execute_fields<'a>(
    ctx: &'a ExecutionContext<'a>,
    parent_type: &'a ObjectDefinition,
    source: &serde_json::Value,
    path: Option<&Rc<Path>>,
    fields: FieldGroups<'a>,
) -> Completed<'a> {
    let mut results = IndexMap::with_capacity(fields.len());
    let mut contains_deferred = false;

    for (response_key, nodes) in fields {
        let field_path = Path::field(path, response_key.clone(), parent_type.name.clone());
        let Some(result) = execute_field(ctx, parent_type, source, nodes, field_path) else {
            continue;
        };
        match result {
            MaybeDeferred::Ready(Err(error)) => {
                // Fields already started still run to completion and record their own errors.
                return reject_after_settled(results.into_values(), error);
            }
            result => {
                contains_deferred |= result.is_deferred();
                results.insert(response_key, result);
            }
        }
    }

    if contains_deferred {
        tracing::trace!("Merging deferred fields of {}", parent_type.name);
        return for_map(results).map(ConstValue::Object).into();
    }

    let object = results
        .into_iter()
        .filter_map(|(response_key, result)| match result {
            MaybeDeferred::Ready(Ok(value)) => Some((response_key, value)),
            _ => None,
        })
        .collect();
    MaybeDeferred::ok(ConstValue::Object(object))
}

/// Executes the fields one after the other: a resolver is only invoked once the previous field
/// settled. Stays synchronous until the first deferred result.
pub(super) fn execute_fields_serially<'a>(
    ctx: &'a ExecutionContext<'a>,
    parent_type: &'a ObjectDefinition,
    source: &'a serde_json::Value,
    fields: FieldGroups<'a>,
) -> Completed<'a> {
    let mut results = IndexMap::with_capacity(fields.len());
    let mut fields = fields.into_iter();

    while let Some((response_key, nodes)) = fields.next() {
        let field_path = Path::field(None, response_key.clone(), parent_type.name.clone());
        match execute_field(ctx, parent_type, source, nodes, field_path) {
            None => {}
            Some(MaybeDeferred::Ready(Ok(value))) => {
                results.insert(response_key, value);
            }
            Some(MaybeDeferred::Ready(Err(error))) => return MaybeDeferred::err(error),
            Some(MaybeDeferred::Deferred(deferred)) => {
                tracing::trace!("Field {response_key} deferred, continuing serial execution asynchronously");
                return Deferred::new(async move {
                    results.insert(response_key, deferred.await?);
                    for (response_key, nodes) in fields {
                        let field_path = Path::field(None, response_key.clone(), parent_type.name.clone());
                        if let Some(result) = execute_field(ctx, parent_type, source, nodes, field_path) {
                            results.insert(response_key, result.await?);
                        }
                    }
                    Ok::<_, GraphqlError>(ConstValue::Object(results))
                })
                .into();
            }
        }
    }

    MaybeDeferred::ok(ConstValue::Object(results))
}

/// Resolves and completes one field. `None` when the field doesn't exist on the parent type.
fn execute_field<'a>(
    ctx: &'a ExecutionContext<'a>,
    parent_type: &'a ObjectDefinition,
    source: &serde_json::Value,
    nodes: FieldNodes<'a>,
    path: Rc<Path>,
) -> Option<Completed<'a>> {
    let node = *nodes.first()?;
    let field_name = &node.node.name.node;

    if field_name.as_str() == "__typename" {
        return Some(MaybeDeferred::ok(ConstValue::String(parent_type.name.to_string())));
    }

    let definition = parent_type.find_field_by_name(field_name)?;
    let result = match coerce_arguments(ctx, definition, &node.node) {
        Ok(arguments) => definition.resolve(ResolverContext {
            parent: source,
            parent_type: &parent_type.name,
            field: definition,
            arguments: &arguments,
            root: ctx.root_value,
            data: ctx.data,
        }),
        Err(error) => MaybeDeferred::err(error),
    };

    if ctx.config.field_tracing {
        tracing::trace!(
            parent_type = ?path.typename(),
            key = ?path.key(),
            deferred = result.is_deferred(),
            "Resolved {}.{}",
            parent_type.name,
            definition.name
        );
    }

    let info = FieldInfo {
        parent_type,
        definition,
        nodes,
    };
    Some(complete_or_recover(ctx, &definition.ty, &info, path, result))
}
