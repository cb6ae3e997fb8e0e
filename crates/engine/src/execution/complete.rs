use std::rc::Rc;

use deferred::{for_list, reject_after_settled, MaybeDeferred};
use error::{GraphqlError, Location};
use operation::ConstValue;
use schema::{FieldDefinition, ObjectDefinition, TypeDefinition, TypeRef};

use super::{collect::FieldNodes, fields, Completed, ExecutionContext, Path};

/// The field a value belongs to, shared by the value and every item of it.
#[derive(Clone)]
pub(super) struct FieldInfo<'a> {
    pub parent_type: &'a ObjectDefinition,
    pub definition: &'a FieldDefinition,
    pub nodes: FieldNodes<'a>,
}

impl FieldInfo<'_> {
    /// Attaches the locations of the field nodes and the response path, unless the error
    /// already carries them from a nested field.
    pub fn locate(&self, error: GraphqlError, path: &Path) -> GraphqlError {
        error.located(self.nodes.iter().map(|node| Location::from(node.pos)), || {
            path.to_error_path()
        })
    }

    fn coordinate(&self) -> String {
        format!("{}.{}", self.parent_type.name, self.definition.name)
    }
}

/// Completes a value and handles its errors according to the nullability of `ty`: a nullable
/// value becomes `null`, a non-null one propagates the error.
pub(super) fn complete_or_recover<'a>(
    ctx: &'a ExecutionContext<'a>,
    ty: &'a TypeRef,
    info: &FieldInfo<'a>,
    path: Rc<Path>,
    result: MaybeDeferred<'a, serde_json::Value, GraphqlError>,
) -> Completed<'a> {
    match complete_value(ctx, ty, info, &path, result) {
        MaybeDeferred::Ready(Err(error)) => MaybeDeferred::Ready(ctx.handle_field_error(info.locate(error, &path), ty)),
        MaybeDeferred::Deferred(deferred) => {
            let info = info.clone();
            deferred
                .catch(move |error| MaybeDeferred::Ready(ctx.handle_field_error(info.locate(error, &path), ty)))
                .into()
        }
        completed => completed,
    }
}

pub(super) fn complete_value<'a>(
    ctx: &'a ExecutionContext<'a>,
    ty: &'a TypeRef,
    info: &FieldInfo<'a>,
    path: &Rc<Path>,
    result: MaybeDeferred<'a, serde_json::Value, GraphqlError>,
) -> Completed<'a> {
    match result {
        MaybeDeferred::Ready(Ok(value)) => complete_concrete(ctx, ty, info, path, value),
        MaybeDeferred::Ready(Err(error)) => MaybeDeferred::err(error),
        MaybeDeferred::Deferred(deferred) => {
            let (fulfilled_info, fulfilled_path) = (info.clone(), Rc::clone(path));
            let (rejected_info, rejected_path) = (info.clone(), Rc::clone(path));
            deferred
                .then_or_else(
                    move |value| complete_value(ctx, ty, &fulfilled_info, &fulfilled_path, MaybeDeferred::ok(value)),
                    move |error| {
                        let error = rejected_info.locate(error, &rejected_path);
                        MaybeDeferred::Ready(ctx.handle_field_error(error, ty))
                    },
                )
                .into()
        }
    }
}

fn complete_concrete<'a>(
    ctx: &'a ExecutionContext<'a>,
    ty: &'a TypeRef,
    info: &FieldInfo<'a>,
    path: &Rc<Path>,
    value: serde_json::Value,
) -> Completed<'a> {
    match ty {
        TypeRef::NonNull(inner) => match complete_concrete(ctx, inner, info, path, value) {
            MaybeDeferred::Ready(Ok(ConstValue::Null)) => MaybeDeferred::err(non_null_error(info)),
            MaybeDeferred::Deferred(deferred) => {
                let info = info.clone();
                deferred
                    .then(move |value| match value {
                        ConstValue::Null => MaybeDeferred::err(non_null_error(&info)),
                        value => MaybeDeferred::ok(value),
                    })
                    .into()
            }
            completed => completed,
        },
        _ if value.is_null() => MaybeDeferred::ok(ConstValue::Null),
        TypeRef::List(item_ty) => complete_list(ctx, item_ty, info, path, value),
        TypeRef::Named(name) => match ctx.schema.definition_by_name(name) {
            Some(TypeDefinition::Scalar(scalar)) => {
                MaybeDeferred::Ready(scalar.serialize(&value).map_err(GraphqlError::completion))
            }
            Some(TypeDefinition::Enum(enum_def)) => {
                MaybeDeferred::Ready(enum_def.serialize(&value).map_err(GraphqlError::completion))
            }
            Some(TypeDefinition::Object(object)) => complete_object(ctx, object, info, path, &value),
            Some(definition) => match resolve_runtime_type(ctx, definition, info, &value) {
                Ok(object) => complete_object(ctx, object, info, path, &value),
                Err(error) => MaybeDeferred::err(error),
            },
            None => MaybeDeferred::err(GraphqlError::completion(format!(r#"Unknown type "{name}"."#))),
        },
    }
}

fn non_null_error(info: &FieldInfo<'_>) -> GraphqlError {
    GraphqlError::completion(format!(
        "Cannot return null for non-nullable field {}.",
        info.coordinate()
    ))
}

/// Items are completed one by one with their index in the path. Items that defer are merged
/// back in order. An item propagating an error rejects the list once the items before it
/// settled.
fn complete_list<'a>(
    ctx: &'a ExecutionContext<'a>,
    item_ty: &'a TypeRef,
    info: &FieldInfo<'a>,
    path: &Rc<Path>,
    value: serde_json::Value,
) -> Completed<'a> {
    let serde_json::Value::Array(items) = value else {
        return MaybeDeferred::err(GraphqlError::completion(format!(
            r#"Expected Iterable, but did not find one for field "{}"."#,
            info.coordinate()
        )));
    };

    let mut completed_items = Vec::with_capacity(items.len());
    let mut contains_deferred = false;
    for (index, item) in items.into_iter().enumerate() {
        let item_path = Path::index(path, index);
        match complete_or_recover(ctx, item_ty, info, item_path, MaybeDeferred::ok(item)) {
            MaybeDeferred::Ready(Err(error)) => return reject_after_settled(completed_items, error),
            completed => {
                contains_deferred |= completed.is_deferred();
                completed_items.push(completed);
            }
        }
    }

    if contains_deferred {
        return for_list(completed_items).map(ConstValue::List).into();
    }

    let items = completed_items
        .into_iter()
        .filter_map(|completed| match completed {
            MaybeDeferred::Ready(Ok(value)) => Some(value),
            _ => None,
        })
        .collect();
    MaybeDeferred::ok(ConstValue::List(items))
}

fn complete_object<'a>(
    ctx: &'a ExecutionContext<'a>,
    object: &'a ObjectDefinition,
    info: &FieldInfo<'a>,
    path: &Rc<Path>,
    value: &serde_json::Value,
) -> Completed<'a> {
    let fields = super::collect::collect_fields(
        ctx,
        object,
        info.nodes.iter().copied().map(|node| &node.node.selection_set),
    );
    fields::execute_fields(ctx, object, value, Some(path), fields)
}

/// Runtime object type of a value of an interface or union type: the type resolver of the
/// abstract type if any, the `__typename` property of the value otherwise.
fn resolve_runtime_type<'a>(
    ctx: &'a ExecutionContext<'a>,
    abstract_type: &'a TypeDefinition,
    info: &FieldInfo<'a>,
    value: &serde_json::Value,
) -> Result<&'a ObjectDefinition, GraphqlError> {
    let abstract_name = abstract_type.name();
    let typename = match abstract_type.type_resolver() {
        Some(resolver) => resolver.call(value),
        None => value.get("__typename").and_then(serde_json::Value::as_str).map(str::to_owned),
    };

    let Some(typename) = typename else {
        return Err(GraphqlError::completion(format!(
            r#"Abstract type "{abstract_name}" must resolve to an Object type at runtime for field "{}". Either the "{abstract_name}" type should provide a type resolver or the value should have a "__typename" property."#,
            info.coordinate()
        )));
    };

    let object = match ctx.schema.definition_by_name(&typename) {
        Some(TypeDefinition::Object(object)) => object,
        Some(_) => {
            return Err(GraphqlError::completion(format!(
                r#"Abstract type "{abstract_name}" was resolved to a non-object type "{typename}"."#
            )))
        }
        None => {
            return Err(GraphqlError::completion(format!(
                r#"Abstract type "{abstract_name}" was resolved to a type "{typename}" that does not exist inside the schema."#
            )))
        }
    };

    if !ctx.schema.is_possible_type(abstract_type, &typename) {
        return Err(GraphqlError::completion(format!(
            r#"Runtime Object type "{typename}" is not a possible type for "{abstract_name}"."#
        )));
    }

    Ok(object)
}
