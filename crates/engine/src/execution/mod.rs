mod arguments;
mod collect;
mod complete;
mod fields;
mod path;

use std::cell::RefCell;

use config::Config;
use deferred::{Deferred, MaybeDeferred};
use error::GraphqlError;
use operation::{ast::OperationType, ConstValue, ParsedOperation, Variables};
use schema::{Data, ObjectDefinition, Schema, TypeRef};

use crate::response::Response;

pub(crate) use path::{Path, PathKey};

/// Outcome of completing a value. An error means the value is null and the null propagates to
/// the nearest nullable parent; recoverable errors are recorded in the context instead.
pub(crate) type Completed<'a> = MaybeDeferred<'a, ConstValue, GraphqlError>;

/// State of one operation execution.
pub(crate) struct ExecutionContext<'a> {
    pub schema: &'a Schema,
    pub config: &'a Config,
    pub operation: &'a ParsedOperation,
    pub variables: &'a Variables,
    pub root_value: &'a serde_json::Value,
    pub data: &'a Data,
    errors: RefCell<Vec<GraphqlError>>,
}

impl<'a> ExecutionContext<'a> {
    pub fn new(
        schema: &'a Schema,
        config: &'a Config,
        operation: &'a ParsedOperation,
        variables: &'a Variables,
        root_value: &'a serde_json::Value,
        data: &'a Data,
    ) -> Self {
        ExecutionContext {
            schema,
            config,
            operation,
            variables,
            root_value,
            data,
            errors: RefCell::new(Vec::new()),
        }
    }

    /// Recovers from a located field error: a nullable value becomes `null` and the error is
    /// recorded, a non-null one propagates the error to its parent.
    pub fn handle_field_error(&self, error: GraphqlError, ty: &TypeRef) -> Result<ConstValue, GraphqlError> {
        if ty.is_non_null() {
            return Err(error);
        }
        self.errors.borrow_mut().push(error);
        Ok(ConstValue::Null)
    }

    /// Executes the root selection set on `root`, the root object of the operation type.
    /// Always deferred, so that the whole execution is driven by a single future.
    pub fn execute_operation(&'a self, root: &'a ObjectDefinition) -> Deferred<'a, ConstValue, GraphqlError> {
        Deferred::resolve(Ok(())).then(move |()| {
            let fields = collect::collect_fields(self, root, [self.operation.selection_set()]);
            match self.operation.ty() {
                OperationType::Mutation => fields::execute_fields_serially(self, root, self.root_value, fields),
                OperationType::Query | OperationType::Subscription => {
                    fields::execute_fields(self, root, self.root_value, None, fields)
                }
            }
        })
    }

    /// Builds the response envelope once the data settled. Never fails: a rejected execution is
    /// recorded and `data` becomes `null`.
    pub async fn build_response(&self, data: impl Into<Completed<'a>>) -> Response {
        let data: Completed<'a> = data.into();
        let data = match data.await {
            Ok(ConstValue::Object(data)) => Some(data),
            Ok(_) => None,
            Err(error) => {
                tracing::debug!("Error propagated up to the root, data is null: {error}");
                self.errors.borrow_mut().push(error);
                None
            }
        };

        Response {
            data,
            errors: self.errors.take(),
            ..Default::default()
        }
    }
}
