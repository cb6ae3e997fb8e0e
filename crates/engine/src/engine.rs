use std::{convert::Infallible, sync::Arc};

use config::Config;
use deferred::Deferred;
use error::{ErrorCode, ErrorCodeCounter, GraphqlError};
use operation::{ParsedOperation, Variables};
use schema::Schema;
use tracing::Instrument;

use crate::{execution::ExecutionContext, request::Request, response::Response};

pub struct Engine {
    schema: Arc<Schema>,
    config: Config,
}

impl Engine {
    pub fn new(schema: Arc<Schema>, config: Config) -> Self {
        Engine { schema, config }
    }

    pub fn schema(&self) -> &Arc<Schema> {
        &self.schema
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Executes a request on the current task. Never fails: every error ends up in the
    /// response.
    pub async fn execute(&self, request: Request) -> Response {
        let Request {
            query,
            operation_name,
            variables,
            root_value,
            data,
        } = request;

        let operation =
            match ParsedOperation::prepare(operation_name.as_deref(), &query, &self.config.operation_limits) {
                Ok(operation) => operation,
                Err(err) => {
                    tracing::debug!("Invalid operation: {err}");
                    return self.finalize(Response::request_error(err));
                }
            };

        let ty = operation.ty();
        let Some(root) = self.schema.root_object(ty) else {
            tracing::debug!("Schema has no root type for {ty} operations");
            return self.finalize(Response::request_error(GraphqlError::new(
                format!("Schema is not configured to execute {ty} operation."),
                ErrorCode::BadRequest,
            )));
        };

        let variables = match Variables::bind(&operation, variables) {
            Ok(variables) => variables,
            Err(err) => {
                tracing::debug!("Invalid variables: {err}");
                return self.finalize(Response::request_error(err));
            }
        };

        let span = tracing::debug_span!(
            "execute",
            operation_type = %ty,
            operation_name = operation.name.as_deref().unwrap_or_default(),
        );

        let ctx = ExecutionContext::new(&self.schema, &self.config, &operation, &variables, &root_value, &data);
        let response = ctx.build_response(ctx.execute_operation(root)).instrument(span).await;

        self.finalize(response)
    }

    /// Executes a request, blocking the current thread until the response is complete.
    pub fn execute_sync(&self, request: Request) -> Response {
        let response = Deferred::new(async move { Ok::<_, Infallible>(self.execute(request).await) }).block_on();
        match response {
            Ok(response) => response,
            Err(never) => match never {},
        }
    }

    fn finalize(&self, mut response: Response) -> Response {
        let counter = ErrorCodeCounter::from_errors(&response.errors);
        if counter.count() > 0 {
            tracing::debug!("Operation completed with {} errors: {:?}", counter.count(), counter.to_vec());
        }

        if self.config.expose_error_codes {
            for error in &mut response.errors {
                if !error.extensions.iter().any(|(key, _)| key == "code") {
                    error.extensions.push(("code".into(), error.code.as_ref().into()));
                }
            }
        }

        response
    }
}
