mod error;
mod location;
mod parse;
mod validation;
mod variables;

pub use async_graphql_parser::{types as ast, Pos, Positioned};
pub use async_graphql_value::{ConstValue, Name, Value};
pub use error::*;
pub use location::Location;
pub use parse::{parse_operation, ParsedOperation};
pub use variables::Variables;

impl ParsedOperation {
    /// Parses the document, selects the operation to execute and checks it against the
    /// configured operation limits.
    pub fn prepare(
        operation_name: Option<&str>,
        document: &str,
        limits: &config::OperationLimits,
    ) -> Result<ParsedOperation> {
        let operation = parse_operation(operation_name, document)?;
        validation::after_parsing::validate(&operation, limits)
            .map_err(|err| Error::validation(err.to_string()).with_location(err.location()))?;
        Ok(operation)
    }
}
