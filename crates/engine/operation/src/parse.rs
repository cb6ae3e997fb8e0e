use std::collections::HashMap;

use async_graphql_parser::{
    types::{DocumentOperations, FragmentDefinition, OperationDefinition, OperationType, SelectionSet},
    Positioned,
};
use async_graphql_value::Name;

use crate::{Error, Location, Result};

/// The operation selected from an executable document, along with the fragments it may use.
#[derive(Debug)]
pub struct ParsedOperation {
    pub name: Option<Name>,
    pub definition: Positioned<OperationDefinition>,
    pub fragments: HashMap<Name, Positioned<FragmentDefinition>>,
}

impl ParsedOperation {
    pub fn ty(&self) -> OperationType {
        self.definition.node.ty
    }

    pub fn selection_set(&self) -> &Positioned<SelectionSet> {
        &self.definition.node.selection_set
    }

    pub fn fragment(&self, name: &str) -> Option<&Positioned<FragmentDefinition>> {
        self.fragments.get(name)
    }
}

pub fn parse_operation(operation_name: Option<&str>, document: &str) -> Result<ParsedOperation> {
    let document = async_graphql_parser::parse_query(document)
        .map_err(|err| Error::parsing(err.to_string()).with_locations(err.positions().map(Location::from)))?;

    let operations = document.operations;
    let fragments = document.fragments;

    let (name, definition) = if let Some(operation_name) = operation_name {
        match operations {
            DocumentOperations::Single(_) => None,
            DocumentOperations::Multiple(mut operations) => operations
                .remove(operation_name)
                .map(|operation| (Some(Name::new(operation_name)), operation)),
        }
        .ok_or_else(|| Error::validation(format!(r#"Unknown operation named "{operation_name}"."#)))?
    } else {
        match operations {
            DocumentOperations::Single(operation) => (None, operation),
            DocumentOperations::Multiple(operations) if operations.len() == 1 => operations
                .into_iter()
                .next()
                .map(|(name, operation)| (Some(name), operation))
                .ok_or_else(|| Error::validation("Operation name required in request."))?,
            DocumentOperations::Multiple(_) => return Err(Error::validation("Operation name required in request.")),
        }
    };

    tracing::trace!(
        "Selected {} operation {}",
        definition.node.ty,
        name.as_deref().unwrap_or("<anonymous>")
    );

    Ok(ParsedOperation {
        name,
        definition,
        fragments,
    })
}
