use async_graphql_parser::{
    types::{Field, FragmentSpread, InlineFragment, Selection, SelectionSet},
    Pos, Positioned,
};
use itertools::Itertools;

use crate::{parse::ParsedOperation, Location};

type ValidationResult<T> = Result<T, ValidationError>;

#[derive(thiserror::Error, Debug, Clone)]
pub(crate) enum ValidationError {
    #[error("Query contains too many root fields.")]
    QueryContainsTooManyRootFields { count: usize, pos: Pos },
    #[error("Query contains too many aliases.")]
    QueryContainsTooManyAliases { count: usize, pos: Pos },
    #[error("Query is nested too deep.")]
    QueryTooDeep { depth: usize, pos: Pos },
    #[error("Unknown fragment named '{name}'")]
    UnknownFragment { name: String, pos: Pos },
    #[error("Fragment cycle detected: {}", .cycle.iter().join(", "))]
    FragmentCycle { cycle: Vec<String>, pos: Pos },
}

impl ValidationError {
    pub fn location(&self) -> Location {
        match self {
            ValidationError::QueryContainsTooManyRootFields { pos, .. }
            | ValidationError::QueryContainsTooManyAliases { pos, .. }
            | ValidationError::QueryTooDeep { pos, .. }
            | ValidationError::UnknownFragment { pos, .. }
            | ValidationError::FragmentCycle { pos, .. } => (*pos).into(),
        }
    }
}

/// Checks the structural limits of an operation and the fragment spreads it relies on. Runs
/// before any variable binding or execution.
pub(crate) fn validate(operation: &ParsedOperation, limits: &config::OperationLimits) -> ValidationResult<()> {
    Visitor {
        operation,
        current_fragments_stack: Vec::new(),
        root_fields: 0,
        max_root_fields: limits.root_fields.map(Into::into).unwrap_or(usize::MAX),
        current_depth: 0,
        max_depth: limits.depth.map(Into::into).unwrap_or(usize::MAX),
        aliases_count: 0,
        max_aliases_count: limits.aliases.map(Into::into).unwrap_or(usize::MAX),
    }
    .visit_selection_set(operation.selection_set())
}

struct Visitor<'p> {
    operation: &'p ParsedOperation,
    current_fragments_stack: Vec<&'p str>,
    root_fields: usize,
    max_root_fields: usize,
    current_depth: usize,
    max_depth: usize,
    aliases_count: usize,
    max_aliases_count: usize,
}

impl<'p> Visitor<'p> {
    fn visit_selection_set(&mut self, selection_set: &'p Positioned<SelectionSet>) -> ValidationResult<()> {
        for item in &selection_set.node.items {
            match &item.node {
                Selection::Field(field) => {
                    self.root_fields += usize::from(self.current_depth == 0);
                    if self.root_fields > self.max_root_fields {
                        return Err(ValidationError::QueryContainsTooManyRootFields {
                            count: self.root_fields,
                            pos: field.pos,
                        });
                    }
                    self.visit_field(field)?;
                }
                Selection::FragmentSpread(fragment_spread) => {
                    self.visit_fragment_spread(fragment_spread)?;
                }
                Selection::InlineFragment(inline_fragment) => {
                    self.visit_inline_fragment(inline_fragment)?;
                }
            }
        }

        Ok(())
    }

    fn visit_field(&mut self, field: &'p Positioned<Field>) -> ValidationResult<()> {
        if let Some(alias) = &field.node.alias {
            self.aliases_count += 1;
            if self.aliases_count > self.max_aliases_count {
                return Err(ValidationError::QueryContainsTooManyAliases {
                    count: self.aliases_count,
                    pos: alias.pos,
                });
            }
        }

        self.current_depth += 1;
        if self.current_depth > self.max_depth {
            return Err(ValidationError::QueryTooDeep {
                depth: self.current_depth,
                pos: field.node.name.pos,
            });
        }

        self.visit_selection_set(&field.node.selection_set)?;
        self.current_depth -= 1;

        Ok(())
    }

    fn visit_fragment_spread(&mut self, fragment_spread: &'p Positioned<FragmentSpread>) -> ValidationResult<()> {
        let fragment_name = fragment_spread.node.fragment_name.node.as_str();
        let pos = fragment_spread.node.fragment_name.pos;

        if self.current_fragments_stack.contains(&fragment_name) {
            self.current_fragments_stack.push(fragment_name);
            return Err(ValidationError::FragmentCycle {
                cycle: std::mem::take(&mut self.current_fragments_stack)
                    .into_iter()
                    .map(str::to_string)
                    .collect(),
                pos,
            });
        }

        let Some(fragment) = self.operation.fragment(fragment_name) else {
            return Err(ValidationError::UnknownFragment {
                name: fragment_name.to_string(),
                pos,
            });
        };

        self.current_fragments_stack.push(fragment_name);
        self.visit_selection_set(&fragment.node.selection_set)?;
        self.current_fragments_stack.pop();

        Ok(())
    }

    fn visit_inline_fragment(&mut self, inline_fragment: &'p Positioned<InlineFragment>) -> ValidationResult<()> {
        self.visit_selection_set(&inline_fragment.node.selection_set)
    }
}
