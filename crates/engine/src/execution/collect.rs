use std::{collections::HashSet, rc::Rc};

use indexmap::IndexMap;
use operation::{
    ast::{Directive, Field, Selection, SelectionSet},
    ConstValue, Name, Positioned,
};
use schema::ObjectDefinition;

use super::ExecutionContext;

/// Syntactic occurrences of one response key, in document order.
pub(crate) type FieldNodes<'a> = Rc<[&'a Positioned<Field>]>;

/// Fields of a selection set grouped by response key, in first occurrence order.
pub(crate) type FieldGroups<'a> = IndexMap<Name, FieldNodes<'a>>;

pub(crate) fn collect_fields<'a>(
    ctx: &ExecutionContext<'a>,
    runtime_type: &ObjectDefinition,
    selection_sets: impl IntoIterator<Item = &'a Positioned<SelectionSet>>,
) -> FieldGroups<'a> {
    let mut collector = Collector {
        ctx,
        runtime_type,
        groups: IndexMap::new(),
        visited_fragments: HashSet::new(),
    };
    for selection_set in selection_sets {
        collector.collect(&selection_set.node);
    }
    collector
        .groups
        .into_iter()
        .map(|(key, nodes)| (key, Rc::from(nodes)))
        .collect()
}

struct Collector<'c, 'a> {
    ctx: &'c ExecutionContext<'a>,
    runtime_type: &'c ObjectDefinition,
    groups: IndexMap<Name, Vec<&'a Positioned<Field>>>,
    visited_fragments: HashSet<&'a str>,
}

impl<'a> Collector<'_, 'a> {
    fn collect(&mut self, selection_set: &'a SelectionSet) {
        for selection in &selection_set.items {
            match &selection.node {
                Selection::Field(field) => {
                    if !self.should_include(&field.node.directives) {
                        continue;
                    }
                    let response_key = field.node.alias.as_ref().unwrap_or(&field.node.name).node.clone();
                    self.groups.entry(response_key).or_default().push(field);
                }
                Selection::FragmentSpread(spread) => {
                    if !self.should_include(&spread.node.directives) {
                        continue;
                    }
                    let name = spread.node.fragment_name.node.as_str();
                    if !self.visited_fragments.insert(name) {
                        continue;
                    }
                    let Some(fragment) = self.ctx.operation.fragment(name) else {
                        continue;
                    };
                    if !self.does_fragment_type_apply(&fragment.node.type_condition.node.on.node) {
                        continue;
                    }
                    self.collect(&fragment.node.selection_set.node);
                }
                Selection::InlineFragment(inline_fragment) => {
                    if !self.should_include(&inline_fragment.node.directives) {
                        continue;
                    }
                    if let Some(condition) = &inline_fragment.node.type_condition {
                        if !self.does_fragment_type_apply(&condition.node.on.node) {
                            continue;
                        }
                    }
                    self.collect(&inline_fragment.node.selection_set.node);
                }
            }
        }
    }

    fn does_fragment_type_apply(&self, type_condition: &str) -> bool {
        if self.runtime_type.name.as_str() == type_condition {
            return true;
        }
        self.ctx
            .schema
            .definition_by_name(type_condition)
            .is_some_and(|definition| {
                definition.is_abstract() && self.ctx.schema.is_possible_type(definition, &self.runtime_type.name)
            })
    }

    /// `@skip(if:)` and `@include(if:)`, with literal or variable conditions.
    fn should_include(&self, directives: &[Positioned<Directive>]) -> bool {
        directives.iter().all(|directive| {
            let directive = &directive.node;
            let condition = || {
                directive
                    .arguments
                    .iter()
                    .find(|(name, _)| name.node.as_str() == "if")
                    .map(|(_, value)| self.ctx.variables.resolve(&value.node))
            };
            match directive.name.node.as_str() {
                "skip" => condition() != Some(ConstValue::Boolean(true)),
                "include" => condition() != Some(ConstValue::Boolean(false)),
                _ => true,
            }
        })
    }
}
