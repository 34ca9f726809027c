//! Reconciles two observations of the same class.
//!
//! A type class can be observed in two states: *partial*, the fields one query selected, and
//! *complete*, every field the schema declares. Merging keeps the widest field list in
//! `outputs` while `selected_outputs` accumulates what queries actually asked for.

use std::mem;

use indexmap::IndexMap;

use crate::types::{ClassObject, FieldValue};

/// Combines `incoming` into `existing` in place. The caller has already checked that both sides
/// have the same identity (role and operation kind).
pub(crate) fn merge_classes(existing: &mut ClassObject, mut incoming: ClassObject) {
    // Operations keep their own metadata, only their fields are reconciled.
    if existing.operation.is_none() && incoming.operation.is_none() {
        let selection = merge_query_selections(existing, &mut incoming);

        tracing::trace!(
            class = %existing.id,
            existing_complete = existing.is_complete_schema,
            incoming_complete = incoming.is_complete_schema,
            has_multiple_queries = selection.has_multiple_queries,
            "merged class observations"
        );

        existing.selected_outputs = selection.selected_outputs;
        existing.is_complete_schema = selection.is_complete_schema;
        existing.has_multiple_queries = selection.has_multiple_queries;
        existing.should_inline |= incoming.should_inline;

        if existing.user_defined.is_none() {
            existing.user_defined = incoming.user_defined.take();
        }
    }

    existing.inputs = merge_field_arrays(incoming.inputs, mem::take(&mut existing.inputs));
    existing.outputs = merge_field_arrays(incoming.outputs, mem::take(&mut existing.outputs));
}

/// Keeps the strictly longer list. On a tie both lists are unioned by name, `preferred` first,
/// so two different selections of the same size never lose a field.
pub(crate) fn merge_field_arrays(preferred: Vec<FieldValue>, other: Vec<FieldValue>) -> Vec<FieldValue> {
    if preferred.len() > other.len() {
        return preferred;
    }

    if other.len() > preferred.len() {
        return other;
    }

    union_fields_by_name(preferred, other)
}

/// De-duplicates on field name. The first definition seen for a name wins.
pub(crate) fn union_fields_by_name(
    left: impl IntoIterator<Item = FieldValue>,
    right: impl IntoIterator<Item = FieldValue>,
) -> Vec<FieldValue> {
    let mut fields = IndexMap::new();

    for field in left.into_iter().chain(right) {
        fields.entry(field.name.clone()).or_insert(field);
    }

    fields.into_values().collect()
}

#[derive(Debug)]
struct SelectionState {
    selected_outputs: Option<Vec<FieldValue>>,
    is_complete_schema: bool,
    has_multiple_queries: bool,
}

/// Takes the selections out of both sides. `outputs` are only read: the field-array merge still
/// needs them.
fn merge_query_selections(existing: &mut ClassObject, incoming: &mut ClassObject) -> SelectionState {
    match (existing.is_complete_schema, incoming.is_complete_schema) {
        // Two partial selections coming from different queries.
        (false, false) => {
            let existing_selection = existing
                .selected_outputs
                .take()
                .unwrap_or_else(|| existing.outputs.clone());
            let incoming_selection = incoming
                .selected_outputs
                .take()
                .unwrap_or_else(|| incoming.outputs.clone());

            SelectionState {
                selected_outputs: Some(union_fields_by_name(existing_selection, incoming_selection)),
                is_complete_schema: false,
                has_multiple_queries: true,
            }
        }
        // Another query's selection arrives after the type is already complete. This also
        // happens within one query when the schema walk of a parent reached the type first.
        (true, false) => SelectionState {
            selected_outputs: Some(match existing.selected_outputs.take() {
                Some(selected) => union_fields_by_name(selected, incoming.outputs.clone()),
                None => incoming.outputs.clone(),
            }),
            is_complete_schema: true,
            has_multiple_queries: true,
        },
        // The schema walk completes the first query's selection: freeze what it asked for.
        (false, true) => SelectionState {
            selected_outputs: Some(existing.outputs.clone()),
            is_complete_schema: true,
            has_multiple_queries: false,
        },
        (true, true) => match (existing.selected_outputs.take(), incoming.selected_outputs.take()) {
            (Some(existing_selection), Some(incoming_selection)) => SelectionState {
                selected_outputs: Some(union_fields_by_name(existing_selection, incoming_selection)),
                is_complete_schema: true,
                has_multiple_queries: true,
            },
            (existing_selection, incoming_selection) => SelectionState {
                selected_outputs: existing_selection.or(incoming_selection),
                is_complete_schema: true,
                has_multiple_queries: existing.has_multiple_queries || incoming.has_multiple_queries,
            },
        },
    }
}
