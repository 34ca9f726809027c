use async_graphql_parser::{
    types::{Field, Selection},
    Positioned,
};
use indexmap::IndexMap;

use super::{complete_schema::parse_complete_schema_type, Context};
use crate::{
    error::{ParseError, Result},
    registry::ParseResult,
    resolve::{resolve_output_type, unwrap_type},
    schema::ObjectType,
    types::{ClassObject, FieldValue, GqlType},
};

/// The introspection meta field. It has no counterpart in the schema, so selections of it are
/// skipped instead of failing with a missing field.
const TYPENAME_FIELD: &str = "__typename";

/// Walks the selections made on `object` without registering `object` itself. Operations use
/// this for their root type.
pub(super) fn parse_selections<'d>(
    ctx: &Context<'_>,
    object: ObjectType<'_>,
    selections: impl IntoIterator<Item = &'d Positioned<Selection>>,
) -> Result<(Vec<FieldValue>, ParseResult)> {
    let grouped = group_fields(object, selections)?;

    let mut fields = Vec::with_capacity(grouped.len());
    let mut result = ParseResult::new();

    for (field_name, occurrences) in grouped {
        let (field, field_result) = parse_field(ctx, object, field_name, &occurrences)?;

        fields.push(field);
        result = result.merge(field_result)?;
    }

    Ok((fields, result))
}

/// Registers the fields selected on `object` as a partial class, then merges in the complete
/// shape of `object`.
fn parse_selection_set<'d>(
    ctx: &Context<'_>,
    object: ObjectType<'_>,
    selections: impl IntoIterator<Item = &'d Positioned<Selection>>,
) -> Result<ParseResult> {
    let (outputs, result) = parse_selections(ctx, object, selections)?;

    let class = ClassObject::partial_output(object.name, outputs).with_user_defined(ctx.user_defined(object.name));
    let complete = parse_complete_schema_type(ctx, object)?;

    result.add_class(class)?.merge(complete)
}

/// Groups field selections by schema field name, in order of first appearance. Aliased or
/// repeated selections of one field land in the same group.
fn group_fields<'d>(
    object: ObjectType<'_>,
    selections: impl IntoIterator<Item = &'d Positioned<Selection>>,
) -> Result<IndexMap<&'d str, Vec<&'d Field>>> {
    let mut grouped: IndexMap<&str, Vec<&Field>> = IndexMap::new();

    for selection in selections {
        let field = match &selection.node {
            Selection::Field(field) => &field.node,
            Selection::FragmentSpread(_) => {
                return Err(ParseError::UnsupportedSelection {
                    type_name: object.name.to_owned(),
                    kind: "fragment spread",
                })
            }
            Selection::InlineFragment(_) => {
                return Err(ParseError::UnsupportedSelection {
                    type_name: object.name.to_owned(),
                    kind: "inline fragment",
                })
            }
        };

        let field_name = field.name.node.as_str();

        if field_name == TYPENAME_FIELD {
            continue;
        }

        grouped.entry(field_name).or_default().push(field);
    }

    Ok(grouped)
}

/// Resolves one field of `object`. When the field was selected more than once, the nested
/// selection sets of every occurrence are walked together.
fn parse_field(
    ctx: &Context<'_>,
    object: ObjectType<'_>,
    field_name: &str,
    occurrences: &[&Field],
) -> Result<(FieldValue, ParseResult)> {
    let definition = object.field(field_name).ok_or_else(|| ParseError::FieldNotFound {
        field: field_name.to_owned(),
        type_name: object.name.to_owned(),
    })?;

    let unwrapped = unwrap_type(&definition.ty)?;

    if occurrences
        .iter()
        .all(|field| field.selection_set.node.items.is_empty())
    {
        let r#type = resolve_output_type(ctx.schema, unwrapped.name, unwrapped.nullable)?;
        let value = FieldValue::new(field_name, r#type).list(unwrapped.is_list);

        return Ok((value, ParseResult::new()));
    }

    let nested = ctx.schema.object_type(unwrapped.name).ok_or_else(|| {
        match ctx.schema.definition(unwrapped.name) {
            Some(_) => ParseError::SelectionOnNonObject(unwrapped.name.to_owned()),
            None => ParseError::TypeNotFound(unwrapped.name.to_owned()),
        }
    })?;

    tracing::trace!(
        parent = object.name,
        field = field_name,
        type_name = nested.name,
        occurrences = occurrences.len(),
        "nested selection"
    );

    let selections = occurrences
        .iter()
        .copied()
        .flat_map(|field| &field.selection_set.node.items);
    let result = parse_selection_set(ctx, nested, selections)?;

    // What this access requested, as recorded on the nested class once merged.
    let selected_fields = result
        .output_class(nested.name)
        .map(|class| {
            class
                .selected_outputs
                .as_ref()
                .unwrap_or(&class.outputs)
                .iter()
                .map(|field| field.name.clone())
                .collect()
        })
        .unwrap_or_default();

    let value = FieldValue::new(field_name, GqlType::output_object(nested.name, unwrapped.nullable))
        .list(unwrapped.is_list)
        .with_selected_fields(selected_fields);

    Ok((value, result))
}
