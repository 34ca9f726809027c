use super::Context;
use crate::{
    error::Result,
    registry::ParseResult,
    resolve::{resolve_output_type, unwrap_type},
    schema::ObjectType,
    types::{ClassObject, FieldValue},
};

/// Registers every field the schema declares on `object`, ignoring what any query selected, and
/// does the same for every object type reachable from it.
pub(super) fn parse_complete_schema_type(ctx: &Context<'_>, object: ObjectType<'_>) -> Result<ParseResult> {
    let mut path = Vec::new();

    walk(ctx, object, &mut path)
}

/// `path` holds the types currently being walked. A field pointing back to one of them is
/// registered as a reference without walking the type again.
fn walk<'s>(ctx: &Context<'s>, object: ObjectType<'s>, path: &mut Vec<&'s str>) -> Result<ParseResult> {
    path.push(object.name);

    let mut result = ParseResult::new();
    let mut outputs = Vec::with_capacity(object.fields.len());

    for field in object.fields {
        let unwrapped = unwrap_type(&field.ty)?;
        let r#type = resolve_output_type(ctx.schema, unwrapped.name, unwrapped.nullable)?;

        if let Some(nested) = ctx.schema.object_type(unwrapped.name) {
            if path.contains(&nested.name) {
                tracing::trace!(type_name = object.name, field = %field.name, "recursive type reference");
            } else {
                result = result.merge(walk(ctx, nested, path)?)?;
            }
        }

        outputs.push(FieldValue::new(&field.name, r#type).list(unwrapped.is_list));
    }

    path.pop();

    let class = ClassObject::complete_output(object.name, outputs).with_user_defined(ctx.user_defined(object.name));

    result.add_class(class)
}
