use async_graphql_parser::types::{BaseType, VariableDefinition};

use super::Context;
use crate::{
    error::{ParseError, Result},
    registry::ParseResult,
    resolve::resolve_input_type,
    schema::{FieldDefinition, TypeDefinition},
    types::{ClassObject, FieldValue, GqlType},
};

/// Variables must be input objects whose fields are builtin scalars. The input object is
/// registered as an input class and the variable becomes an input of the operation.
pub(super) fn parse_variable_definition(
    ctx: &Context<'_>,
    variable: &VariableDefinition,
) -> Result<(FieldValue, ParseResult)> {
    let name = variable.name.node.as_str();
    let var_type = &variable.var_type.node;

    let type_name = match &var_type.base {
        BaseType::Named(type_name) => type_name.as_str(),
        BaseType::List(_) => {
            return Err(ParseError::UnsupportedVariableType {
                name: name.to_owned(),
                variable_type: var_type.to_string(),
            })
        }
    };

    let fields = match ctx.schema.definition(type_name) {
        Some(TypeDefinition::InputObject(fields)) => fields,
        Some(_) => return Err(ParseError::NotAnInputObject(type_name.to_owned())),
        None => return Err(ParseError::TypeNotFound(type_name.to_owned())),
    };

    let inputs = fields.iter().map(parse_input_field).collect::<Result<Vec<_>>>()?;

    let class = ClassObject::input(type_name, inputs).with_user_defined(ctx.user_defined(type_name));
    let result = ParseResult::new().add_class(class)?;

    Ok((
        FieldValue::new(name, GqlType::input_object(type_name, var_type.nullable)),
        result,
    ))
}

fn parse_input_field(field: &FieldDefinition) -> Result<FieldValue> {
    let r#type = resolve_input_type(&field.ty, field.ty.nullable)?;

    Ok(FieldValue::new(&field.name, r#type))
}
