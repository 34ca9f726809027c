//! Turns schema type references into [GqlType]s.

use async_graphql_parser::types::{BaseType, Type};

use crate::{
    error::{ParseError, Result},
    schema::{Schema, TypeDefinition},
    types::GqlType,
};

/// A field type with its wrappers stripped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct UnwrappedType<'a> {
    pub(crate) name: &'a str,
    /// Nullability of the named type. For lists, this is the nullability of the elements.
    pub(crate) nullable: bool,
    pub(crate) is_list: bool,
}

/// Strips the non-null wrapper and a single level of list wrapping.
pub(crate) fn unwrap_type(ty: &Type) -> Result<UnwrappedType<'_>> {
    match &ty.base {
        BaseType::Named(name) => Ok(UnwrappedType {
            name: name.as_str(),
            nullable: ty.nullable,
            is_list: false,
        }),
        BaseType::List(element) => match &element.base {
            BaseType::Named(name) => Ok(UnwrappedType {
                name: name.as_str(),
                nullable: element.nullable,
                is_list: true,
            }),
            BaseType::List(_) => Err(ParseError::UnsupportedType(ty.to_string())),
        },
    }
}

/// Resolves an output type by name. Only the builtin scalars and object types are supported.
pub(crate) fn resolve_output_type(schema: &Schema, type_name: &str, nullable: bool) -> Result<GqlType> {
    match schema.definition(type_name) {
        Some(TypeDefinition::Scalar) => {
            scalar_type(type_name, nullable).ok_or_else(|| ParseError::UnknownScalar(type_name.to_owned()))
        }
        Some(TypeDefinition::Object(_)) => Ok(GqlType::output_object(type_name, nullable)),
        Some(_) => Err(ParseError::UnparsableType(type_name.to_owned())),
        None => Err(ParseError::TypeNotFound(type_name.to_owned())),
    }
}

/// Resolves the type of an input object field, with its non-null wrapper already stripped.
/// Only builtin scalars are supported.
pub(crate) fn resolve_input_type(ty: &Type, nullable: bool) -> Result<GqlType> {
    match &ty.base {
        BaseType::Named(name) => {
            scalar_type(name.as_str(), nullable).ok_or_else(|| ParseError::UnknownInputType(name.to_string()))
        }
        BaseType::List(_) => Err(ParseError::UnsupportedInputType(ty.to_string())),
    }
}

fn scalar_type(name: &str, nullable: bool) -> Option<GqlType> {
    match name {
        "String" => Some(GqlType::String { nullable }),
        "Int" => Some(GqlType::Int { nullable }),
        "Boolean" => Some(GqlType::Boolean { nullable }),
        "Float" => Some(GqlType::Float { nullable }),
        _ => None,
    }
}
