use async_graphql_parser::types::{self as ast, ServiceDocument, TypeSystemDefinition};
use indexmap::IndexMap;

use crate::error::{ParseError, Result};

const BUILTIN_SCALARS: &[&str] = &["String", "Int", "Float", "Boolean", "ID"];

const DEFAULT_QUERY_TYPE: &str = "Query";
const DEFAULT_MUTATION_TYPE: &str = "Mutation";

/// The parts of a GraphQL schema the walkers need: named types with their fields, and the root
/// operation types.
#[derive(Debug, Default)]
pub struct Schema {
    types: IndexMap<String, TypeDefinition>,
    query_type_name: Option<String>,
    mutation_type_name: Option<String>,
}

#[derive(Debug)]
pub enum TypeDefinition {
    Scalar,
    Object(Vec<FieldDefinition>),
    Interface,
    Union(Vec<String>),
    Enum,
    InputObject(Vec<FieldDefinition>),
}

impl TypeDefinition {
    fn fields_mut(&mut self) -> Option<&mut Vec<FieldDefinition>> {
        match self {
            TypeDefinition::Object(fields) | TypeDefinition::InputObject(fields) => Some(fields),
            _ => None,
        }
    }
}

/// An object field or an input object field. Arguments are not needed.
#[derive(Debug)]
pub struct FieldDefinition {
    pub name: String,
    pub ty: ast::Type,
}

/// A borrowed object type, the unit every selection set is walked against.
#[derive(Debug, Clone, Copy)]
pub struct ObjectType<'a> {
    pub name: &'a str,
    pub fields: &'a [FieldDefinition],
}

impl<'a> ObjectType<'a> {
    pub fn field(&self, name: &str) -> Option<&'a FieldDefinition> {
        self.fields.iter().find(|field| field.name == name)
    }
}

impl Schema {
    /// Parses SDL text.
    pub fn parse(sdl: &str) -> Result<Self> {
        let document = async_graphql_parser::parse_schema(sdl).map_err(ParseError::SchemaSyntax)?;

        Ok(document.into())
    }

    pub fn definition(&self, name: &str) -> Option<&TypeDefinition> {
        self.types.get(name)
    }

    /// The object type with that name, `None` if it does not exist or is not an object.
    pub fn object_type(&self, name: &str) -> Option<ObjectType<'_>> {
        let (name, definition) = self.types.get_key_value(name)?;

        match definition {
            TypeDefinition::Object(fields) => Some(ObjectType { name, fields }),
            _ => None,
        }
    }

    pub fn query_type(&self) -> Option<ObjectType<'_>> {
        self.object_type(self.query_type_name.as_deref()?)
    }

    pub fn mutation_type(&self) -> Option<ObjectType<'_>> {
        self.object_type(self.mutation_type_name.as_deref()?)
    }

    fn push_fields(&mut self, type_name: &str, definition: TypeDefinition) {
        match self.types.get_mut(type_name).and_then(TypeDefinition::fields_mut) {
            // Type extensions append to the type they extend.
            Some(fields) => {
                if let TypeDefinition::Object(extra) | TypeDefinition::InputObject(extra) = definition {
                    fields.extend(extra);
                }
            }
            None => {
                self.types.insert(type_name.to_owned(), definition);
            }
        }
    }
}

impl From<ServiceDocument> for Schema {
    fn from(document: ServiceDocument) -> Self {
        let mut schema = Schema::default();

        for scalar in BUILTIN_SCALARS {
            schema.types.insert((*scalar).to_owned(), TypeDefinition::Scalar);
        }

        for definition in document.definitions {
            match definition {
                TypeSystemDefinition::Schema(schema_definition) => {
                    let schema_definition = schema_definition.node;

                    if let Some(query) = schema_definition.query {
                        schema.query_type_name = Some(query.node.to_string());
                    }

                    if let Some(mutation) = schema_definition.mutation {
                        schema.mutation_type_name = Some(mutation.node.to_string());
                    }
                }
                TypeSystemDefinition::Type(type_definition) => {
                    let type_definition = type_definition.node;
                    let name = type_definition.name.node.to_string();

                    let definition = match type_definition.kind {
                        ast::TypeKind::Scalar => TypeDefinition::Scalar,
                        ast::TypeKind::Object(object) => TypeDefinition::Object(
                            object
                                .fields
                                .into_iter()
                                .map(|field| FieldDefinition {
                                    name: field.node.name.node.to_string(),
                                    ty: field.node.ty.node,
                                })
                                .collect(),
                        ),
                        ast::TypeKind::Interface(_) => TypeDefinition::Interface,
                        ast::TypeKind::Union(union) => TypeDefinition::Union(
                            union.members.into_iter().map(|member| member.node.to_string()).collect(),
                        ),
                        ast::TypeKind::Enum(_) => TypeDefinition::Enum,
                        ast::TypeKind::InputObject(input_object) => TypeDefinition::InputObject(
                            input_object
                                .fields
                                .into_iter()
                                .map(|field| FieldDefinition {
                                    name: field.node.name.node.to_string(),
                                    ty: field.node.ty.node,
                                })
                                .collect(),
                        ),
                    };

                    schema.push_fields(&name, definition);
                }
                TypeSystemDefinition::Directive(_) => (),
            }
        }

        let has_object = |schema: &Schema, name: &str| schema.object_type(name).is_some();

        if schema.query_type_name.is_none() && has_object(&schema, DEFAULT_QUERY_TYPE) {
            schema.query_type_name = Some(DEFAULT_QUERY_TYPE.to_owned());
        }

        if schema.mutation_type_name.is_none() && has_object(&schema, DEFAULT_MUTATION_TYPE) {
            schema.mutation_type_name = Some(DEFAULT_MUTATION_TYPE.to_owned());
        }

        schema
    }
}
