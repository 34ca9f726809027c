//! The intermediate representation produced by the parser: classes, their fields and the
//! GraphQL types those fields point to.

use std::fmt;

use serde::{Deserialize, Serialize};

/// The kind of a [GqlType], without its payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Kind {
    String,
    Boolean,
    Int,
    Float,
    Union,
    Enum,
    Object,
}

/// A resolved field type. Scalars only carry their nullability, reference kinds also carry the
/// name and the id of the class (or union) they point to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum GqlType {
    String { nullable: bool },
    Boolean { nullable: bool },
    Int { nullable: bool },
    Float { nullable: bool },
    Union { name: String, id: String, nullable: bool },
    Enum { name: String, id: String, nullable: bool },
    Object { name: String, id: String, nullable: bool },
}

impl GqlType {
    /// A reference to the output class of an object type.
    pub fn output_object(name: impl Into<String>, nullable: bool) -> Self {
        let name = name.into();
        GqlType::Object {
            id: class_id(&name, false),
            name,
            nullable,
        }
    }

    /// A reference to the input class of an input object type.
    pub fn input_object(name: impl Into<String>, nullable: bool) -> Self {
        let name = name.into();
        GqlType::Object {
            id: class_id(&name, true),
            name,
            nullable,
        }
    }

    pub fn kind(&self) -> Kind {
        match self {
            GqlType::String { .. } => Kind::String,
            GqlType::Boolean { .. } => Kind::Boolean,
            GqlType::Int { .. } => Kind::Int,
            GqlType::Float { .. } => Kind::Float,
            GqlType::Union { .. } => Kind::Union,
            GqlType::Enum { .. } => Kind::Enum,
            GqlType::Object { .. } => Kind::Object,
        }
    }

    pub fn is_nullable(&self) -> bool {
        match self {
            GqlType::String { nullable }
            | GqlType::Boolean { nullable }
            | GqlType::Int { nullable }
            | GqlType::Float { nullable }
            | GqlType::Union { nullable, .. }
            | GqlType::Enum { nullable, .. }
            | GqlType::Object { nullable, .. } => *nullable,
        }
    }

    /// The referenced type name, `None` for scalars.
    pub fn name(&self) -> Option<&str> {
        match self {
            GqlType::Union { name, .. } | GqlType::Enum { name, .. } | GqlType::Object { name, .. } => Some(name),
            _ => None,
        }
    }

    /// The id of the referenced class, `None` for scalars.
    pub fn id(&self) -> Option<&str> {
        match self {
            GqlType::Union { id, .. } | GqlType::Enum { id, .. } | GqlType::Object { id, .. } => Some(id),
            _ => None,
        }
    }
}

/// A single field of a class, either an input (argument, input object field) or an output.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldValue {
    pub name: String,
    #[serde(rename = "type")]
    pub r#type: GqlType,
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub is_list: bool,
    /// For object fields reached through a selection set: the fields of the referenced type
    /// that this particular access requested.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub selected_fields: Option<Vec<String>>,
}

impl FieldValue {
    pub fn new(name: impl Into<String>, r#type: GqlType) -> Self {
        FieldValue {
            name: name.into(),
            r#type,
            is_list: false,
            selected_fields: None,
        }
    }

    #[must_use]
    pub fn list(mut self, is_list: bool) -> Self {
        self.is_list = is_list;
        self
    }

    #[must_use]
    pub fn with_selected_fields(mut self, selected_fields: Vec<String>) -> Self {
        self.selected_fields = Some(selected_fields);
        self
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum OperationKind {
    Query,
    Mutation,
}

impl fmt::Display for OperationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OperationKind::Query => f.write_str("Query"),
            OperationKind::Mutation => f.write_str("Mutation"),
        }
    }
}

/// A type the user provides themselves instead of having a builder generated for it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct UserDefinedClass {
    /// Module the type is imported from.
    pub path: String,
    /// Named export to import. The default export is used when absent.
    #[serde(default)]
    pub export_name: Option<String>,
}

/// The canonical record for a named schema type or an operation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ClassObject {
    pub id: String,
    pub name: String,
    pub inputs: Vec<FieldValue>,
    pub outputs: Vec<FieldValue>,
    /// Fields actually selected across the queries that touched this type.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub selected_outputs: Option<Vec<FieldValue>>,
    pub is_input: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub operation: Option<OperationKind>,
    /// `outputs` lists every field the schema declares for this type.
    pub is_complete_schema: bool,
    /// At least two queries contributed selections to this type.
    pub has_multiple_queries: bool,
    pub should_inline: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_defined: Option<UserDefinedClass>,
}

impl ClassObject {
    fn new(name: &str, is_input: bool) -> Self {
        ClassObject {
            id: class_id(name, is_input),
            name: name.to_owned(),
            inputs: Vec::new(),
            outputs: Vec::new(),
            selected_outputs: None,
            is_input,
            operation: None,
            is_complete_schema: false,
            has_multiple_queries: false,
            should_inline: false,
            user_defined: None,
        }
    }

    /// The fields one query selected on an object type.
    pub fn partial_output(name: &str, outputs: Vec<FieldValue>) -> Self {
        ClassObject {
            outputs,
            ..ClassObject::new(name, false)
        }
    }

    /// Every field the schema declares on an object type.
    pub fn complete_output(name: &str, outputs: Vec<FieldValue>) -> Self {
        ClassObject {
            outputs,
            is_complete_schema: true,
            ..ClassObject::new(name, false)
        }
    }

    pub fn input(name: &str, inputs: Vec<FieldValue>) -> Self {
        ClassObject {
            inputs,
            ..ClassObject::new(name, true)
        }
    }

    /// Operations are keyed as input classes.
    pub fn operation(name: &str, kind: OperationKind, inputs: Vec<FieldValue>, outputs: Vec<FieldValue>) -> Self {
        ClassObject {
            inputs,
            outputs,
            operation: Some(kind),
            ..ClassObject::new(name, true)
        }
    }

    #[must_use]
    pub fn with_user_defined(mut self, user_defined: Option<&UserDefinedClass>) -> Self {
        self.user_defined = user_defined.cloned();
        self
    }

    pub fn output_names(&self) -> Vec<&str> {
        field_names(&self.outputs)
    }

    pub fn input_names(&self) -> Vec<&str> {
        field_names(&self.inputs)
    }

    /// Names of the selected outputs, `None` when no selection was recorded.
    pub fn selected_output_names(&self) -> Option<Vec<&str>> {
        self.selected_outputs.as_deref().map(field_names)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UnionObject {
    pub name: String,
    pub sub_types: Vec<String>,
}

/// `{name}:input` or `{name}:output`. The same name may exist once in each role.
pub fn class_id(name: &str, is_input: bool) -> String {
    let role = if is_input { "input" } else { "output" };
    format!("{name}:{role}")
}

fn field_names(fields: &[FieldValue]) -> Vec<&str> {
    fields.iter().map(|field| field.name.as_str()).collect()
}
