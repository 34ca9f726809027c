use async_graphql_parser::types::{OperationDefinition, OperationType};

use super::{selection::parse_selections, variables::parse_variable_definition, Context};
use crate::{
    error::{ParseError, Result},
    registry::ParseResult,
    types::{ClassObject, OperationKind},
};

/// Registers an operation class along with every type its selections and variables touch.
/// The root operation type itself gets no class.
pub(super) fn parse_operation(
    ctx: &Context<'_>,
    name: Option<&str>,
    operation: &OperationDefinition,
) -> Result<ParseResult> {
    let name = name.ok_or(ParseError::MissingOperationName)?;

    let (kind, root) = match operation.ty {
        OperationType::Query => (
            OperationKind::Query,
            ctx.schema.query_type().ok_or(ParseError::MissingRootType("query"))?,
        ),
        OperationType::Mutation => (
            OperationKind::Mutation,
            ctx.schema.mutation_type().ok_or(ParseError::MissingRootType("mutation"))?,
        ),
        OperationType::Subscription => {
            return Err(ParseError::UnsupportedOperation { name: name.to_owned() });
        }
    };

    let (outputs, mut result) = parse_selections(ctx, root, &operation.selection_set.node.items)?;

    let mut inputs = Vec::with_capacity(operation.variable_definitions.len());

    for variable in &operation.variable_definitions {
        let (input, variable_result) = parse_variable_definition(ctx, &variable.node)?;

        inputs.push(input);
        result = result.merge(variable_result)?;
    }

    tracing::debug!(operation = name, %kind, inputs = inputs.len(), outputs = outputs.len(), "parsed operation");

    let class = ClassObject::operation(name, kind, inputs, outputs).with_user_defined(ctx.user_defined(name));

    result.add_class(class)
}
