//! Walks operations against the schema and folds every class they touch into a single
//! [ParseResult].
//!
//! Every step of the walk builds a fresh registry for what it discovered and returns it to its
//! caller, which merges it into its own. Nested types are therefore merged bottom-up, and the
//! merge rules in [crate::merge] decide how repeated observations of a type combine.

mod complete_schema;
mod operation;
mod selection;
mod variables;

use crate::{
    config::Config,
    document::{self, DocumentFile},
    error::{ParseError, Result},
    registry::ParseResult,
    schema::Schema,
    types::UserDefinedClass,
};

struct Context<'a> {
    schema: &'a Schema,
    config: &'a Config,
}

impl<'a> Context<'a> {
    fn user_defined(&self, type_name: &str) -> Option<&'a UserDefinedClass> {
        self.config.user_defined(type_name)
    }
}

/// Builds the type graph for every operation in `documents`. Documents are processed in order,
/// operations in the order they appear in their document.
#[tracing::instrument(skip_all, fields(documents = documents.len()))]
pub fn parse(schema: &Schema, documents: &[DocumentFile], config: &Config) -> Result<ParseResult> {
    let ctx = Context { schema, config };
    let mut result = ParseResult::new();

    for file in documents {
        let document = file.document.as_ref().ok_or_else(|| ParseError::MissingDocument {
            location: file.location.clone(),
        })?;

        for (name, operation) in document::operations(document) {
            tracing::debug!(
                location = %file.location,
                operation = name.unwrap_or_default(),
                "parsing operation"
            );

            result = result.merge(operation::parse_operation(&ctx, name, operation)?)?;
        }
    }

    tracing::debug!(
        classes = result.classes.len(),
        unions = result.unions.len(),
        "type graph built"
    );

    Ok(result)
}
