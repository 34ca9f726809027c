use async_graphql_parser::types::{ExecutableDocument, OperationDefinition};

use crate::error::{ParseError, Result};

/// An executable document and where it came from.
#[derive(Debug)]
pub struct DocumentFile {
    pub location: String,
    /// `None` when the host could not provide the document.
    pub document: Option<ExecutableDocument>,
}

impl DocumentFile {
    pub fn new(location: impl Into<String>, document: ExecutableDocument) -> Self {
        DocumentFile {
            location: location.into(),
            document: Some(document),
        }
    }

    /// Parses the source text of an executable document.
    pub fn parse(location: impl Into<String>, source: &str) -> Result<Self> {
        let location = location.into();

        match async_graphql_parser::parse_query(source) {
            Ok(document) => Ok(DocumentFile::new(location, document)),
            Err(error) => Err(ParseError::DocumentSyntax { location, source: error }),
        }
    }
}

/// The operations of a document with their names, in the order they appear in the source.
pub(crate) fn operations(document: &ExecutableDocument) -> Vec<(Option<&str>, &OperationDefinition)> {
    let mut operations: Vec<_> = document.operations.iter().collect();
    operations.sort_by_key(|(_, operation)| (operation.pos.line, operation.pos.column));

    operations
        .into_iter()
        .map(|(name, operation)| (name.map(|name| name.as_str()), &operation.node))
        .collect()
}
