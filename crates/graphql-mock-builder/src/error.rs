/// Everything that can go wrong while building the type graph. All of them are fatal: the parse
/// stops at the first one.
#[derive(Debug, thiserror::Error)]
pub enum ParseError {
    #[error("Conflicting classes with the same name ({name}) but different types")]
    ConflictingClasses { name: String },
    #[error("Duplicate unions with the same name ({name})")]
    DuplicateUnion { name: String },

    #[error("Unknown scalar type: {0}")]
    UnknownScalar(String),
    #[error("Unknown named type: {0}")]
    UnknownInputType(String),
    #[error("Unable to find field type for: {field} in {type_name}")]
    FieldNotFound { field: String, type_name: String },
    #[error("Unable to find GraphQL type for: {0}")]
    TypeNotFound(String),
    #[error("GraphQL type {0} is not an input object type")]
    NotAnInputObject(String),
    #[error("Unable to parse type: {0}")]
    UnparsableType(String),

    #[error("Found a selection set on a non-object type: {0}")]
    SelectionOnNonObject(String),
    #[error("Unsupported selection in {type_name}: {kind}")]
    UnsupportedSelection { type_name: String, kind: &'static str },
    #[error("Unsupported type for variable ${name}: {variable_type}")]
    UnsupportedVariableType { name: String, variable_type: String },
    #[error("Unsupported input type: {0}")]
    UnsupportedInputType(String),
    #[error("Unsupported nested list type: {0}")]
    UnsupportedType(String),
    #[error("Operation has no name")]
    MissingOperationName,
    #[error("Missing document at {location}")]
    MissingDocument { location: String },
    #[error("Unable to find schema type: {0}")]
    MissingRootType(&'static str),
    #[error("Unsupported operation {name}: only queries and mutations are supported")]
    UnsupportedOperation { name: String },

    #[error("Could not parse the GraphQL schema: {0}")]
    SchemaSyntax(#[source] async_graphql_parser::Error),
    #[error("Could not parse the GraphQL document at {location}: {source}")]
    DocumentSyntax {
        location: String,
        #[source]
        source: async_graphql_parser::Error,
    },
    #[error("Invalid configuration: {0}")]
    Config(#[from] toml::de::Error),
}

pub type Result<T, E = ParseError> = std::result::Result<T, E>;
