//! Builds the type graph a mock builder generator renders from: a GraphQL schema and a set of
//! executable documents go in, a registry of classes comes out.
//!
//! Every named schema type an operation touches becomes a class. For output types the class
//! remembers both every field the schema declares and the fields queries actually selected, so
//! the renderer can emit minimal mocks.
//!
//! ```
//! use graphql_mock_builder::{parse, Config, DocumentFile, Schema};
//!
//! let schema = Schema::parse("type Query { me: User } type User { name: String age: Int }").unwrap();
//! let documents = [DocumentFile::parse("me.graphql", "query Me { me { name } }").unwrap()];
//!
//! let result = parse(&schema, &documents, &Config::default()).unwrap();
//! let user = result.output_class("User").unwrap();
//!
//! assert_eq!(user.output_names(), vec!["name", "age"]);
//! assert_eq!(user.selected_output_names(), Some(vec!["name"]));
//! ```

#![allow(unused_crate_dependencies)]

mod config;
mod document;
mod error;
mod merge;
mod optimiser;
mod parser;
mod registry;
mod resolve;
mod schema;
mod types;

pub use config::Config;
pub use document::DocumentFile;
pub use error::{ParseError, Result};
pub use optimiser::{optimise, MIN_FIELD_COUNT};
pub use parser::parse;
pub use registry::ParseResult;
pub use schema::{FieldDefinition, ObjectType, Schema, TypeDefinition};
pub use types::{class_id, ClassObject, FieldValue, GqlType, Kind, OperationKind, UnionObject, UserDefinedClass};

#[cfg(test)]
mod tests;
