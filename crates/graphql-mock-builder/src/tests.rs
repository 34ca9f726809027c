use assert_matches::assert_matches;
use expect_test::expect;
use indoc::indoc;
use pretty_assertions::assert_eq;

use crate::{
    optimise, parse, Config, DocumentFile, FieldValue, GqlType, OperationKind, ParseError, ParseResult, Result,
    Schema, UserDefinedClass,
};

fn documents(sources: &[&str]) -> Vec<DocumentFile> {
    sources
        .iter()
        .enumerate()
        .map(|(index, source)| DocumentFile::parse(format!("document-{index}.graphql"), source).unwrap())
        .collect()
}

fn parse_with(sdl: &str, sources: &[&str], config: &Config) -> Result<ParseResult> {
    let schema = Schema::parse(sdl).unwrap();

    parse(&schema, &documents(sources), config)
}

fn parse_sources(sdl: &str, sources: &[&str]) -> Result<ParseResult> {
    parse_with(sdl, sources, &Config::default())
}

/// One line per class, in registry order.
fn summary(result: &ParseResult) -> String {
    result
        .classes
        .values()
        .map(|class| {
            let selected = class
                .selected_output_names()
                .map(|names| format!(" selected=[{}]", names.join(", ")))
                .unwrap_or_default();

            format!(
                "{} inputs=[{}] outputs=[{}]{selected} complete={} multiple={}\n",
                class.id,
                class.input_names().join(", "),
                class.output_names().join(", "),
                class.is_complete_schema,
                class.has_multiple_queries,
            )
        })
        .collect()
}

const USER_SCHEMA: &str = indoc! {r#"
    type Query {
        me: User!
    }

    type User {
        name: String
        email: String
        age: Int
    }
"#};

#[test]
fn single_query_covering_the_type() {
    let result = parse_sources(
        "type Query { me: User! } type User { name: String! age: Int! }",
        &["query GetMe { me { name age } }"],
    )
    .unwrap();

    let expected = expect![[r#"
        User:output inputs=[] outputs=[name, age] selected=[name, age] complete=true multiple=false
        GetMe:input inputs=[] outputs=[me] complete=false multiple=false
    "#]];

    expected.assert_eq(&summary(&result));

    let operation = result.input_class("GetMe").unwrap();
    assert_eq!(operation.operation, Some(OperationKind::Query));
    assert_eq!(
        operation.outputs,
        vec![FieldValue::new("me", GqlType::output_object("User", false)).with_selected_fields(vec![
            "name".to_owned(),
            "age".to_owned()
        ])]
    );
}

#[test]
fn two_queries_selecting_different_fields() {
    let result = parse_sources(
        USER_SCHEMA,
        &["query GetName { me { name } }", "query GetEmail { me { email } }"],
    )
    .unwrap();

    let expected = expect![[r#"
        User:output inputs=[] outputs=[name, email, age] selected=[name, email] complete=true multiple=true
        GetName:input inputs=[] outputs=[me] complete=false multiple=false
        GetEmail:input inputs=[] outputs=[me] complete=false multiple=false
    "#]];

    expected.assert_eq(&summary(&result));
}

#[test]
fn single_query_selection_is_tracked_in_order() {
    let result = parse_sources(USER_SCHEMA, &["query GetUser { me { age name } }"]).unwrap();
    let user = result.output_class("User").unwrap();

    assert!(!user.has_multiple_queries);
    assert_eq!(user.selected_output_names(), Some(vec!["age", "name"]));
    assert_eq!(user.output_names(), vec!["name", "email", "age"]);
}

#[test]
fn operations_in_one_document_are_merged_like_separate_documents() {
    let result = parse_sources(
        USER_SCHEMA,
        &[indoc! {r#"
            query GetName { me { name } }
            query GetAge { me { age } }
        "#}],
    )
    .unwrap();

    let user = result.output_class("User").unwrap();
    assert!(user.has_multiple_queries);
    assert_eq!(user.selected_output_names(), Some(vec!["name", "age"]));

    let operations: Vec<_> = result.operations().map(|class| class.name.as_str()).collect();
    assert_eq!(operations, vec!["GetName", "GetAge"]);
}

#[test]
fn mutation_variables_become_input_classes() {
    let sdl = indoc! {r#"
        type Query { me: User }
        type Mutation { createUser(input: CreateUserInput!): User! }
        type User { name: String! age: Int }
        input CreateUserInput { name: String! age: Int }
    "#};
    let document = indoc! {r#"
        mutation CreateUser($input: CreateUserInput!) {
            createUser(input: $input) { name }
        }
    "#};

    let result = parse_sources(sdl, &[document]).unwrap();

    let operation = result.input_class("CreateUser").unwrap();
    assert_eq!(operation.operation, Some(OperationKind::Mutation));
    assert_eq!(
        operation.inputs,
        vec![FieldValue::new("input", GqlType::input_object("CreateUserInput", false))]
    );

    let input = result.input_class("CreateUserInput").unwrap();
    assert!(input.is_input);
    assert_eq!(input.operation, None);
    assert_eq!(input.input_names(), vec!["name", "age"]);
    assert!(!input.inputs[0].r#type.is_nullable());
    assert!(input.inputs[1].r#type.is_nullable());

    let ids: Vec<_> = result.classes.keys().map(String::as_str).collect();
    assert_eq!(ids, vec!["User:output", "CreateUserInput:input", "CreateUser:input"]);
}

#[test]
fn list_fields_take_the_nullability_of_their_elements() {
    let sdl = indoc! {r#"
        type Query { users: [User!]! tags: [String]! }
        type User { name: String }
    "#};

    let result = parse_sources(sdl, &["query ListUsers { users { name } tags }"]).unwrap();
    let operation = result.input_class("ListUsers").unwrap();

    let users = &operation.outputs[0];
    assert!(users.is_list);
    assert_eq!(users.r#type, GqlType::output_object("User", false));

    let tags = &operation.outputs[1];
    assert!(tags.is_list);
    assert_eq!(tags.r#type, GqlType::String { nullable: true });
}

#[test]
fn nested_selections_record_the_selected_fields() {
    let sdl = indoc! {r#"
        type Query { me: User }
        type User { name: String profile: Profile }
        type Profile { bio: String avatar: String location: String! }
    "#};
    let document = indoc! {r#"
        query GetUser {
            me {
                name
                profile {
                    bio
                    avatar
                }
            }
        }
    "#};

    let result = parse_sources(sdl, &[document]).unwrap();

    let user = result.output_class("User").unwrap();
    let profile = user
        .selected_outputs
        .as_ref()
        .and_then(|outputs| outputs.iter().find(|field| field.name == "profile"))
        .unwrap();

    assert_eq!(
        profile.selected_fields,
        Some(vec!["bio".to_owned(), "avatar".to_owned()])
    );

    let profile_class = result.output_class("Profile").unwrap();
    assert!(profile_class.is_complete_schema);
    assert_eq!(profile_class.output_names(), vec!["bio", "avatar", "location"]);
}

#[test]
fn unselected_object_types_are_walked_completely() {
    let sdl = indoc! {r#"
        type Query { me: User }
        type User { name: String profile: Profile }
        type Profile { bio: String settings: Settings! }
        type Settings { theme: String }
    "#};

    let result = parse_sources(sdl, &["query GetName { me { name } }"]).unwrap();

    let ids: Vec<_> = result.classes.keys().map(String::as_str).collect();
    assert_eq!(
        ids,
        vec!["User:output", "Settings:output", "Profile:output", "GetName:input"]
    );

    let settings = result.output_class("Settings").unwrap();
    assert!(settings.is_complete_schema);
    assert_eq!(settings.selected_outputs, None);
}

#[test]
fn recursive_types_terminate() {
    let sdl = indoc! {r#"
        type Query { me: User }
        type User { name: String friends: [User!]! }
    "#};

    let result = parse_sources(sdl, &["query GetFriends { me { name friends { name } } }"]).unwrap();

    let user = result.output_class("User").unwrap();
    assert_eq!(user.output_names(), vec!["name", "friends"]);
    assert!(user.is_complete_schema);
    assert_eq!(user.selected_output_names(), Some(vec!["name", "friends"]));
}

#[test]
fn typename_is_ignored() {
    let result = parse_sources(USER_SCHEMA, &["query GetUser { __typename me { __typename name } }"]).unwrap();

    let operation = result.input_class("GetUser").unwrap();
    assert_eq!(operation.output_names(), vec!["me"]);
    assert_eq!(
        result.output_class("User").unwrap().selected_output_names(),
        Some(vec!["name"])
    );
}

#[test]
fn aliased_fields_are_recorded_once() {
    let result = parse_sources(
        USER_SCHEMA,
        &["query GetUser { me { a: name b: name c: name d: name } }"],
    )
    .unwrap();

    let expected = expect![[r#"
        User:output inputs=[] outputs=[name, email, age] selected=[name] complete=true multiple=false
        GetUser:input inputs=[] outputs=[me] complete=false multiple=false
    "#]];

    expected.assert_eq(&summary(&result));

    let result = parse_sources(USER_SCHEMA, &["query GetUsers { first: me { name } second: me { age } }"]).unwrap();

    let operation = result.input_class("GetUsers").unwrap();
    assert_eq!(operation.output_names(), vec!["me"]);
    assert_eq!(
        operation.outputs[0].selected_fields,
        Some(vec!["name".to_owned(), "age".to_owned()])
    );
}

#[test]
fn aliased_object_fields_combine_their_selections() {
    let sdl = indoc! {r#"
        type Query { me: User }
        type User { name: String profile: Profile }
        type Profile { bio: String avatar: String location: String! }
    "#};
    let document = indoc! {r#"
        query GetUser {
            me {
                first: profile { bio }
                second: profile { avatar bio }
            }
        }
    "#};

    let result = parse_sources(sdl, &[document]).unwrap();

    let profile = result.output_class("Profile").unwrap();
    assert!(profile.is_complete_schema);
    assert!(!profile.has_multiple_queries);
    assert_eq!(profile.output_names(), vec!["bio", "avatar", "location"]);
    assert_eq!(profile.selected_output_names(), Some(vec!["bio", "avatar"]));

    let user = result.output_class("User").unwrap();
    let selected = user.selected_outputs.as_ref().unwrap();
    assert_eq!(selected.len(), 1);
    assert_eq!(
        selected[0].selected_fields,
        Some(vec!["bio".to_owned(), "avatar".to_owned()])
    );
}

#[test]
fn selection_on_a_type_the_schema_walk_reached_first() {
    let sdl = indoc! {r#"
        type Query { me: User }
        type User { name: String profile: Profile }
        type Profile { bio: String owner: User }
    "#};

    let result = parse_sources(sdl, &["query GetOwner { me { profile { owner { name } } } }"]).unwrap();

    // Profile is completed by the schema walk of User before its own selection is merged, which
    // counts as a second observation.
    let expected = expect![[r#"
        User:output inputs=[] outputs=[name, profile] selected=[name, profile] complete=true multiple=true
        Profile:output inputs=[] outputs=[bio, owner] selected=[owner] complete=true multiple=true
        GetOwner:input inputs=[] outputs=[me] complete=false multiple=false
    "#]];

    expected.assert_eq(&summary(&result));
}

#[test]
fn parsing_twice_keeps_the_same_fields() {
    let sources = ["query GetName { me { name } }", "query GetEmail { me { email age } }"];

    let once = parse_sources(USER_SCHEMA, &sources).unwrap();
    let twice = parse_sources(USER_SCHEMA, &sources)
        .unwrap()
        .merge(parse_sources(USER_SCHEMA, &sources).unwrap())
        .unwrap();

    assert_eq!(
        once.classes.keys().collect::<Vec<_>>(),
        twice.classes.keys().collect::<Vec<_>>()
    );

    for (id, class) in &once.classes {
        let merged = twice.class(id).unwrap();

        assert_eq!(class.output_names(), merged.output_names());
        assert_eq!(class.selected_output_names(), merged.selected_output_names());
        assert_eq!(class.is_complete_schema, merged.is_complete_schema);
    }
}

#[test]
fn output_is_deterministic() {
    let sources = ["query GetName { me { name } }", "query GetAge { me { age } }"];

    assert_eq!(
        parse_sources(USER_SCHEMA, &sources).unwrap(),
        parse_sources(USER_SCHEMA, &sources).unwrap()
    );
}

#[test]
fn user_defined_classes_are_attached() {
    let config = Config::from_toml(indoc! {r#"
        [user_defined_classes.User]
        path = "./mocks/user"
        export_name = "UserBuilder"
    "#})
    .unwrap();

    let result = optimise(parse_with(USER_SCHEMA, &["query GetName { me { name } }"], &config).unwrap());
    let user = result.output_class("User").unwrap();

    assert_eq!(
        user.user_defined,
        Some(UserDefinedClass {
            path: "./mocks/user".to_owned(),
            export_name: Some("UserBuilder".to_owned()),
        })
    );
    assert!(!user.should_inline);
}

#[test]
fn missing_field() {
    let error = parse_sources(USER_SCHEMA, &["query GetUser { me { nickname } }"]).unwrap_err();

    assert_matches!(
        &error,
        ParseError::FieldNotFound { field, type_name } if field == "nickname" && type_name == "User"
    );
    assert_eq!(error.to_string(), "Unable to find field type for: nickname in User");
}

#[test]
fn missing_document() {
    let schema = Schema::parse(USER_SCHEMA).unwrap();
    let documents = [DocumentFile {
        location: "missing.graphql".to_owned(),
        document: None,
    }];

    assert_matches!(
        parse(&schema, &documents, &Config::default()),
        Err(ParseError::MissingDocument { location }) if location == "missing.graphql"
    );
}

#[test]
fn unsupported_operations() {
    assert_matches!(
        parse_sources(USER_SCHEMA, &["{ me { name } }"]),
        Err(ParseError::MissingOperationName)
    );
    assert_matches!(
        parse_sources(USER_SCHEMA, &["subscription OnUser { me { name } }"]),
        Err(ParseError::UnsupportedOperation { name }) if name == "OnUser"
    );
    assert_matches!(
        parse_sources(USER_SCHEMA, &["mutation Rename { me { name } }"]),
        Err(ParseError::MissingRootType("mutation"))
    );
}

#[test]
fn unsupported_selections() {
    let fragment = indoc! {r#"
        query GetUser { me { ...UserFields } }
        fragment UserFields on User { name }
    "#};

    assert_matches!(
        parse_sources(USER_SCHEMA, &[fragment]),
        Err(ParseError::UnsupportedSelection { type_name, .. }) if type_name == "User"
    );
    assert_matches!(
        parse_sources(USER_SCHEMA, &["query GetUser { me { ... on User { name } } }"]),
        Err(ParseError::UnsupportedSelection { .. })
    );
    assert_matches!(
        parse_sources(USER_SCHEMA, &["query GetUser { me { name { length } } }"]),
        Err(ParseError::SelectionOnNonObject(name)) if name == "String"
    );
}

#[test]
fn unsupported_field_types() {
    let sdl = indoc! {r#"
        scalar Date
        enum Role { ADMIN USER }
        type Query { me: User }
        type User { name: String createdAt: Date role: Role }
    "#};

    assert_matches!(
        parse_sources(sdl, &["query GetName { me { name } }"]),
        Err(ParseError::UnknownScalar(name)) if name == "Date"
    );
    assert_matches!(
        parse_sources(
            "enum Role { ADMIN } type Query { role: Role }",
            &["query GetRole { role }"]
        ),
        Err(ParseError::UnparsableType(name)) if name == "Role"
    );
    assert_matches!(
        parse_sources(
            "type Query { matrix: [[Int!]!] }",
            &["query GetMatrix { matrix }"]
        ),
        Err(ParseError::UnsupportedType(_))
    );
}

#[test]
fn identity_conflicts() {
    let sdl = indoc! {r#"
        type Query { me: User }
        type Mutation { me: User }
        type User { name: String }
        input UserInput { name: String }
    "#};

    assert_matches!(
        parse_sources(sdl, &["query GetName { me { name } }", "mutation GetName { me { name } }"]),
        Err(ParseError::ConflictingClasses { name }) if name == "GetName"
    );
    assert_matches!(
        parse_sources(sdl, &["mutation UserInput($input: UserInput) { me { name } }"]),
        Err(ParseError::ConflictingClasses { name }) if name == "UserInput"
    );
}
