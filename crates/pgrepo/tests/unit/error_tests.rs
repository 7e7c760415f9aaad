//! Unit tests for error handling

use pgrepo::{RepositoryError, RepositoryResult};

#[test]
fn test_repository_error_not_found() {
    let error = RepositoryError::not_found("User", "id", 123);

    match &error {
        RepositoryError::NotFound { entity, field, value } => {
            assert_eq!(entity, "User");
            assert_eq!(field, "id");
            assert_eq!(value, "123");
        }
        _ => panic!("Expected NotFound error"),
    }

    assert_eq!(error.to_string(), "not found: User with id = 123");
}

#[test]
fn test_repository_error_validation() {
    let error = RepositoryError::validation("Email is invalid");

    match &error {
        RepositoryError::Validation(msg) => {
            assert_eq!(msg, "Email is invalid");
        }
        _ => panic!("Expected Validation error"),
    }

    assert_eq!(error.to_string(), "validation error: Email is invalid");
}

#[test]
fn test_repository_error_configuration() {
    let error = RepositoryError::configuration("Database URL not provided");

    match &error {
        RepositoryError::Configuration(msg) => {
            assert_eq!(msg, "Database URL not provided");
        }
        _ => panic!("Expected Configuration error"),
    }

    assert_eq!(
        error.to_string(),
        "configuration error: Database URL not provided"
    );
}

#[test]
fn test_repository_error_invalid_order_column() {
    let error = RepositoryError::invalid_order_column("secret", "users");

    match &error {
        RepositoryError::InvalidOrderColumn { column, table } => {
            assert_eq!(column, "secret");
            assert_eq!(table, "users");
        }
        _ => panic!("Expected InvalidOrderColumn error"),
    }
}

#[test]
fn test_repository_error_unknown_relation() {
    let error = RepositoryError::unknown_relation("author", "posts");

    match &error {
        RepositoryError::UnknownRelation { name, table } => {
            assert_eq!(name, "author");
            assert_eq!(table, "posts");
        }
        _ => panic!("Expected UnknownRelation error"),
    }
}

#[test]
fn test_repository_error_duplicate_relation() {
    let error = RepositoryError::duplicate_relation("author", "posts");

    assert!(matches!(error, RepositoryError::DuplicateRelation { .. }));
}

#[test]
fn test_repository_error_field_not_found() {
    let error = RepositoryError::field_not_found("Post", "slug");

    match &error {
        RepositoryError::FieldNotFound { entity, field } => {
            assert_eq!(entity, "Post");
            assert_eq!(field, "slug");
        }
        _ => panic!("Expected FieldNotFound error"),
    }
}

#[test]
fn test_repository_error_relation_load_wraps_its_source() {
    let source = RepositoryError::field_not_found("User", "profile");
    let error = RepositoryError::relation_load("profile", source);

    match &error {
        RepositoryError::RelationLoad { name, source } => {
            assert_eq!(name, "profile");
            assert!(matches!(**source, RepositoryError::FieldNotFound { .. }));
        }
        _ => panic!("Expected RelationLoad error"),
    }

    assert_eq!(
        error.to_string(),
        "failed to load relation 'profile': field 'profile' not found on entity 'User'"
    );
}

#[test]
fn test_repository_result_type_alias() {
    let success: RepositoryResult<String> = Ok("test".to_string());
    assert!(success.is_ok());
    assert_eq!(success.unwrap(), "test");

    let failure: RepositoryResult<String> = Err(RepositoryError::validation("test error"));
    assert!(failure.is_err());
}
