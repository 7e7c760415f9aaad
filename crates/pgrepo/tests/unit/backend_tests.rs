//! Unit tests for database backend helpers

use pgrepo::backends::postgres::PostgresBackend;

#[test]
fn test_postgres_placeholder() {
    assert_eq!(PostgresBackend::placeholder(1), "$1");
    assert_eq!(PostgresBackend::placeholder(5), "$5");
    assert_eq!(PostgresBackend::placeholder(100), "$100");
}

#[test]
fn test_postgres_convert_type() {
    assert_eq!(PostgresBackend::convert_type("i32"), "INTEGER");
    assert_eq!(PostgresBackend::convert_type("i64"), "BIGINT");
    assert_eq!(PostgresBackend::convert_type("String"), "VARCHAR");
    assert_eq!(PostgresBackend::convert_type("bool"), "BOOLEAN");
    assert_eq!(
        PostgresBackend::convert_type("DateTime<Utc>"),
        "TIMESTAMP WITH TIME ZONE"
    );
    assert_eq!(PostgresBackend::convert_type("Uuid"), "UUID");
    assert_eq!(PostgresBackend::convert_type("f64"), "DOUBLE PRECISION");

    // Unknown type should default to VARCHAR
    assert_eq!(PostgresBackend::convert_type("CustomType"), "VARCHAR");
}
