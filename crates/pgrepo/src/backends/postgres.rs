//! PostgreSQL-specific helpers that don't belong to the filter compiler or
//! the repository's own statement builders.

/// PostgreSQL-specific query helpers
pub struct PostgresBackend;

impl PostgresBackend {
    /// Render a PostgreSQL positional placeholder for parameter binding.
    pub fn placeholder(index: usize) -> String {
        format!("${}", index)
    }

    /// Map a Rust type name to the PostgreSQL column type used for it.
    pub fn convert_type(rust_type: &str) -> &str {
        match rust_type {
            "i32" => "INTEGER",
            "i64" => "BIGINT",
            "String" => "VARCHAR",
            "bool" => "BOOLEAN",
            "DateTime<Utc>" => "TIMESTAMP WITH TIME ZONE",
            "NaiveDateTime" => "TIMESTAMP",
            "NaiveDate" => "DATE",
            "NaiveTime" => "TIME",
            "Decimal" => "DECIMAL",
            "f32" => "REAL",
            "f64" => "DOUBLE PRECISION",
            "Uuid" => "UUID",
            _ => "VARCHAR",
        }
    }
}
