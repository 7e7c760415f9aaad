//! Error types for pgrepo.
//!
//! This module provides the domain error surface for repository operations:
//! database errors, not-found translation, and the validation errors raised
//! by the filter compiler, order-column whitelist, and relation engine.

use thiserror::Error;

/// Result type alias for repository operations
pub type RepositoryResult<T> = Result<T, RepositoryError>;

/// Error types that can occur during repository operations
#[derive(Error, Debug)]
pub enum RepositoryError {
    /// Database error from sqlx
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    /// A row failed to decode into the entity's `FromRow` shape
    #[error("failed to scan data: {0}")]
    Scan(#[source] sqlx::Error),

    /// A relation loader failed while hydrating a named relation
    #[error("failed to load relation '{name}': {source}")]
    RelationLoad {
        /// The relation name being loaded
        name: String,
        /// The underlying failure
        #[source]
        source: Box<RepositoryError>,
    },

    /// Entity not found
    #[error("not found: {entity} with {field} = {value}")]
    NotFound {
        /// Entity type name
        entity: String,
        /// Field that was searched
        field: String,
        /// Value that was searched for
        value: String,
    },

    /// `OrderColumn` was not in the repository's whitelist
    #[error("invalid order column '{column}' for table '{table}'")]
    InvalidOrderColumn {
        /// The rejected column name
        column: String,
        /// The table the repository is bound to
        table: String,
    },

    /// A relation path's head segment did not match any registered loader
    #[error("unknown relation '{name}' on table '{table}'")]
    UnknownRelation {
        /// The unresolved relation name
        name: String,
        /// The table the repository is bound to
        table: String,
    },

    /// `add_relation` was called twice with the same name
    #[error("relation '{name}' is already registered on table '{table}'")]
    DuplicateRelation {
        /// The relation name that collided
        name: String,
        /// The table the repository is bound to
        table: String,
    },

    /// A named field was not found (or was the wrong type) on an entity
    /// during relation binding
    #[error("field '{field}' not found on entity '{entity}'")]
    FieldNotFound {
        /// Entity type name
        entity: String,
        /// Field name that was requested
        field: String,
    },

    /// Validation error (e.g. malformed payload for `create`/`create_many`)
    #[error("validation error: {0}")]
    Validation(String),

    /// Configuration error (e.g. a soft-delete op requested without a
    /// configured tombstone column)
    #[error("configuration error: {0}")]
    Configuration(String),
}

impl RepositoryError {
    /// Create a new `NotFound` error
    pub fn not_found(entity: &str, field: &str, value: impl std::fmt::Display) -> Self {
        Self::NotFound {
            entity: entity.to_string(),
            field: field.to_string(),
            value: value.to_string(),
        }
    }

    /// Create a new `RelationLoad` error
    pub fn relation_load(name: impl Into<String>, source: RepositoryError) -> Self {
        Self::RelationLoad {
            name: name.into(),
            source: Box::new(source),
        }
    }

    /// Create a new `InvalidOrderColumn` error
    pub fn invalid_order_column(column: impl Into<String>, table: impl Into<String>) -> Self {
        Self::InvalidOrderColumn {
            column: column.into(),
            table: table.into(),
        }
    }

    /// Create a new `UnknownRelation` error
    pub fn unknown_relation(name: impl Into<String>, table: impl Into<String>) -> Self {
        Self::UnknownRelation {
            name: name.into(),
            table: table.into(),
        }
    }

    /// Create a new `DuplicateRelation` error
    pub fn duplicate_relation(name: impl Into<String>, table: impl Into<String>) -> Self {
        Self::DuplicateRelation {
            name: name.into(),
            table: table.into(),
        }
    }

    /// Create a new `FieldNotFound` error
    pub fn field_not_found(entity: impl Into<String>, field: impl Into<String>) -> Self {
        Self::FieldNotFound {
            entity: entity.into(),
            field: field.into(),
        }
    }

    /// Create a new `Validation` error
    pub fn validation(msg: impl std::fmt::Display) -> Self {
        Self::Validation(msg.to_string())
    }

    /// Create a new `Configuration` error
    pub fn configuration(msg: impl std::fmt::Display) -> Self {
        Self::Configuration(msg.to_string())
    }
}
