//! # pgrepo
//!
//! [![Crates.io](https://img.shields.io/crates/v/pgrepo.svg)](https://crates.io/crates/pgrepo)
//! [![Documentation](https://docs.rs/pgrepo/badge.svg)](https://docs.rs/pgrepo)
//! [![License: MIT OR Apache-2.0](https://img.shields.io/crates/l/pgrepo.svg)](#license)
//!
//! A generic repository pattern over PostgreSQL, built on [sqlx], with a
//! composable filter-to-SQL compiler and a relation hydration engine in
//! place of a fixed, per-entity query surface.
//!
//! ## Features
//!
//! - **Filter algebra** - a small [`Filter`] AST (`=`, `!=`, `>`, `<`,
//!   `>=`, `<=`, `LIKE`, `IN`, `NOT IN`, `IS NULL`, `IS NOT NULL`, grouped
//!   with `AND`/`OR`) compiled to parameterized SQL by [`compiler`]
//! - **Soft deletes** - a configurable tombstone column excluded from reads
//!   by rewriting the filter tree, not by duplicating query logic
//! - **Relation hydration** - one-to-one, one-to-many, and many-to-many
//!   eager loading by dotted path (`"author.team"`), dispatched against a
//!   hand-written [`Entity`] contract instead of a derive macro
//! - **CRUD** - `get`, `get_one`, `create`, `create_many`, `update`,
//!   `delete`, `count`, all bound to one table per [`Repository`]
//! - **PostgreSQL-native** - time-ordered UUID v7 primary keys, raw-SQL
//!   escape hatches in update payloads
//!
//! ## Quick start
//!
//! Implement [`Entity`] for your struct (column list, named field reads,
//! and relation binding), then build a [`Repository`] over it:
//!
//! ```rust,no_run
//! use std::any::Any;
//! use chrono::{DateTime, Utc};
//! use pgrepo::{Entity, FieldValue, QueryOptions, Repository};
//!
//! #[derive(Debug, Clone, sqlx::FromRow)]
//! struct User {
//!     id: uuid::Uuid,
//!     name: String,
//!     created_at: DateTime<Utc>,
//!     updated_at: DateTime<Utc>,
//! }
//!
//! impl Entity for User {
//!     fn columns() -> &'static [&'static str] {
//!         &["id", "name", "created_at", "updated_at"]
//!     }
//!
//!     fn get_field(&self, name: &str) -> Option<FieldValue> {
//!         match name {
//!             "id" => Some(FieldValue::Uuid(self.id)),
//!             "name" => Some(FieldValue::Text(self.name.clone())),
//!             _ => None,
//!         }
//!     }
//!
//!     fn set_one(&mut self, name: &str, _value: Box<dyn Any + Send>) -> pgrepo::RepositoryResult<()> {
//!         Err(pgrepo::RepositoryError::field_not_found("User", name))
//!     }
//!     fn append_many(&mut self, name: &str, _values: Box<dyn Any + Send>) -> pgrepo::RepositoryResult<()> {
//!         Err(pgrepo::RepositoryError::field_not_found("User", name))
//!     }
//! }
//!
//! # async fn example(pool: sqlx::PgPool) -> pgrepo::RepositoryResult<()> {
//! let users: Repository<User> = Repository::new(pool, "users")
//!     .with_order_columns(["id", "name", "created_at"]);
//!
//! let all = users.get(None, QueryOptions::new().with_limit(50)).await?;
//! # let _ = all;
//! # Ok(())
//! # }
//! ```
//!
//! ## Soft deletes
//!
//! ```rust,no_run
//! # use pgrepo::{Entity, FieldValue, Repository};
//! # use std::any::Any;
//! # #[derive(sqlx::FromRow)]
//! # struct Post { id: uuid::Uuid }
//! # impl Entity for Post {
//! #     fn columns() -> &'static [&'static str] { &["id"] }
//! #     fn get_field(&self, _name: &str) -> Option<FieldValue> { None }
//! #     fn set_one(&mut self, name: &str, _value: Box<dyn Any + Send>) -> pgrepo::RepositoryResult<()> {
//! #         Err(pgrepo::RepositoryError::field_not_found("Post", name))
//! #     }
//! #     fn append_many(&mut self, name: &str, _values: Box<dyn Any + Send>) -> pgrepo::RepositoryResult<()> {
//! #         Err(pgrepo::RepositoryError::field_not_found("Post", name))
//! #     }
//! # }
//! # fn example(pool: sqlx::PgPool) {
//! let posts: Repository<Post> = Repository::new(pool, "posts")
//!     .with_soft_delete("deleted_at");
//! # let _ = posts;
//! # }
//! ```
//!
//! `delete` on a soft-delete-enabled repository stamps `deleted_at`
//! instead of removing the row, and every `get`/`get_one`/`count`/`update`
//! call transparently excludes tombstoned rows by rewriting the caller's
//! filter. See [`soft_delete::with_soft_delete`] for the exact rewrite.
//!
//! ## Requirements
//!
//! - **Rust**: 1.70+
//! - **Database**: PostgreSQL
//!
//! ## License
//!
//! Licensed under either of
//!
//! - Apache License, Version 2.0 ([LICENSE-APACHE](LICENSE-APACHE) or <http://www.apache.org/licenses/LICENSE-2.0>)
//! - MIT License ([LICENSE-MIT](LICENSE-MIT) or <http://opensource.org/licenses/MIT>)
//!
//! at your option.

#![cfg_attr(docsrs, feature(doc_cfg))]
#![forbid(unsafe_code)]
#![warn(missing_docs, rust_2018_idioms)]

pub mod backends;
pub mod compiler;
pub mod entity;
pub mod error;
pub mod filter;
pub mod options;
pub mod relation;
pub mod repository;
pub mod soft_delete;
pub mod value;

pub use entity::Entity;
pub use error::{RepositoryError, RepositoryResult};
pub use filter::{Comparator, Filter, Operator};
pub use options::{OrderDir, QueryOptions};
pub use relation::{many_to_many::ManyToMany, one_to_many::OneToMany, one_to_one::OneToOne, RelationLoader};
pub use repository::Repository;
pub use value::{FieldValue, FilterValue, RawSql, UpdateValue};

/// Common imports for pgrepo users.
///
/// ```rust
/// use pgrepo::prelude::*;
/// ```
pub mod prelude {
    //! Common imports for pgrepo users.

    pub use crate::{Comparator, Entity, Filter, OrderDir, Operator, QueryOptions, Repository};
    pub use crate::{FieldValue, FilterValue, RawSql, UpdateValue};
    pub use crate::{RepositoryError, RepositoryResult};
    pub use crate::{ManyToMany, OneToMany, OneToOne, RelationLoader};

    pub use async_trait::async_trait;
}
