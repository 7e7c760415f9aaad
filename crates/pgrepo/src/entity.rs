//! The `Entity` trait: the hand-written contract a type implements to be
//! usable with [`crate::repository::Repository`].
//!
//! The repository and relation engine need to read and write fields on a
//! generic `T` by name, without knowing `T`'s shape at compile time. Rather
//! than deriving this reflection through a proc macro, each entity
//! implements it directly: `columns()` lists the physical column set,
//! `get_field` reads a field back by name for relation-key matching, and
//! `set_one`/`append_many` bind a loaded relation onto a batch of parents.

use std::any::Any;

use crate::error::RepositoryResult;
use crate::value::FieldValue;

/// A type that can be loaded from and written to a PostgreSQL table through
/// [`crate::repository::Repository`].
pub trait Entity: Send + Sync + Unpin + 'static {
    /// The physical column names of the backing table, in a stable order.
    /// Used to validate `QueryOptions::columns` and to build `INSERT`s.
    fn columns() -> &'static [&'static str];

    /// Read a field by name for relation-key matching (e.g. reading a
    /// foreign key or primary key off a row during eager loading).
    ///
    /// Returns `None` if `name` does not name a field this entity exposes
    /// for relation binding.
    fn get_field(&self, name: &str) -> Option<FieldValue>;

    /// Bind a loaded to-one relation onto this entity.
    ///
    /// `value` is the loaded child, boxed as `Any` since the relation engine
    /// is generic only over the parent type. Implementations downcast to
    /// their own child type and store it (typically behind an `Option`
    /// field). An unrecognized `name` or a downcast failure (the loader was
    /// wired to the wrong child type at registration time) returns
    /// [`RepositoryError::FieldNotFound`](crate::error::RepositoryError::FieldNotFound).
    fn set_one(&mut self, name: &str, value: Box<dyn Any + Send>) -> RepositoryResult<()>;

    /// Append loaded to-many relation children onto this entity.
    ///
    /// `values` is `Vec<Child>` boxed as `Any`. Implementations downcast and
    /// store it, typically replacing a `Vec` field. Same error contract as
    /// [`Entity::set_one`].
    fn append_many(&mut self, name: &str, values: Box<dyn Any + Send>) -> RepositoryResult<()>;
}
