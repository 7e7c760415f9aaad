//! Dynamic value types used at the boundary between Rust entities and
//! parameterized SQL.
//!
//! sqlx does not support binding trait-object `Encode` values the way
//! `tokio_postgres`'s `ToSql` does, so filters and payloads carry values as
//! a closed [`FilterValue`] enum that the query builders push one at a time
//! into a [`sqlx::postgres::PgArguments`].

use chrono::{DateTime, Utc};
use sqlx::postgres::PgArguments;
use sqlx::Arguments;
use uuid::Uuid;

/// A value bindable as a query parameter.
#[derive(Debug, Clone, PartialEq)]
pub enum FilterValue {
    Text(String),
    Int(i64),
    Float(f64),
    Bool(bool),
    Uuid(Uuid),
    Timestamp(DateTime<Utc>),
    Null,
}

impl FilterValue {
    /// Push this value onto a set of positional arguments, in order.
    pub fn push_into(&self, args: &mut PgArguments) -> Result<(), sqlx::error::BoxDynError> {
        match self {
            FilterValue::Text(v) => args.add(v)?,
            FilterValue::Int(v) => args.add(v)?,
            FilterValue::Float(v) => args.add(v)?,
            FilterValue::Bool(v) => args.add(v)?,
            FilterValue::Uuid(v) => args.add(v)?,
            FilterValue::Timestamp(v) => args.add(v)?,
            FilterValue::Null => args.add(Option::<String>::None)?,
        }
        Ok(())
    }
}

impl From<String> for FilterValue {
    fn from(v: String) -> Self {
        FilterValue::Text(v)
    }
}

impl From<&str> for FilterValue {
    fn from(v: &str) -> Self {
        FilterValue::Text(v.to_string())
    }
}

impl From<i64> for FilterValue {
    fn from(v: i64) -> Self {
        FilterValue::Int(v)
    }
}

impl From<i32> for FilterValue {
    fn from(v: i32) -> Self {
        FilterValue::Int(v as i64)
    }
}

impl From<f64> for FilterValue {
    fn from(v: f64) -> Self {
        FilterValue::Float(v)
    }
}

impl From<bool> for FilterValue {
    fn from(v: bool) -> Self {
        FilterValue::Bool(v)
    }
}

impl From<Uuid> for FilterValue {
    fn from(v: Uuid) -> Self {
        FilterValue::Uuid(v)
    }
}

impl From<DateTime<Utc>> for FilterValue {
    fn from(v: DateTime<Utc>) -> Self {
        FilterValue::Timestamp(v)
    }
}

impl<T> From<Option<T>> for FilterValue
where
    T: Into<FilterValue>,
{
    fn from(v: Option<T>) -> Self {
        match v {
            Some(v) => v.into(),
            None => FilterValue::Null,
        }
    }
}

/// A value read back off an entity by name, used when the relation engine
/// needs to match parent keys against child foreign keys without knowing
/// either type at compile time.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum FieldValue {
    Text(String),
    Int(i64),
    Uuid(Uuid),
    Null,
}

impl std::fmt::Display for FieldValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FieldValue::Text(v) => write!(f, "{v}"),
            FieldValue::Int(v) => write!(f, "{v}"),
            FieldValue::Uuid(v) => write!(f, "{v}"),
            FieldValue::Null => write!(f, "NULL"),
        }
    }
}

impl From<FieldValue> for FilterValue {
    fn from(v: FieldValue) -> Self {
        match v {
            FieldValue::Text(v) => FilterValue::Text(v),
            FieldValue::Int(v) => FilterValue::Int(v),
            FieldValue::Uuid(v) => FilterValue::Uuid(v),
            FieldValue::Null => FilterValue::Null,
        }
    }
}

/// A fragment of raw SQL, used as an escape hatch in [`UpdateValue::Raw`]
/// for expressions such as `updated_at = now()` that can't be expressed as a
/// bound value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawSql(pub String);

impl RawSql {
    pub fn new(sql: impl Into<String>) -> Self {
        Self(sql.into())
    }
}

/// A value in an update payload: either a normal bound value, or a raw SQL
/// expression that bypasses parameter binding entirely.
#[derive(Debug, Clone, PartialEq)]
pub enum UpdateValue {
    Bound(FilterValue),
    Raw(RawSql),
}

impl<T> From<T> for UpdateValue
where
    T: Into<FilterValue>,
{
    fn from(v: T) -> Self {
        UpdateValue::Bound(v.into())
    }
}
