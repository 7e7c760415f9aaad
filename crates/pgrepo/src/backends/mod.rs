//! Database-specific SQL text helpers.
//!
//! This crate targets PostgreSQL only; [`postgres::PostgresBackend`] holds
//! the handful of pure string-building helpers ([`compiler`](crate::compiler)
//! and [`repository`](crate::repository) own everything that needs to know
//! about filters or arguments).

pub mod postgres;