//! Soft-delete filter rewriting.
//!
//! When a repository is configured with a soft-delete column, every read and
//! write path must exclude tombstoned rows unless the caller explicitly asks
//! to include them. This module wraps a caller-supplied filter tree in an
//! extra `AND (column IS NULL)` group rather than widening the tree with
//! `OR`, since an `OR`-based rewrite would let a tombstoned row satisfy the
//! filter through any other disjunct and leak past the soft-delete boundary.

use crate::filter::{Comparator, Filter, Operator};

/// Wrap `filter` (if any) so that it also requires `column IS NULL`.
///
/// If `filter` is `None`, the returned filter is just the `IS NULL` check on
/// its own. Otherwise the original filter becomes the first child of a new
/// top-level `AND` group, so a `Group` filter keeps its own internal `OR`s
/// scoped inside its own parentheses and can't escape past the tombstone
/// check.
pub fn with_soft_delete(filter: Option<Filter>, column: &str) -> Filter {
    let not_deleted = Filter::null_check(column, Comparator::IsNull, Operator::And);
    match filter {
        None => not_deleted,
        Some(existing) => Filter::Group {
            filters: vec![joined_with_and(existing), not_deleted],
            operator: Operator::And,
        },
    }
}

/// Return `filter` with its top-level `operator` field set to `And`, so it
/// joins correctly as a non-final sibling in a new enclosing group.
fn joined_with_and(filter: Filter) -> Filter {
    match filter {
        Filter::Single {
            key,
            value,
            comparator,
            ..
        } => Filter::Single {
            key,
            value,
            comparator,
            operator: Operator::And,
        },
        Filter::MultiValue {
            key,
            values,
            comparator,
            ..
        } => Filter::MultiValue {
            key,
            values,
            comparator,
            operator: Operator::And,
        },
        Filter::Group { filters, .. } => Filter::Group {
            filters,
            operator: Operator::And,
        },
    }
}
