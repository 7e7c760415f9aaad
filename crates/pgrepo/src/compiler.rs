//! Compiles a [`Filter`] tree into a parameterized `WHERE` fragment.
//!
//! Placeholder numbering is 1-based, dense, and assigned left-to-right in
//! tree order starting at `start_index`. Malformed nodes (a comparator
//! paired with the wrong node shape) are skipped rather than rejected: they
//! are logged via `tracing::warn!` and dropped from the compiled tree, since
//! a single bad filter shouldn't fail the whole query.
//!
//! A top-level [`Filter::Group`] compiles its children directly, without an
//! enclosing parenthesis — it stands for the WHERE clause's sibling list,
//! not a nested sub-expression. Only a `Group` reached *through* recursion
//! (one `Group` inside another) gets wrapped, since there it really is a
//! parenthesized sub-expression of its parent.

use sqlx::postgres::PgArguments;

use crate::filter::{Comparator, Filter, Operator};

/// The result of compiling a filter tree: a `WHERE`-ready SQL fragment (with
/// no leading `WHERE` keyword) and the arguments bound to its placeholders.
pub struct CompiledFilter {
    pub sql: String,
    pub args: PgArguments,
    pub next_index: usize,
}

/// Compile `filter` into a SQL fragment, with placeholders starting at
/// `start_index` (1-based). Returns `None` if the filter compiled to an
/// empty fragment (every node in the tree was malformed and skipped).
pub fn compile(filter: &Filter, start_index: usize) -> Option<CompiledFilter> {
    let mut args = PgArguments::default();
    let (sql, next_index) = compile_into(filter, start_index, &mut args)?;
    Some(CompiledFilter {
        sql,
        args,
        next_index,
    })
}

/// Compile `filter` into an existing [`PgArguments`], appending its
/// placeholders after whatever is already bound. Used to share one argument
/// list across a statement's `SET` and `WHERE` clauses, where the `WHERE`
/// placeholders must continue numbering from wherever `SET` left off.
pub fn compile_into(
    filter: &Filter,
    start_index: usize,
    args: &mut PgArguments,
) -> Option<(String, usize)> {
    let mut index = start_index;
    let sql = match filter {
        Filter::Group { filters, .. } => compile_group_body(filters, &mut index, args)?,
        _ => compile_node(filter, &mut index, args)?,
    };
    Some((sql, index))
}

fn compile_node(filter: &Filter, index: &mut usize, args: &mut PgArguments) -> Option<String> {
    match filter {
        Filter::Single {
            key,
            value,
            comparator,
            ..
        } => {
            if comparator.is_list() {
                tracing::warn!(
                    key = %key,
                    comparator = ?comparator,
                    "skipping malformed filter: Single node with list comparator"
                );
                return None;
            }
            if comparator.is_nullary() {
                let op = match comparator {
                    Comparator::IsNull => "IS NULL",
                    Comparator::IsNotNull => "IS NOT NULL",
                    _ => unreachable!(),
                };
                return Some(format!("{key} {op}"));
            }
            let op = comparator.sql_operator()?;
            let placeholder = *index;
            *index += 1;
            if value.push_into(args).is_err() {
                tracing::warn!(key = %key, "skipping filter: failed to bind value");
                return None;
            }
            Some(format!("{key} {op} ${placeholder}"))
        }
        Filter::MultiValue {
            key,
            values,
            comparator,
            ..
        } => {
            if !comparator.is_list() {
                tracing::warn!(
                    key = %key,
                    comparator = ?comparator,
                    "skipping malformed filter: MultiValue node with non-list comparator"
                );
                return None;
            }
            if values.is_empty() {
                tracing::warn!(key = %key, "skipping filter: empty value list");
                return None;
            }
            let keyword = match comparator {
                Comparator::In => "IN",
                Comparator::NotIn => "NOT IN",
                _ => unreachable!(),
            };
            let mut placeholders = Vec::with_capacity(values.len());
            for value in values {
                let placeholder = *index;
                *index += 1;
                if value.push_into(args).is_err() {
                    tracing::warn!(key = %key, "skipping filter: failed to bind value in list");
                    return None;
                }
                placeholders.push(format!("${placeholder}"));
            }
            Some(format!("{key} {keyword} ({})", placeholders.join(", ")))
        }
        Filter::Group { filters, .. } => {
            let body = compile_group_body(filters, index, args)?;
            Some(format!("({body})"))
        }
    }
}

/// Compiles a group's children, joined by each included sibling's own
/// `operator`, with no enclosing parenthesis. Shared by the top-level
/// (unwrapped) and nested-group (wrapped by the caller) cases.
fn compile_group_body(filters: &[Filter], index: &mut usize, args: &mut PgArguments) -> Option<String> {
    let mut parts: Vec<(&'static str, String)> = Vec::with_capacity(filters.len());
    let mut last_included: Option<usize> = None;
    for (i, child) in filters.iter().enumerate() {
        if let Some(fragment) = compile_node(child, index, args) {
            let keyword = match last_included {
                None => "",
                Some(prev) => operator_keyword(&filters[prev]),
            };
            parts.push((keyword, fragment));
            last_included = Some(i);
        }
    }
    if parts.is_empty() {
        return None;
    }
    let mut sql = String::new();
    for (i, (keyword, fragment)) in parts.iter().enumerate() {
        if i > 0 {
            sql.push(' ');
            sql.push_str(keyword);
            sql.push(' ');
        }
        sql.push_str(fragment);
    }
    Some(sql)
}

fn operator_keyword(filter: &Filter) -> &'static str {
    let operator = match filter {
        Filter::Single { operator, .. } => *operator,
        Filter::MultiValue { operator, .. } => *operator,
        Filter::Group { operator, .. } => *operator,
    };
    match operator {
        Operator::And => "AND",
        Operator::Or => "OR",
    }
}
