//! The filter algebra: a small, serializable AST describing `WHERE` clauses
//! independent of any particular table or column set.
//!
//! A [`Filter`] tree is compiled against a concrete table by
//! [`crate::compiler`], which is the only place that knows how to turn this
//! algebra into parameterized SQL.

use crate::value::FilterValue;

/// Comparison operators usable in a [`Filter::Single`] or [`Filter::MultiValue`] node.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Comparator {
    Eq,
    NotEq,
    Gt,
    Lt,
    Gte,
    Lte,
    Like,
    In,
    NotIn,
    IsNull,
    IsNotNull,
}

impl Comparator {
    /// The SQL operator text for comparators that take a bound placeholder.
    ///
    /// Returns `None` for `In`/`NotIn` (which render a placeholder list) and
    /// `IsNull`/`IsNotNull` (which take no placeholder at all).
    pub fn sql_operator(self) -> Option<&'static str> {
        match self {
            Comparator::Eq => Some("="),
            Comparator::NotEq => Some("!="),
            Comparator::Gt => Some(">"),
            Comparator::Lt => Some("<"),
            Comparator::Gte => Some(">="),
            Comparator::Lte => Some("<="),
            Comparator::Like => Some("LIKE"),
            Comparator::In | Comparator::NotIn | Comparator::IsNull | Comparator::IsNotNull => {
                None
            }
        }
    }

    /// Whether this comparator takes a list of values rather than a single one.
    pub fn is_list(self) -> bool {
        matches!(self, Comparator::In | Comparator::NotIn)
    }

    /// Whether this comparator takes no value at all.
    pub fn is_nullary(self) -> bool {
        matches!(self, Comparator::IsNull | Comparator::IsNotNull)
    }
}

/// Boolean connective joining sibling filters inside a [`Filter::Group`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operator {
    And,
    Or,
}

impl Operator {
    pub fn sql_keyword(self) -> &'static str {
        match self {
            Operator::And => "AND",
            Operator::Or => "OR",
        }
    }
}

/// A node in the filter tree.
///
/// `Single` and `MultiValue` carry their own `operator`, which describes how
/// that node joins with its *next sibling* inside the enclosing `Group` (the
/// operator on the last element of a group is ignored, since there's no
/// following sibling to join to).
#[derive(Debug, Clone)]
pub enum Filter {
    /// A single-value comparison, e.g. `age > 18`.
    Single {
        key: String,
        value: FilterValue,
        comparator: Comparator,
        operator: Operator,
    },
    /// A comparison against a list of values, e.g. `status IN (...)`.
    MultiValue {
        key: String,
        values: Vec<FilterValue>,
        comparator: Comparator,
        operator: Operator,
    },
    /// A sub-tree of sibling filters joined by `operator`. Parenthesized by
    /// the compiler when nested inside another `Group`; left unparenthesized
    /// at the top level, where it stands for the whole `WHERE` clause.
    Group {
        filters: Vec<Filter>,
        operator: Operator,
    },
}

impl Filter {
    /// Build an `IS NULL` / `IS NOT NULL` filter. These comparators carry no
    /// value; callers should prefer this constructor over `Single` with a
    /// placeholder value, since `Single` rejects nullary comparators.
    pub fn null_check(key: impl Into<String>, comparator: Comparator, operator: Operator) -> Self {
        debug_assert!(comparator.is_nullary());
        Filter::Single {
            key: key.into(),
            value: FilterValue::Null,
            comparator,
            operator,
        }
    }

    pub fn eq(key: impl Into<String>, value: impl Into<FilterValue>, operator: Operator) -> Self {
        Filter::Single {
            key: key.into(),
            value: value.into(),
            comparator: Comparator::Eq,
            operator,
        }
    }

    pub fn group(filters: Vec<Filter>, operator: Operator) -> Self {
        Filter::Group { filters, operator }
    }
}
