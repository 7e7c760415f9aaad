//! Unit tests for the filter compiler

use pgrepo::{compiler, Comparator, Filter, Operator};

#[test]
fn compiles_single_eq() {
    let filter = Filter::eq("name", "alice", Operator::And);
    let compiled = compiler::compile(&filter, 1).expect("compiles");
    assert_eq!(compiled.sql, "name = $1");
    assert_eq!(compiled.next_index, 2);
}

#[test]
fn compiles_null_checks_without_a_placeholder() {
    let filter = Filter::null_check("deleted_at", Comparator::IsNull, Operator::And);
    let compiled = compiler::compile(&filter, 1).expect("compiles");
    assert_eq!(compiled.sql, "deleted_at IS NULL");
    assert_eq!(compiled.next_index, 1);
}

#[test]
fn compiles_multi_value_in() {
    let filter = Filter::MultiValue {
        key: "status".to_string(),
        values: vec!["open".into(), "pending".into()],
        comparator: Comparator::In,
        operator: Operator::And,
    };
    let compiled = compiler::compile(&filter, 1).expect("compiles");
    assert_eq!(compiled.sql, "status IN ($1, $2)");
    assert_eq!(compiled.next_index, 3);
}

#[test]
fn compiles_group_with_mixed_operators() {
    let filter = Filter::group(
        vec![
            Filter::eq("status", "open", Operator::And),
            Filter::eq("priority", 1i64, Operator::Or),
            Filter::eq("assignee", "alice", Operator::And),
        ],
        Operator::And,
    );
    let compiled = compiler::compile(&filter, 1).expect("compiles");
    assert_eq!(compiled.sql, "status = $1 OR priority = $2 AND assignee = $3");
    assert_eq!(compiled.next_index, 4);
}

#[test]
fn nested_group_is_parenthesized_but_top_level_group_is_not() {
    let filter = Filter::group(
        vec![
            Filter::eq("id", 2i64, Operator::And),
            Filter::group(
                vec![
                    Filter::null_check("expires_at", Comparator::IsNull, Operator::Or),
                    Filter::Single {
                        key: "expires_at".to_string(),
                        value: 100i64.into(),
                        comparator: Comparator::Gt,
                        operator: Operator::Or,
                    },
                ],
                Operator::And,
            ),
        ],
        Operator::And,
    );
    let compiled = compiler::compile(&filter, 1).expect("compiles");
    assert_eq!(
        compiled.sql,
        "id = $1 AND (expires_at IS NULL OR expires_at > $2)"
    );
}

#[test]
fn continues_numbering_from_a_given_start_index() {
    let filter = Filter::eq("name", "alice", Operator::And);
    let compiled = compiler::compile(&filter, 5).expect("compiles");
    assert_eq!(compiled.sql, "name = $5");
    assert_eq!(compiled.next_index, 6);
}

#[test]
fn skips_single_node_with_a_list_comparator() {
    let filter = Filter::Single {
        key: "status".to_string(),
        value: "open".into(),
        comparator: Comparator::In,
        operator: Operator::And,
    };
    assert!(compiler::compile(&filter, 1).is_none());
}

#[test]
fn skips_multi_value_node_with_a_non_list_comparator() {
    let filter = Filter::MultiValue {
        key: "status".to_string(),
        values: vec!["open".into()],
        comparator: Comparator::Eq,
        operator: Operator::And,
    };
    assert!(compiler::compile(&filter, 1).is_none());
}

#[test]
fn group_skips_malformed_siblings_but_keeps_the_rest() {
    let filter = Filter::group(
        vec![
            Filter::eq("status", "open", Operator::And),
            Filter::Single {
                key: "bad".to_string(),
                value: "x".into(),
                comparator: Comparator::In,
                operator: Operator::And,
            },
            Filter::eq("priority", 1i64, Operator::Or),
        ],
        Operator::And,
    );
    let compiled = compiler::compile(&filter, 1).expect("compiles");
    assert_eq!(compiled.sql, "status = $1 OR priority = $2");
}

#[test]
fn group_with_only_malformed_children_compiles_to_nothing() {
    let filter = Filter::group(
        vec![Filter::Single {
            key: "bad".to_string(),
            value: "x".into(),
            comparator: Comparator::In,
            operator: Operator::And,
        }],
        Operator::And,
    );
    assert!(compiler::compile(&filter, 1).is_none());
}
