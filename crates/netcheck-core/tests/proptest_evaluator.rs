// crates/netcheck-core/tests/proptest_evaluator.rs
// ============================================================================
// Module: Evaluator Property-Based Tests
// Description: Property tests for set equality, ordering, and the error sentinel.
// Purpose: Detect order sensitivity and operator inconsistencies across wide inputs.
// ============================================================================

//! Property-based tests for evaluator laws.

#![allow(
    clippy::panic,
    clippy::print_stdout,
    clippy::print_stderr,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::use_debug,
    clippy::dbg_macro,
    clippy::panic_in_result_fn,
    clippy::unwrap_in_result,
    reason = "Test-only assertions and helpers are permitted."
)]

use netcheck_core::ERROR_SENTINEL;
use netcheck_core::Operator;
use netcheck_core::TestCase;
use netcheck_core::Verdict;
use netcheck_core::runtime::evaluator::evaluate;
use netcheck_core::runtime::evaluator::verdict;
use proptest::prelude::*;
use serde_json::Value;
use serde_json::json;

fn scalar_strategy() -> impl Strategy<Value = Value> {
    prop_oneof![
        any::<bool>().prop_map(Value::Bool),
        any::<i64>().prop_map(|v| Value::Number(v.into())),
        "[a-z]{1,8}".prop_map(Value::String),
    ]
}

fn operator_strategy() -> impl Strategy<Value = Operator> {
    prop_oneof![Just(Operator::Eq), Just(Operator::Lt), Just(Operator::Gt), Just(Operator::Neq)]
}

proptest! {
    #[test]
    fn eq_multiple_ignores_order_and_duplicates(
        items in prop::collection::vec(scalar_strategy(), 0 .. 8),
        seed in any::<u64>(),
    ) {
        let mut shuffled = items.clone();
        if !shuffled.is_empty() {
            let len = shuffled.len();
            let rotation = usize::try_from(seed % len as u64).unwrap();
            shuffled.rotate_left(rotation);
            shuffled.reverse();
            shuffled.push(shuffled[0].clone());
        }
        let case =
            TestCase::multiple("set", Operator::Eq, Value::Array(items), Value::Array(shuffled));
        prop_assert!(evaluate(&case));
    }

    #[test]
    fn neq_is_negation_of_eq_for_scalars(
        expected in scalar_strategy(),
        actual in scalar_strategy(),
    ) {
        let eq = evaluate(&TestCase::single("eq", Operator::Eq, expected.clone(), actual.clone()));
        let neq = evaluate(&TestCase::single("neq", Operator::Neq, expected, actual));
        prop_assert_ne!(eq, neq);
    }

    #[test]
    fn lt_and_gt_are_mirror_images(left in any::<i64>(), right in any::<i64>()) {
        let lt = evaluate(&TestCase::single("lt", Operator::Lt, json!(left), json!(right)));
        let gt = evaluate(&TestCase::single("gt", Operator::Gt, json!(right), json!(left)));
        prop_assert_eq!(lt, gt);
        prop_assert_eq!(lt, left < right);
    }

    #[test]
    fn error_sentinel_always_fails(operator in operator_strategy(), expected in scalar_strategy()) {
        let case = TestCase::single("sentinel", operator, expected, json!(ERROR_SENTINEL));
        prop_assert!(!evaluate(&case));
        prop_assert_eq!(verdict(&case), Verdict::ExecutionFailed);
    }
}

#[test]
fn set_equality_law_holds_for_reordered_pair() {
    let case = TestCase::multiple("caps", Operator::Eq, json!(["a", "b"]), json!(["b", "a"]));
    assert!(evaluate(&case));
}

#[test]
fn lt_gt_on_sequences_use_raw_positional_order() {
    let case = TestCase::multiple("lt", Operator::Lt, json!([1, 2]), json!([2, 1]));
    assert!(evaluate(&case));
    let case = TestCase::multiple("gt", Operator::Gt, json!([1, 2]), json!([2, 1]));
    assert!(!evaluate(&case));
}

#[test]
fn asymmetric_sequence_and_scalar_never_match_under_eq() {
    assert!(!evaluate(&TestCase::single("asym", Operator::Eq, json!("a"), json!(["a"]))));
    assert!(!evaluate(&TestCase::multiple("asym", Operator::Eq, json!(["a"]), json!("a"))));
}
