//! Property-based tests for the access guard and goal funding rules.
//!
//! These tests verify that universal properties hold across all valid inputs,
//! using the `proptest` crate for random test case generation.

use chrono::NaiveDateTime;
use kepengen_core::access::{authorize, Decision, DenyReason, Operation};
use kepengen_core::goals::{FundingStatus, Goal, GoalsSummary};
use kepengen_core::identity::{Identity, Role};
use proptest::prelude::*;

// =============================================================================
// Generators
// =============================================================================

fn arb_operation() -> impl Strategy<Value = Operation> {
    proptest::sample::select(Operation::ALL.to_vec())
}

fn arb_owner_scoped_operation() -> impl Strategy<Value = Operation> {
    let ops: Vec<Operation> = Operation::ALL
        .into_iter()
        .filter(|op| op.is_owner_scoped())
        .collect();
    proptest::sample::select(ops)
}

fn arb_goal() -> impl Strategy<Value = Goal> {
    (1i64..10_000_000, 0i64..20_000_000).prop_map(|(target, collected)| Goal {
        id: "g".to_string(),
        owner_id: "u".to_string(),
        name: "goal".to_string(),
        description: None,
        target_amount: target,
        collected_amount: collected,
        image_ref: None,
        created_at: NaiveDateTime::default(),
    })
}

// =============================================================================
// Property Tests
// =============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    /// Owner-scoped operations are denied whenever the resource owner differs
    /// from the caller, for every non-admin identity.
    #[test]
    fn prop_owner_scoped_denies_foreign_owner(
        op in arb_owner_scoped_operation(),
        caller in "[a-z0-9]{1,12}",
        owner in "[a-z0-9]{1,12}",
    ) {
        prop_assume!(caller != owner);
        let identity = Identity::new(caller, Role::User);
        prop_assert_eq!(
            authorize(Some(&identity), op, Some(owner.as_str())),
            Decision::Deny(DenyReason::Forbidden)
        );
    }

    /// Without an identity nothing is allowed.
    #[test]
    fn prop_missing_identity_always_unauthenticated(
        op in arb_operation(),
        owner in proptest::option::of("[a-z0-9]{1,12}"),
    ) {
        prop_assert_eq!(
            authorize(None, op, owner.as_deref()),
            Decision::Deny(DenyReason::Unauthenticated)
        );
    }

    /// Installments only move a goal forward through its funding states and
    /// the collected amount never decreases.
    #[test]
    fn prop_funding_status_is_monotonic(
        target in 1i64..1_000_000,
        amounts in proptest::collection::vec(1i64..200_000, 0..30),
    ) {
        let mut goal = Goal {
            id: "g".to_string(),
            owner_id: "u".to_string(),
            name: "goal".to_string(),
            description: None,
            target_amount: target,
            collected_amount: 0,
            image_ref: None,
            created_at: NaiveDateTime::default(),
        };
        let mut status = goal.funding_status();
        let mut progress = goal.progress_percent();
        prop_assert_eq!(status, FundingStatus::Unfunded);

        for amount in &amounts {
            let before = goal.collected_amount;
            goal.collected_amount += amount;
            prop_assert!(goal.collected_amount > before);
            prop_assert!(goal.funding_status() >= status);
            prop_assert!(goal.progress_percent() >= progress);
            status = goal.funding_status();
            progress = goal.progress_percent();
        }
        prop_assert_eq!(goal.collected_amount, amounts.iter().sum::<i64>());
    }

    /// The summary totals equal the sums over the listed goals.
    #[test]
    fn prop_summary_matches_goals(goals in proptest::collection::vec(arb_goal(), 0..20)) {
        let summary = GoalsSummary::from_goals(&goals);
        prop_assert_eq!(summary.total_goals, goals.len());
        prop_assert!(summary.funded_goals <= summary.total_goals);
        prop_assert_eq!(
            summary.total_collected,
            goals.iter().map(|g| g.collected_amount).sum::<i64>()
        );
        prop_assert_eq!(
            summary.funded_goals,
            goals.iter().filter(|g| g.collected_amount >= g.target_amount && g.collected_amount > 0).count()
        );
    }
}
