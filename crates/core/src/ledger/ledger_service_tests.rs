#[cfg(test)]
mod tests {
    use crate::errors::ErrorKind;
    use crate::goals::{GoalService, GoalServiceTrait, NewGoal};
    use crate::identity::{Identity, Role};
    use crate::ledger::{LedgerService, LedgerServiceTrait, NewInstallment};
    use crate::testing::InMemoryStore;
    use futures::future::join_all;
    use std::sync::Arc;

    async fn setup_goal(target: i64) -> (Arc<InMemoryStore>, Arc<LedgerService>, String) {
        let store = Arc::new(InMemoryStore::new());
        let goals = GoalService::new(store.clone());
        let ledger = Arc::new(LedgerService::new(store.clone()));
        let alice = Identity::new("alice", Role::User);
        let goal = goals
            .create_goal(
                Some(&alice),
                "alice",
                NewGoal {
                    name: "Laptop".to_string(),
                    description: None,
                    target_amount: target,
                    image_ref: None,
                },
            )
            .await
            .unwrap();
        (store, ledger, goal.id)
    }

    #[tokio::test]
    async fn test_append_returns_fresh_aggregate() {
        let (_, ledger, goal_id) = setup_goal(1_000).await;
        let alice = Identity::new("alice", Role::User);

        let goal = ledger
            .append_installment(Some(&alice), &goal_id, "alice", NewInstallment { amount: 250 })
            .await
            .unwrap();
        assert_eq!(goal.collected_amount, 250);

        let goal = ledger
            .append_installment(Some(&alice), &goal_id, "alice", NewInstallment { amount: 50 })
            .await
            .unwrap();
        assert_eq!(goal.collected_amount, 300);
    }

    #[tokio::test]
    async fn test_zero_amount_is_rejected_without_state_change() {
        let (store, ledger, goal_id) = setup_goal(1_000).await;
        let alice = Identity::new("alice", Role::User);

        for amount in [0, -10] {
            let err = ledger
                .append_installment(Some(&alice), &goal_id, "alice", NewInstallment { amount })
                .await
                .unwrap_err();
            assert_eq!(err.kind(), ErrorKind::InvalidInput);
        }
        assert_eq!(store.installment_count(&goal_id), 0);
        assert!(ledger
            .get_history(Some(&alice), &goal_id, "alice")
            .unwrap()
            .is_empty());
    }

    #[tokio::test]
    async fn test_append_to_someone_elses_goal_is_not_found() {
        let (store, ledger, goal_id) = setup_goal(1_000).await;
        let bob = Identity::new("bob", Role::User);

        let err = ledger
            .append_installment(Some(&bob), &goal_id, "bob", NewInstallment { amount: 10 })
            .await
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::NotFound);
        assert_eq!(store.installment_count(&goal_id), 0);
    }

    #[tokio::test]
    async fn test_unauthenticated_append_is_rejected() {
        let (_, ledger, goal_id) = setup_goal(1_000).await;
        let err = ledger
            .append_installment(None, &goal_id, "alice", NewInstallment { amount: 10 })
            .await
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Unauthenticated);
    }

    #[tokio::test]
    async fn test_concurrent_installments_are_not_lost() {
        let (_, ledger, goal_id) = setup_goal(1_000_000).await;
        let alice = Identity::new("alice", Role::User);

        let calls = [300_000, 400_000].into_iter().map(|amount| {
            let ledger = ledger.clone();
            let goal_id = goal_id.clone();
            let alice = alice.clone();
            async move {
                ledger
                    .append_installment(Some(&alice), &goal_id, "alice", NewInstallment { amount })
                    .await
            }
        });
        for result in join_all(calls).await {
            result.unwrap();
        }

        let history = ledger.get_history(Some(&alice), &goal_id, "alice").unwrap();
        assert_eq!(history.len(), 2);
        let sum: i64 = history.iter().map(|i| i.amount).sum();
        assert_eq!(sum, 700_000);
    }

    #[tokio::test]
    async fn test_history_is_newest_first() {
        let (_, ledger, goal_id) = setup_goal(1_000).await;
        let alice = Identity::new("alice", Role::User);
        for amount in [1, 2, 3] {
            ledger
                .append_installment(Some(&alice), &goal_id, "alice", NewInstallment { amount })
                .await
                .unwrap();
        }

        let history = ledger.get_history(Some(&alice), &goal_id, "alice").unwrap();
        let amounts: Vec<i64> = history.iter().map(|i| i.amount).collect();
        assert_eq!(amounts, vec![3, 2, 1]);
        assert!(history.windows(2).all(|w| w[0].created_at >= w[1].created_at));
    }

    #[tokio::test]
    async fn test_overflowing_append_is_rejected_and_not_recorded() {
        let (store, ledger, goal_id) = setup_goal(1_000).await;
        let alice = Identity::new("alice", Role::User);
        ledger
            .append_installment(Some(&alice), &goal_id, "alice", NewInstallment { amount: i64::MAX })
            .await
            .unwrap();

        let err = ledger
            .append_installment(Some(&alice), &goal_id, "alice", NewInstallment { amount: 1_000 })
            .await
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidInput);
        assert_eq!(store.installment_count(&goal_id), 1);
    }
}
