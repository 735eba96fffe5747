#[cfg(test)]
mod tests {
    use crate::accounts::{AccountService, AccountServiceTrait, AccountUpdate, NewAccount};
    use crate::errors::ErrorKind;
    use crate::goals::{GoalRepositoryTrait, GoalService, GoalServiceTrait, NewGoal};
    use crate::identity::{Identity, Role};
    use crate::ledger::{LedgerService, LedgerServiceTrait, NewInstallment};
    use crate::testing::InMemoryStore;
    use std::sync::Arc;

    fn setup() -> (Arc<InMemoryStore>, AccountService) {
        let store = Arc::new(InMemoryStore::new());
        let service = AccountService::new(store.clone());
        (store, service)
    }

    async fn register(service: &AccountService, email: &str) -> crate::accounts::Account {
        service
            .register_account(NewAccount {
                email: email.to_string(),
                username: email.split('@').next().unwrap_or("user").to_string(),
                password_credential: "hash".to_string(),
            })
            .await
            .unwrap()
    }

    #[tokio::test]
    async fn test_register_normalizes_email_and_defaults_role() {
        let (_, service) = setup();
        let account = register(&service, "  Siti@Example.ID ").await;
        assert_eq!(account.email, "siti@example.id");
        assert_eq!(account.role, Role::User);

        let creds = service.find_credentials("SITI@example.id").unwrap();
        assert_eq!(creds.account.id, account.id);
        assert_eq!(creds.password_credential, "hash");
    }

    #[tokio::test]
    async fn test_duplicate_email_is_invalid_input() {
        let (_, service) = setup();
        register(&service, "a@b.id").await;
        let err = service
            .register_account(NewAccount {
                email: "a@b.id".to_string(),
                username: "again".to_string(),
                password_credential: "hash".to_string(),
            })
            .await
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidInput);
    }

    #[tokio::test]
    async fn test_non_admin_cannot_list_accounts() {
        let (_, service) = setup();
        let account = register(&service, "a@b.id").await;
        let err = service
            .list_accounts(Some(&account.identity()))
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Forbidden);

        let err = service.list_accounts(None).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Unauthenticated);
    }

    #[tokio::test]
    async fn test_admin_directory_operations() {
        let (_, service) = setup();
        let admin = Identity::new("root", Role::Admin);
        let first = register(&service, "a@b.id").await;
        let second = register(&service, "c@d.id").await;

        let all = service.list_accounts(Some(&admin)).unwrap();
        let ids: Vec<_> = all.iter().map(|a| a.id.clone()).collect();
        assert_eq!(ids, vec![second.id.clone(), first.id.clone()]);

        let detail = service.get_account(Some(&admin), &first.id).unwrap();
        assert_eq!(detail.email, "a@b.id");

        let promoted = service
            .update_account(
                Some(&admin),
                &first.id,
                AccountUpdate {
                    role: Some(Role::Admin),
                    ..Default::default()
                },
            )
            .await
            .unwrap();
        assert_eq!(promoted.role, Role::Admin);
        assert_eq!(promoted.username, "a");
    }

    #[tokio::test]
    async fn test_update_and_delete_missing_account_is_not_found() {
        let (_, service) = setup();
        let admin = Identity::new("root", Role::Admin);

        let err = service.get_account(Some(&admin), "ghost").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::NotFound);

        let err = service
            .update_account(
                Some(&admin),
                "ghost",
                AccountUpdate {
                    username: Some("boo".to_string()),
                    ..Default::default()
                },
            )
            .await
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::NotFound);

        let err = service
            .delete_account(Some(&admin), "ghost")
            .await
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::NotFound);
    }

    #[tokio::test]
    async fn test_empty_update_is_rejected_before_lookup() {
        let (_, service) = setup();
        let admin = Identity::new("root", Role::Admin);
        let err = service
            .update_account(Some(&admin), "ghost", AccountUpdate::default())
            .await
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidInput);
    }

    #[tokio::test]
    async fn test_delete_account_cascades_goals_and_history() {
        let (store, service) = setup();
        let goals = GoalService::new(store.clone());
        let ledger = LedgerService::new(store.clone());
        let admin = Identity::new("root", Role::Admin);
        let account = register(&service, "a@b.id").await;
        let owner = account.identity();

        let goal = goals
            .create_goal(
                Some(&owner),
                &account.id,
                NewGoal {
                    name: "Car".to_string(),
                    description: None,
                    target_amount: 10,
                    image_ref: None,
                },
            )
            .await
            .unwrap();
        ledger
            .append_installment(Some(&owner), &goal.id, &account.id, NewInstallment { amount: 5 })
            .await
            .unwrap();

        service
            .delete_account(Some(&admin), &account.id)
            .await
            .unwrap();

        assert_eq!(store.goal_count(&account.id), 0);
        assert_eq!(store.installment_count(&goal.id), 0);
        assert!(store.load_goals(&account.id).unwrap().is_empty());
    }
}
