use std::sync::Arc;

use crate::{
    auth::{decode_secret_key, AuthManager, TokenIdentityResolver},
    config::Config,
};
use kepengen_core::{
    accounts::{AccountRepositoryTrait, AccountService, AccountServiceTrait},
    goals::{GoalService, GoalServiceTrait},
    identity::IdentityResolverTrait,
    ledger::{LedgerService, LedgerServiceTrait},
};
use kepengen_storage_sqlite::{
    accounts::AccountRepository,
    db::{self, StoreConfig},
    goals::GoalRepository,
    ledger::LedgerRepository,
};
use tracing_subscriber::prelude::*;
use tracing_subscriber::{fmt, EnvFilter};

pub struct AppState {
    pub account_service: Arc<dyn AccountServiceTrait>,
    pub goal_service: Arc<dyn GoalServiceTrait>,
    pub ledger_service: Arc<dyn LedgerServiceTrait>,
    pub identity_resolver: Arc<dyn IdentityResolverTrait>,
    pub auth: Arc<AuthManager>,
}

pub fn init_tracing() {
    let log_format = std::env::var("KP_LOG_FORMAT").unwrap_or_else(|_| "text".to_string());
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let registry = tracing_subscriber::registry().with(filter);

    if log_format.eq_ignore_ascii_case("json") {
        registry
            .with(fmt::layer().json().with_current_span(false))
            .init();
    } else {
        registry
            .with(fmt::layer().with_target(true).with_line_number(true))
            .init();
    }
}

pub async fn build_state(config: &Config) -> anyhow::Result<Arc<AppState>> {
    let secret = decode_secret_key(&config.secret_key)?;
    let auth = Arc::new(AuthManager::new(&secret, config.token_ttl));

    let store_config = StoreConfig::new(&config.db_path).with_timeout(config.store_timeout);
    let (pool, writer) = db::open(&store_config)?;
    tracing::info!("Database path in use: {}", store_config.db_path);

    let account_repo: Arc<dyn AccountRepositoryTrait> =
        Arc::new(AccountRepository::new(pool.clone(), writer.clone()));
    let goal_repo = Arc::new(GoalRepository::new(pool.clone(), writer.clone()));
    let ledger_repo = Arc::new(LedgerRepository::new(pool.clone(), writer.clone()));

    let identity_resolver = Arc::new(TokenIdentityResolver::new(
        auth.clone(),
        account_repo.clone(),
    ));

    Ok(Arc::new(AppState {
        account_service: Arc::new(AccountService::new(account_repo)),
        goal_service: Arc::new(GoalService::new(goal_repo)),
        ledger_service: Arc::new(LedgerService::new(ledger_repo)),
        identity_resolver,
        auth,
    }))
}
