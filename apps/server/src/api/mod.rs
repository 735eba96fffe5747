pub mod goals;
pub mod users;

use std::sync::Arc;

use anyhow::Context;
use axum::{
    http::HeaderValue,
    middleware,
    routing::{get, post},
    Json, Router,
};
use tower_http::{
    cors::{Any, CorsLayer},
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};
use utoipa::OpenApi;

use crate::{auth, config::Config, main_lib::AppState, models};

#[utoipa::path(get, path = "/api/v1/healthz", responses((status = 200, description = "Health")))]
pub async fn healthz() -> &'static str {
    "ok"
}

#[derive(OpenApi)]
#[openapi(
    paths(
        healthz,
        auth::register,
        auth::login,
        auth::logout,
        auth::me,
        goals::list_goals,
        goals::create_goal,
        goals::get_summary,
        goals::get_goal,
        goals::update_goal,
        goals::delete_goal,
        goals::append_installment,
        goals::get_history,
        users::list_users,
        users::get_user,
        users::update_user,
        users::delete_user,
    ),
    components(schemas(
        models::AccountDto,
        models::AccountUpdateRequest,
        models::IdentityDto,
        models::RegisterRequest,
        models::LoginRequest,
        models::SessionResponse,
        models::MessageResponse,
        models::GoalDto,
        models::GoalDetailDto,
        models::InstallmentDto,
        models::NewGoalRequest,
        models::GoalUpdateRequest,
        models::InstallmentRequest,
        models::GoalsSummaryDto,
    )),
    tags((name = "kepengen"))
)]
pub struct ApiDoc;

pub fn app_router(state: Arc<AppState>, config: &Config) -> anyhow::Result<Router> {
    let cors = if config.cors_allow.iter().any(|o| o == "*") {
        CorsLayer::new().allow_origin(Any)
    } else {
        let origins = config
            .cors_allow
            .iter()
            .map(|o| {
                o.parse::<HeaderValue>()
                    .with_context(|| format!("Invalid CORS origin '{}'", o))
            })
            .collect::<anyhow::Result<Vec<_>>>()?;
        CorsLayer::new().allow_origin(origins)
    };

    let openapi = ApiDoc::openapi();

    let api = Router::new()
        .route("/healthz", get(healthz))
        .route("/openapi.json", get(|| async { Json(openapi) }))
        .route("/auth/register", post(auth::register))
        .route("/auth/login", post(auth::login))
        .route("/auth/logout", post(auth::logout))
        .route("/auth/me", get(auth::me))
        .merge(goals::router())
        .merge(users::router())
        .layer(middleware::from_fn_with_state(
            state.clone(),
            auth::resolve_identity,
        ));

    Ok(Router::new()
        .nest("/api/v1", api)
        .with_state(state)
        .layer(cors)
        .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
        .layer(PropagateRequestIdLayer::x_request_id())
        .layer(TimeoutLayer::new(config.request_timeout))
        .layer(TraceLayer::new_for_http()))
}
