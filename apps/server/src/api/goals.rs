use std::sync::Arc;

use crate::{
    auth::CurrentIdentity,
    error::ApiResult,
    main_lib::AppState,
    models::{
        GoalDetailDto, GoalDto, GoalUpdateRequest, GoalsSummaryDto, InstallmentDto,
        InstallmentRequest, NewGoalRequest,
    },
};
use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::get,
    Extension, Json, Router,
};

#[utoipa::path(get, path = "/api/v1/goals", responses((status = 200, body = [GoalDto]), (status = 401)))]
pub async fn list_goals(
    State(state): State<Arc<AppState>>,
    Extension(current): Extension<CurrentIdentity>,
) -> ApiResult<Json<Vec<GoalDto>>> {
    let goals = state
        .goal_service
        .get_goals(current.identity(), current.owner_id())?;
    Ok(Json(goals.into_iter().map(GoalDto::from).collect()))
}

#[utoipa::path(post, path = "/api/v1/goals", request_body = NewGoalRequest, responses((status = 201, body = GoalDto), (status = 400), (status = 401)))]
pub async fn create_goal(
    State(state): State<Arc<AppState>>,
    Extension(current): Extension<CurrentIdentity>,
    Json(payload): Json<NewGoalRequest>,
) -> ApiResult<(StatusCode, Json<GoalDto>)> {
    let goal = state
        .goal_service
        .create_goal(current.identity(), current.owner_id(), payload.into())
        .await?;
    Ok((StatusCode::CREATED, Json(GoalDto::from(goal))))
}

#[utoipa::path(get, path = "/api/v1/goals/summary", responses((status = 200, body = GoalsSummaryDto), (status = 401)))]
pub async fn get_summary(
    State(state): State<Arc<AppState>>,
    Extension(current): Extension<CurrentIdentity>,
) -> ApiResult<Json<GoalsSummaryDto>> {
    let summary = state
        .goal_service
        .get_summary(current.identity(), current.owner_id())?;
    Ok(Json(summary.into()))
}

#[utoipa::path(get, path = "/api/v1/goals/{id}", params(("id" = String, Path, description = "Goal id")), responses((status = 200, body = GoalDetailDto), (status = 404)))]
pub async fn get_goal(
    Path(id): Path<String>,
    State(state): State<Arc<AppState>>,
    Extension(current): Extension<CurrentIdentity>,
) -> ApiResult<Json<GoalDetailDto>> {
    let detail = state
        .goal_service
        .get_goal(current.identity(), &id, current.owner_id())?;
    Ok(Json(detail.into()))
}

#[utoipa::path(put, path = "/api/v1/goals/{id}", params(("id" = String, Path, description = "Goal id")), request_body = GoalUpdateRequest, responses((status = 200, body = GoalDto), (status = 400), (status = 404)))]
pub async fn update_goal(
    Path(id): Path<String>,
    State(state): State<Arc<AppState>>,
    Extension(current): Extension<CurrentIdentity>,
    Json(payload): Json<GoalUpdateRequest>,
) -> ApiResult<Json<GoalDto>> {
    let goal = state
        .goal_service
        .update_goal(current.identity(), &id, current.owner_id(), payload.into())
        .await?;
    Ok(Json(goal.into()))
}

#[utoipa::path(delete, path = "/api/v1/goals/{id}", params(("id" = String, Path, description = "Goal id")), responses((status = 204), (status = 404)))]
pub async fn delete_goal(
    Path(id): Path<String>,
    State(state): State<Arc<AppState>>,
    Extension(current): Extension<CurrentIdentity>,
) -> ApiResult<StatusCode> {
    state
        .goal_service
        .delete_goal(current.identity(), &id, current.owner_id())
        .await?;
    Ok(StatusCode::NO_CONTENT)
}

#[utoipa::path(post, path = "/api/v1/goals/{id}/installments", params(("id" = String, Path, description = "Goal id")), request_body = InstallmentRequest, responses((status = 201, body = GoalDto), (status = 400), (status = 404)))]
pub async fn append_installment(
    Path(id): Path<String>,
    State(state): State<Arc<AppState>>,
    Extension(current): Extension<CurrentIdentity>,
    Json(payload): Json<InstallmentRequest>,
) -> ApiResult<(StatusCode, Json<GoalDto>)> {
    let goal = state
        .ledger_service
        .append_installment(current.identity(), &id, current.owner_id(), payload.into())
        .await?;
    Ok((StatusCode::CREATED, Json(goal.into())))
}

#[utoipa::path(get, path = "/api/v1/goals/{id}/installments", params(("id" = String, Path, description = "Goal id")), responses((status = 200, body = [InstallmentDto]), (status = 404)))]
pub async fn get_history(
    Path(id): Path<String>,
    State(state): State<Arc<AppState>>,
    Extension(current): Extension<CurrentIdentity>,
) -> ApiResult<Json<Vec<InstallmentDto>>> {
    let history = state
        .ledger_service
        .get_history(current.identity(), &id, current.owner_id())?;
    Ok(Json(history.into_iter().map(InstallmentDto::from).collect()))
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/goals", get(list_goals).post(create_goal))
        .route("/goals/summary", get(get_summary))
        .route(
            "/goals/{id}",
            get(get_goal).put(update_goal).delete(delete_goal),
        )
        .route(
            "/goals/{id}/installments",
            get(get_history).post(append_installment),
        )
}
