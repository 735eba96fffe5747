use std::sync::Arc;

use crate::{
    auth::CurrentIdentity,
    error::ApiResult,
    main_lib::AppState,
    models::{AccountDto, AccountUpdateRequest},
};
use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::get,
    Extension, Json, Router,
};

#[utoipa::path(get, path = "/api/v1/users", responses((status = 200, body = [AccountDto]), (status = 403)))]
pub async fn list_users(
    State(state): State<Arc<AppState>>,
    Extension(current): Extension<CurrentIdentity>,
) -> ApiResult<Json<Vec<AccountDto>>> {
    let accounts = state.account_service.list_accounts(current.identity())?;
    Ok(Json(accounts.into_iter().map(AccountDto::from).collect()))
}

#[utoipa::path(get, path = "/api/v1/users/{id}", params(("id" = String, Path, description = "Account id")), responses((status = 200, body = AccountDto), (status = 403), (status = 404)))]
pub async fn get_user(
    Path(id): Path<String>,
    State(state): State<Arc<AppState>>,
    Extension(current): Extension<CurrentIdentity>,
) -> ApiResult<Json<AccountDto>> {
    let account = state
        .account_service
        .get_account(current.identity(), &id)?;
    Ok(Json(account.into()))
}

#[utoipa::path(put, path = "/api/v1/users/{id}", params(("id" = String, Path, description = "Account id")), request_body = AccountUpdateRequest, responses((status = 200, body = AccountDto), (status = 400), (status = 403), (status = 404)))]
pub async fn update_user(
    Path(id): Path<String>,
    State(state): State<Arc<AppState>>,
    Extension(current): Extension<CurrentIdentity>,
    Json(payload): Json<AccountUpdateRequest>,
) -> ApiResult<Json<AccountDto>> {
    let account = state
        .account_service
        .update_account(current.identity(), &id, payload.into())
        .await?;
    Ok(Json(account.into()))
}

#[utoipa::path(delete, path = "/api/v1/users/{id}", params(("id" = String, Path, description = "Account id")), responses((status = 204), (status = 403), (status = 404)))]
pub async fn delete_user(
    Path(id): Path<String>,
    State(state): State<Arc<AppState>>,
    Extension(current): Extension<CurrentIdentity>,
) -> ApiResult<StatusCode> {
    state
        .account_service
        .delete_account(current.identity(), &id)
        .await?;
    Ok(StatusCode::NO_CONTENT)
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/users", get(list_users))
        .route(
            "/users/{id}",
            get(get_user).put(update_user).delete(delete_user),
        )
}
