use axum::{extract::State, Json};
use serde_json::Value;

use crate::error::{AppError, Result};
use crate::extract::{ApiJson, ApiPath};
use crate::models::{CreateUser, UpdateUser, User};
use crate::repositories::UserRepository;

#[derive(Clone)]
pub struct UsersState {
    pub user_repo: UserRepository,
}

pub async fn list(State(state): State<UsersState>) -> Result<Json<Vec<User>>> {
    let users = state.user_repo.find_all().await?;
    Ok(Json(users))
}

pub async fn show(
    State(state): State<UsersState>,
    ApiPath(id): ApiPath<i64>,
) -> Result<Json<User>> {
    let user = state
        .user_repo
        .find_by_id(id)
        .await?
        .ok_or_else(|| AppError::NotFound("User not found".to_string()))?;
    Ok(Json(user))
}

pub async fn create(
    State(state): State<UsersState>,
    ApiJson(payload): ApiJson<CreateUser>,
) -> Result<Json<User>> {
    payload.validate()?;
    let user = state.user_repo.create(payload).await?;
    tracing::info!("User created: {} ({})", user.id, user.username);
    Ok(Json(user))
}

pub async fn update(
    State(state): State<UsersState>,
    ApiPath(id): ApiPath<i64>,
    ApiJson(payload): ApiJson<UpdateUser>,
) -> Result<Json<User>> {
    let user = state.user_repo.update(id, payload).await?;
    Ok(Json(user))
}

pub async fn delete(
    State(state): State<UsersState>,
    ApiPath(id): ApiPath<i64>,
) -> Result<Json<Value>> {
    let user = state.user_repo.delete(id).await?;
    tracing::info!("User deleted: {}", id);
    super::deleted("User", "user", id, &user)
}
