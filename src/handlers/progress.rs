use axum::{extract::State, Json};
use serde_json::Value;

use crate::error::{AppError, Result};
use crate::extract::{ApiJson, ApiPath, ApiQuery};
use crate::models::{CreateUserProgress, ProgressFilter, UpdateUserProgress, UserProgress};
use crate::repositories::{ExerciseRepository, ProgressRepository, UserRepository};

#[derive(Clone)]
pub struct ProgressState {
    pub progress_repo: ProgressRepository,
    pub user_repo: UserRepository,
    pub exercise_repo: ExerciseRepository,
}

pub async fn list(
    State(state): State<ProgressState>,
    ApiQuery(filter): ApiQuery<ProgressFilter>,
) -> Result<Json<Vec<UserProgress>>> {
    let records = state.progress_repo.find_all(&filter).await?;
    Ok(Json(records))
}

pub async fn show(
    State(state): State<ProgressState>,
    ApiPath(id): ApiPath<i64>,
) -> Result<Json<UserProgress>> {
    let progress = state
        .progress_repo
        .find_by_id(id)
        .await?
        .ok_or_else(|| AppError::NotFound("Progress record not found".to_string()))?;
    Ok(Json(progress))
}

pub async fn create(
    State(state): State<ProgressState>,
    ApiJson(payload): ApiJson<CreateUserProgress>,
) -> Result<Json<UserProgress>> {
    if !state.user_repo.exists(payload.user_id).await? {
        return Err(AppError::NotFound("User not found".to_string()));
    }
    if !state.exercise_repo.exists(payload.exercise_id).await? {
        return Err(AppError::NotFound("Exercise not found".to_string()));
    }

    let progress = state.progress_repo.create(payload).await?;
    tracing::info!(
        "Progress recorded: {} (user {}, exercise {}, personal record: {})",
        progress.id,
        progress.user_id,
        progress.exercise_id,
        progress.personal_record
    );
    Ok(Json(progress))
}

pub async fn update(
    State(state): State<ProgressState>,
    ApiPath(id): ApiPath<i64>,
    ApiJson(payload): ApiJson<UpdateUserProgress>,
) -> Result<Json<UserProgress>> {
    let progress = state.progress_repo.update(id, payload).await?;
    Ok(Json(progress))
}

pub async fn delete(
    State(state): State<ProgressState>,
    ApiPath(id): ApiPath<i64>,
) -> Result<Json<Value>> {
    let progress = state.progress_repo.delete(id).await?;
    tracing::info!("Progress record deleted: {}", id);
    super::deleted("Progress record", "progress", id, &progress)
}
