use axum::{extract::State, Json};
use serde_json::Value;

use crate::error::{AppError, Result};
use crate::extract::{ApiJson, ApiPath, ApiQuery};
use crate::models::{CreateWorkoutSession, SessionFilter, UpdateWorkoutSession, WorkoutSession};
use crate::repositories::{RoutineRepository, SessionRepository, UserRepository};

#[derive(Clone)]
pub struct SessionsState {
    pub session_repo: SessionRepository,
    pub user_repo: UserRepository,
    pub routine_repo: RoutineRepository,
}

pub async fn list(
    State(state): State<SessionsState>,
    ApiQuery(filter): ApiQuery<SessionFilter>,
) -> Result<Json<Vec<WorkoutSession>>> {
    let sessions = state.session_repo.find_all(&filter).await?;
    Ok(Json(sessions))
}

pub async fn show(
    State(state): State<SessionsState>,
    ApiPath(id): ApiPath<i64>,
) -> Result<Json<WorkoutSession>> {
    let session = state
        .session_repo
        .find_by_id(id)
        .await?
        .ok_or_else(|| AppError::NotFound("Session not found".to_string()))?;
    Ok(Json(session))
}

pub async fn create(
    State(state): State<SessionsState>,
    ApiJson(payload): ApiJson<CreateWorkoutSession>,
) -> Result<Json<WorkoutSession>> {
    if !state.user_repo.exists(payload.user_id).await? {
        return Err(AppError::NotFound("User not found".to_string()));
    }
    if !state.routine_repo.exists(payload.routine_id).await? {
        return Err(AppError::NotFound("Routine not found".to_string()));
    }

    let session = state.session_repo.create(payload).await?;
    tracing::info!(
        "Workout session started: {} (user {}, routine {})",
        session.id,
        session.user_id,
        session.routine_id
    );
    Ok(Json(session))
}

pub async fn update(
    State(state): State<SessionsState>,
    ApiPath(id): ApiPath<i64>,
    ApiJson(payload): ApiJson<UpdateWorkoutSession>,
) -> Result<Json<WorkoutSession>> {
    let session = state.session_repo.update(id, payload).await?;
    Ok(Json(session))
}

pub async fn delete(
    State(state): State<SessionsState>,
    ApiPath(id): ApiPath<i64>,
) -> Result<Json<Value>> {
    let session = state.session_repo.delete(id).await?;
    tracing::info!("Workout session deleted: {}", id);
    super::deleted("Session", "session", id, &session)
}
