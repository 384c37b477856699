use axum::{extract::State, Json};
use serde_json::Value;

use crate::error::{AppError, Result};
use crate::extract::{ApiJson, ApiPath, ApiQuery};
use crate::models::{CreateWorkoutRoutine, RoutineFilter, UpdateWorkoutRoutine, WorkoutRoutine};
use crate::repositories::RoutineRepository;

#[derive(Clone)]
pub struct RoutinesState {
    pub routine_repo: RoutineRepository,
}

pub async fn list(
    State(state): State<RoutinesState>,
    ApiQuery(filter): ApiQuery<RoutineFilter>,
) -> Result<Json<Vec<WorkoutRoutine>>> {
    let routines = state.routine_repo.find_all(&filter).await?;
    Ok(Json(routines))
}

pub async fn show(
    State(state): State<RoutinesState>,
    ApiPath(id): ApiPath<i64>,
) -> Result<Json<WorkoutRoutine>> {
    let routine = state
        .routine_repo
        .find_by_id(id)
        .await?
        .ok_or_else(|| AppError::NotFound("Routine not found".to_string()))?;
    Ok(Json(routine))
}

/// Exercise ids listed in the routine are stored as given.
pub async fn create(
    State(state): State<RoutinesState>,
    ApiJson(payload): ApiJson<CreateWorkoutRoutine>,
) -> Result<Json<WorkoutRoutine>> {
    payload.validate()?;
    let routine = state.routine_repo.create(payload).await?;
    tracing::info!("Routine created: {} ({})", routine.id, routine.name);
    Ok(Json(routine))
}

pub async fn update(
    State(state): State<RoutinesState>,
    ApiPath(id): ApiPath<i64>,
    ApiJson(payload): ApiJson<UpdateWorkoutRoutine>,
) -> Result<Json<WorkoutRoutine>> {
    let routine = state.routine_repo.update(id, payload).await?;
    Ok(Json(routine))
}

pub async fn delete(
    State(state): State<RoutinesState>,
    ApiPath(id): ApiPath<i64>,
) -> Result<Json<Value>> {
    let routine = state.routine_repo.delete(id).await?;
    tracing::info!("Routine deleted: {}", id);
    super::deleted("Routine", "routine", id, &routine)
}
