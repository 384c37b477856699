use axum::{extract::State, Json};
use serde_json::Value;

use crate::error::{AppError, Result};
use crate::extract::{ApiJson, ApiPath, ApiQuery};
use crate::models::{CreateExercise, Exercise, ExerciseFilter, UpdateExercise};
use crate::repositories::ExerciseRepository;

#[derive(Clone)]
pub struct ExercisesState {
    pub exercise_repo: ExerciseRepository,
}

pub async fn list(
    State(state): State<ExercisesState>,
    ApiQuery(filter): ApiQuery<ExerciseFilter>,
) -> Result<Json<Vec<Exercise>>> {
    let exercises = state.exercise_repo.find_all(&filter).await?;
    Ok(Json(exercises))
}

pub async fn show(
    State(state): State<ExercisesState>,
    ApiPath(id): ApiPath<i64>,
) -> Result<Json<Exercise>> {
    let exercise = state
        .exercise_repo
        .find_by_id(id)
        .await?
        .ok_or_else(|| AppError::NotFound("Exercise not found".to_string()))?;
    Ok(Json(exercise))
}

pub async fn create(
    State(state): State<ExercisesState>,
    ApiJson(payload): ApiJson<CreateExercise>,
) -> Result<Json<Exercise>> {
    payload.validate()?;
    let exercise = state.exercise_repo.create(payload).await?;
    tracing::info!("Exercise created: {} ({})", exercise.id, exercise.name);
    Ok(Json(exercise))
}

pub async fn update(
    State(state): State<ExercisesState>,
    ApiPath(id): ApiPath<i64>,
    ApiJson(payload): ApiJson<UpdateExercise>,
) -> Result<Json<Exercise>> {
    let exercise = state.exercise_repo.update(id, payload).await?;
    Ok(Json(exercise))
}

pub async fn delete(
    State(state): State<ExercisesState>,
    ApiPath(id): ApiPath<i64>,
) -> Result<Json<Value>> {
    let exercise = state.exercise_repo.delete(id).await?;
    tracing::info!("Exercise deleted: {}", id);
    super::deleted("Exercise", "exercise", id, &exercise)
}
