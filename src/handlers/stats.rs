use axum::{extract::State, Json};

use crate::error::{AppError, Result};
use crate::extract::ApiPath;
use crate::models::{ProgressFilter, SessionFilter};
use crate::repositories::{
    ExerciseRepository, ProgressRepository, SessionRepository, UserRepository,
};
use crate::stats::{ExerciseStats, UserStats};

#[derive(Clone)]
pub struct StatsState {
    pub user_repo: UserRepository,
    pub exercise_repo: ExerciseRepository,
    pub session_repo: SessionRepository,
    pub progress_repo: ProgressRepository,
}

pub async fn user_stats(
    State(state): State<StatsState>,
    ApiPath(id): ApiPath<i64>,
) -> Result<Json<UserStats>> {
    let user = state
        .user_repo
        .find_by_id(id)
        .await?
        .ok_or_else(|| AppError::NotFound("User not found".to_string()))?;

    let sessions = state
        .session_repo
        .find_all(&SessionFilter { user_id: Some(id) })
        .await?;
    let progress = state
        .progress_repo
        .find_all(&ProgressFilter {
            user_id: Some(id),
            exercise_id: None,
        })
        .await?;

    Ok(Json(UserStats::compute(&user, &sessions, &progress)))
}

pub async fn exercise_stats(
    State(state): State<StatsState>,
    ApiPath(id): ApiPath<i64>,
) -> Result<Json<ExerciseStats>> {
    let exercise = state
        .exercise_repo
        .find_by_id(id)
        .await?
        .ok_or_else(|| AppError::NotFound("Exercise not found".to_string()))?;

    let progress = state
        .progress_repo
        .find_all(&ProgressFilter {
            user_id: None,
            exercise_id: Some(id),
        })
        .await?;

    Ok(Json(ExerciseStats::compute(&exercise, &progress)))
}
