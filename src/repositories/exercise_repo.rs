use rusqlite::{params, params_from_iter, OptionalExtension};

use super::Conditions;
use crate::db::{with_connection, DbPool};
use crate::error::{AppError, Result};
use crate::models::enums::dedup_muscle_groups;
use crate::models::{CreateExercise, Exercise, ExerciseFilter, FromSqliteRow, UpdateExercise};

const MUSCLE_GROUP_MEMBER: &str =
    "EXISTS (SELECT 1 FROM json_each(exercises.muscle_groups) WHERE json_each.value = ?)";

fn not_found() -> AppError {
    AppError::NotFound("Exercise not found".to_string())
}

#[derive(Clone)]
pub struct ExerciseRepository {
    pool: DbPool,
}

impl ExerciseRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    pub async fn find_by_id(&self, id: i64) -> Result<Option<Exercise>> {
        with_connection(&self.pool, move |conn| {
            let exercise = conn
                .query_row(
                    "SELECT * FROM exercises WHERE id = ?",
                    [id],
                    Exercise::from_row,
                )
                .optional()?;
            Ok(exercise)
        })
        .await
    }

    pub async fn exists(&self, id: i64) -> Result<bool> {
        with_connection(&self.pool, move |conn| {
            let exists: bool = conn.query_row(
                "SELECT EXISTS(SELECT 1 FROM exercises WHERE id = ?)",
                [id],
                |row| row.get(0),
            )?;
            Ok(exists)
        })
        .await
    }

    pub async fn find_all(&self, filter: &ExerciseFilter) -> Result<Vec<Exercise>> {
        let mut conditions = Conditions::default();
        if let Some(exercise_type) = filter.exercise_type {
            conditions.push("exercise_type = ?", exercise_type.as_str().to_string());
        }
        if let Some(difficulty) = filter.difficulty {
            conditions.push("difficulty = ?", difficulty.as_str().to_string());
        }
        if let Some(group) = filter.muscle_group {
            conditions.push(MUSCLE_GROUP_MEMBER, group.as_str().to_string());
        }
        let (sql, values) = conditions.into_query("exercises");

        with_connection(&self.pool, move |conn| {
            let mut stmt = conn.prepare(&sql)?;
            let exercises = stmt
                .query_map(params_from_iter(values), Exercise::from_row)?
                .collect::<rusqlite::Result<Vec<_>>>()?;
            Ok(exercises)
        })
        .await
    }

    pub async fn create(&self, new: CreateExercise) -> Result<Exercise> {
        let muscle_groups = serde_json::to_string(&dedup_muscle_groups(new.muscle_groups))?;
        let equipment_needed = serde_json::to_string(&new.equipment_needed)?;
        let instructions = serde_json::to_string(&new.instructions)?;

        with_connection(&self.pool, move |conn| {
            let exercise = conn.query_row(
                "INSERT INTO exercises (name, description, exercise_type, difficulty,
                    muscle_groups, duration_minutes, calories_burned_per_minute,
                    equipment_needed, instructions)
                 VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?)
                 RETURNING *",
                params![
                    new.name,
                    new.description,
                    new.exercise_type,
                    new.difficulty,
                    muscle_groups,
                    new.duration_minutes,
                    new.calories_burned_per_minute,
                    equipment_needed,
                    instructions
                ],
                Exercise::from_row,
            )?;
            Ok(exercise)
        })
        .await
    }

    /// Merge `update` into the stored exercise inside one transaction.
    pub async fn update(&self, id: i64, update: UpdateExercise) -> Result<Exercise> {
        with_connection(&self.pool, move |conn| {
            let tx = conn.transaction()?;
            let mut exercise = tx
                .query_row(
                    "SELECT * FROM exercises WHERE id = ?",
                    [id],
                    Exercise::from_row,
                )
                .optional()?
                .ok_or_else(not_found)?;

            exercise.apply(update)?;

            tx.execute(
                "UPDATE exercises SET name = ?, description = ?, exercise_type = ?,
                    difficulty = ?, muscle_groups = ?, duration_minutes = ?,
                    calories_burned_per_minute = ?, equipment_needed = ?, instructions = ?
                 WHERE id = ?",
                params![
                    exercise.name,
                    exercise.description,
                    exercise.exercise_type,
                    exercise.difficulty,
                    serde_json::to_string(&exercise.muscle_groups)?,
                    exercise.duration_minutes,
                    exercise.calories_burned_per_minute,
                    serde_json::to_string(&exercise.equipment_needed)?,
                    serde_json::to_string(&exercise.instructions)?,
                    id
                ],
            )?;
            tx.commit()?;
            Ok(exercise)
        })
        .await
    }

    /// Remove the exercise and return what was stored.
    pub async fn delete(&self, id: i64) -> Result<Exercise> {
        with_connection(&self.pool, move |conn| {
            conn.query_row(
                "DELETE FROM exercises WHERE id = ? RETURNING *",
                [id],
                Exercise::from_row,
            )
            .optional()?
            .ok_or_else(not_found)
        })
        .await
    }
}
