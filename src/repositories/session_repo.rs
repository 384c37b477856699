use chrono::Utc;
use rusqlite::{params, params_from_iter, OptionalExtension};

use super::Conditions;
use crate::db::{with_connection, DbPool};
use crate::error::{AppError, Result};
use crate::models::{
    CreateWorkoutSession, FromSqliteRow, SessionFilter, UpdateWorkoutSession, WorkoutSession,
};

fn not_found() -> AppError {
    AppError::NotFound("Session not found".to_string())
}

#[derive(Clone)]
pub struct SessionRepository {
    pool: DbPool,
}

impl SessionRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    pub async fn find_by_id(&self, id: i64) -> Result<Option<WorkoutSession>> {
        with_connection(&self.pool, move |conn| {
            let session = conn
                .query_row(
                    "SELECT * FROM workout_sessions WHERE id = ?",
                    [id],
                    WorkoutSession::from_row,
                )
                .optional()?;
            Ok(session)
        })
        .await
    }

    pub async fn find_all(&self, filter: &SessionFilter) -> Result<Vec<WorkoutSession>> {
        let mut conditions = Conditions::default();
        if let Some(user_id) = filter.user_id {
            conditions.push("user_id = ?", user_id);
        }
        let (sql, values) = conditions.into_query("workout_sessions");

        with_connection(&self.pool, move |conn| {
            let mut stmt = conn.prepare(&sql)?;
            let sessions = stmt
                .query_map(params_from_iter(values), WorkoutSession::from_row)?
                .collect::<rusqlite::Result<Vec<_>>>()?;
            Ok(sessions)
        })
        .await
    }

    /// Callers check that the user and routine exist first.
    pub async fn create(&self, new: CreateWorkoutSession) -> Result<WorkoutSession> {
        let started_at = Utc::now();
        let completed_at = new.completed.then_some(started_at);

        with_connection(&self.pool, move |conn| {
            let session = conn.query_row(
                "INSERT INTO workout_sessions (user_id, routine_id, started_at, completed_at,
                    total_duration_minutes, calories_burned, notes, completed)
                 VALUES (?, ?, ?, ?, ?, ?, ?, ?)
                 RETURNING *",
                params![
                    new.user_id,
                    new.routine_id,
                    started_at,
                    completed_at,
                    new.total_duration_minutes,
                    new.calories_burned,
                    new.notes,
                    new.completed
                ],
                WorkoutSession::from_row,
            )?;
            Ok(session)
        })
        .await
    }

    pub async fn update(&self, id: i64, update: UpdateWorkoutSession) -> Result<WorkoutSession> {
        with_connection(&self.pool, move |conn| {
            let tx = conn.transaction()?;
            let mut session = tx
                .query_row(
                    "SELECT * FROM workout_sessions WHERE id = ?",
                    [id],
                    WorkoutSession::from_row,
                )
                .optional()?
                .ok_or_else(not_found)?;

            session.apply(update, Utc::now())?;

            tx.execute(
                "UPDATE workout_sessions SET completed_at = ?, total_duration_minutes = ?,
                    calories_burned = ?, notes = ?, completed = ?
                 WHERE id = ?",
                params![
                    session.completed_at,
                    session.total_duration_minutes,
                    session.calories_burned,
                    session.notes,
                    session.completed,
                    id
                ],
            )?;
            tx.commit()?;
            Ok(session)
        })
        .await
    }

    pub async fn delete(&self, id: i64) -> Result<WorkoutSession> {
        with_connection(&self.pool, move |conn| {
            conn.query_row(
                "DELETE FROM workout_sessions WHERE id = ? RETURNING *",
                [id],
                WorkoutSession::from_row,
            )
            .optional()?
            .ok_or_else(not_found)
        })
        .await
    }
}
