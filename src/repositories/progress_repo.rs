use chrono::Utc;
use rusqlite::{params, params_from_iter, OptionalExtension};

use super::Conditions;
use crate::db::{with_connection, DbPool};
use crate::error::{AppError, Result};
use crate::models::{
    CreateUserProgress, FromSqliteRow, ProgressFilter, UpdateUserProgress, UserProgress,
};

fn not_found() -> AppError {
    AppError::NotFound("Progress record not found".to_string())
}

#[derive(Clone)]
pub struct ProgressRepository {
    pool: DbPool,
}

impl ProgressRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    pub async fn find_by_id(&self, id: i64) -> Result<Option<UserProgress>> {
        with_connection(&self.pool, move |conn| {
            let progress = conn
                .query_row(
                    "SELECT * FROM user_progress WHERE id = ?",
                    [id],
                    UserProgress::from_row,
                )
                .optional()?;
            Ok(progress)
        })
        .await
    }

    pub async fn find_all(&self, filter: &ProgressFilter) -> Result<Vec<UserProgress>> {
        let mut conditions = Conditions::default();
        if let Some(user_id) = filter.user_id {
            conditions.push("user_id = ?", user_id);
        }
        if let Some(exercise_id) = filter.exercise_id {
            conditions.push("exercise_id = ?", exercise_id);
        }
        let (sql, values) = conditions.into_query("user_progress");

        with_connection(&self.pool, move |conn| {
            let mut stmt = conn.prepare(&sql)?;
            let records = stmt
                .query_map(params_from_iter(values), UserProgress::from_row)?
                .collect::<rusqlite::Result<Vec<_>>>()?;
            Ok(records)
        })
        .await
    }

    /// Callers check that the user and exercise exist first.
    pub async fn create(&self, new: CreateUserProgress) -> Result<UserProgress> {
        let date = new.date.unwrap_or_else(Utc::now);

        with_connection(&self.pool, move |conn| {
            let progress = conn.query_row(
                "INSERT INTO user_progress (user_id, exercise_id, date, weight_kg, reps,
                    sets, duration_minutes, personal_record)
                 VALUES (?, ?, ?, ?, ?, ?, ?, ?)
                 RETURNING *",
                params![
                    new.user_id,
                    new.exercise_id,
                    date,
                    new.weight_kg,
                    new.reps,
                    new.sets,
                    new.duration_minutes,
                    new.personal_record
                ],
                UserProgress::from_row,
            )?;
            Ok(progress)
        })
        .await
    }

    pub async fn update(&self, id: i64, update: UpdateUserProgress) -> Result<UserProgress> {
        with_connection(&self.pool, move |conn| {
            let tx = conn.transaction()?;
            let mut progress = tx
                .query_row(
                    "SELECT * FROM user_progress WHERE id = ?",
                    [id],
                    UserProgress::from_row,
                )
                .optional()?
                .ok_or_else(not_found)?;

            progress.apply(update)?;

            tx.execute(
                "UPDATE user_progress SET date = ?, weight_kg = ?, reps = ?, sets = ?,
                    duration_minutes = ?, personal_record = ?
                 WHERE id = ?",
                params![
                    progress.date,
                    progress.weight_kg,
                    progress.reps,
                    progress.sets,
                    progress.duration_minutes,
                    progress.personal_record,
                    id
                ],
            )?;
            tx.commit()?;
            Ok(progress)
        })
        .await
    }

    pub async fn delete(&self, id: i64) -> Result<UserProgress> {
        with_connection(&self.pool, move |conn| {
            conn.query_row(
                "DELETE FROM user_progress WHERE id = ? RETURNING *",
                [id],
                UserProgress::from_row,
            )
            .optional()?
            .ok_or_else(not_found)
        })
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::create_memory_pool;
    use crate::migrations::run_migrations_for_tests;
    use crate::models::Patch;
    use chrono::{Duration, TimeZone};

    fn setup_test_db() -> DbPool {
        let pool = create_memory_pool().expect("Failed to create test database");
        run_migrations_for_tests(&pool).expect("Failed to run migrations");
        pool
    }

    fn new_progress(user_id: i64, exercise_id: i64) -> CreateUserProgress {
        CreateUserProgress {
            user_id,
            exercise_id,
            date: None,
            weight_kg: Some(60.0),
            reps: Some(8),
            sets: Some(3),
            duration_minutes: None,
            personal_record: false,
        }
    }

    #[tokio::test]
    async fn test_create_defaults_date_to_now() {
        let repo = ProgressRepository::new(setup_test_db());
        let before = Utc::now();

        let progress = repo.create(new_progress(1, 1)).await.unwrap();

        assert!(progress.date >= before);
        assert!(progress.date <= Utc::now() + Duration::seconds(1));
        assert!(!progress.personal_record);
    }

    #[tokio::test]
    async fn test_create_keeps_supplied_date() {
        let repo = ProgressRepository::new(setup_test_db());
        let date = Utc.with_ymd_and_hms(2024, 1, 15, 7, 30, 0).unwrap();

        let progress = repo
            .create(CreateUserProgress {
                date: Some(date),
                ..new_progress(1, 1)
            })
            .await
            .unwrap();

        assert_eq!(progress.date, date);
    }

    #[tokio::test]
    async fn test_find_all_filters_combine() {
        let repo = ProgressRepository::new(setup_test_db());
        repo.create(new_progress(1, 1)).await.unwrap();
        repo.create(new_progress(1, 2)).await.unwrap();
        repo.create(new_progress(2, 1)).await.unwrap();

        let by_user = repo
            .find_all(&ProgressFilter {
                user_id: Some(1),
                exercise_id: None,
            })
            .await
            .unwrap();
        assert_eq!(by_user.len(), 2);

        let by_exercise = repo
            .find_all(&ProgressFilter {
                user_id: None,
                exercise_id: Some(1),
            })
            .await
            .unwrap();
        assert_eq!(by_exercise.len(), 2);

        let both = repo
            .find_all(&ProgressFilter {
                user_id: Some(2),
                exercise_id: Some(1),
            })
            .await
            .unwrap();
        assert_eq!(both.len(), 1);
        assert_eq!(both[0].id, 3);
    }

    #[tokio::test]
    async fn test_update_progress() {
        let repo = ProgressRepository::new(setup_test_db());
        let progress = repo.create(new_progress(1, 1)).await.unwrap();

        let updated = repo
            .update(
                progress.id,
                UpdateUserProgress {
                    reps: Patch::Value(10),
                    personal_record: Patch::Value(true),
                    ..Default::default()
                },
            )
            .await
            .unwrap();

        assert_eq!(updated.reps, Some(10));
        assert!(updated.personal_record);
        assert_eq!(updated.weight_kg, Some(60.0));
        assert_eq!(updated.date, progress.date);
    }
}
