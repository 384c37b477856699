use chrono::Utc;
use rusqlite::{params, params_from_iter, OptionalExtension};

use super::Conditions;
use crate::db::{with_connection, DbPool};
use crate::error::{AppError, Result};
use crate::models::enums::dedup_muscle_groups;
use crate::models::{
    CreateWorkoutRoutine, FromSqliteRow, RoutineFilter, UpdateWorkoutRoutine, WorkoutRoutine,
};

const MUSCLE_GROUP_MEMBER: &str = "EXISTS (SELECT 1 FROM json_each(workout_routines.target_muscle_groups) WHERE json_each.value = ?)";

fn not_found() -> AppError {
    AppError::NotFound("Routine not found".to_string())
}

#[derive(Clone)]
pub struct RoutineRepository {
    pool: DbPool,
}

impl RoutineRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    pub async fn find_by_id(&self, id: i64) -> Result<Option<WorkoutRoutine>> {
        with_connection(&self.pool, move |conn| {
            let routine = conn
                .query_row(
                    "SELECT * FROM workout_routines WHERE id = ?",
                    [id],
                    WorkoutRoutine::from_row,
                )
                .optional()?;
            Ok(routine)
        })
        .await
    }

    pub async fn exists(&self, id: i64) -> Result<bool> {
        with_connection(&self.pool, move |conn| {
            let exists: bool = conn.query_row(
                "SELECT EXISTS(SELECT 1 FROM workout_routines WHERE id = ?)",
                [id],
                |row| row.get(0),
            )?;
            Ok(exists)
        })
        .await
    }

    pub async fn find_all(&self, filter: &RoutineFilter) -> Result<Vec<WorkoutRoutine>> {
        let mut conditions = Conditions::default();
        if let Some(difficulty) = filter.difficulty {
            conditions.push("difficulty = ?", difficulty.as_str().to_string());
        }
        if let Some(group) = filter.muscle_group {
            conditions.push(MUSCLE_GROUP_MEMBER, group.as_str().to_string());
        }
        let (sql, values) = conditions.into_query("workout_routines");

        with_connection(&self.pool, move |conn| {
            let mut stmt = conn.prepare(&sql)?;
            let routines = stmt
                .query_map(params_from_iter(values), WorkoutRoutine::from_row)?
                .collect::<rusqlite::Result<Vec<_>>>()?;
            Ok(routines)
        })
        .await
    }

    pub async fn create(&self, new: CreateWorkoutRoutine) -> Result<WorkoutRoutine> {
        let target_muscle_groups =
            serde_json::to_string(&dedup_muscle_groups(new.target_muscle_groups))?;
        let exercises = serde_json::to_string(&new.exercises)?;
        let created_at = Utc::now();

        with_connection(&self.pool, move |conn| {
            let routine = conn.query_row(
                "INSERT INTO workout_routines (name, description, difficulty,
                    target_muscle_groups, estimated_duration_minutes, exercises,
                    created_at, created_by)
                 VALUES (?, ?, ?, ?, ?, ?, ?, ?)
                 RETURNING *",
                params![
                    new.name,
                    new.description,
                    new.difficulty,
                    target_muscle_groups,
                    new.estimated_duration_minutes,
                    exercises,
                    created_at,
                    new.created_by
                ],
                WorkoutRoutine::from_row,
            )?;
            Ok(routine)
        })
        .await
    }

    pub async fn update(&self, id: i64, update: UpdateWorkoutRoutine) -> Result<WorkoutRoutine> {
        with_connection(&self.pool, move |conn| {
            let tx = conn.transaction()?;
            let mut routine = tx
                .query_row(
                    "SELECT * FROM workout_routines WHERE id = ?",
                    [id],
                    WorkoutRoutine::from_row,
                )
                .optional()?
                .ok_or_else(not_found)?;

            routine.apply(update)?;

            tx.execute(
                "UPDATE workout_routines SET name = ?, description = ?, difficulty = ?,
                    target_muscle_groups = ?, estimated_duration_minutes = ?, exercises = ?,
                    created_by = ?
                 WHERE id = ?",
                params![
                    routine.name,
                    routine.description,
                    routine.difficulty,
                    serde_json::to_string(&routine.target_muscle_groups)?,
                    routine.estimated_duration_minutes,
                    serde_json::to_string(&routine.exercises)?,
                    routine.created_by,
                    id
                ],
            )?;
            tx.commit()?;
            Ok(routine)
        })
        .await
    }

    pub async fn delete(&self, id: i64) -> Result<WorkoutRoutine> {
        with_connection(&self.pool, move |conn| {
            conn.query_row(
                "DELETE FROM workout_routines WHERE id = ? RETURNING *",
                [id],
                WorkoutRoutine::from_row,
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
    use crate::models::{Difficulty, MuscleGroup, Patch, RoutineExercise};

    fn setup_test_db() -> DbPool {
        let pool = create_memory_pool().expect("Failed to create test database");
        run_migrations_for_tests(&pool).expect("Failed to run migrations");
        pool
    }

    fn new_routine(
        name: &str,
        difficulty: Difficulty,
        groups: Vec<MuscleGroup>,
    ) -> CreateWorkoutRoutine {
        CreateWorkoutRoutine {
            name: name.to_string(),
            description: String::new(),
            difficulty,
            target_muscle_groups: groups,
            estimated_duration_minutes: 45,
            exercises: vec![],
            created_by: "admin".to_string(),
        }
    }

    #[tokio::test]
    async fn test_create_routine_with_exercises() {
        let repo = RoutineRepository::new(setup_test_db());
        let before = Utc::now();

        let routine = repo
            .create(CreateWorkoutRoutine {
                exercises: vec![RoutineExercise {
                    exercise_id: 3,
                    sets: Some(4),
                    reps: Some(10),
                    duration_seconds: None,
                    rest_seconds: Some(90),
                    weight_kg: Some(60.0),
                }],
                ..new_routine("Upper body", Difficulty::Intermediate, vec![MuscleGroup::Chest])
            })
            .await
            .unwrap();

        assert_eq!(routine.id, 1);
        assert_eq!(routine.exercises.len(), 1);
        assert_eq!(routine.exercises[0].rest_seconds, Some(90));
        assert_eq!(routine.created_by, "admin");
        assert!(routine.created_at >= before);
    }

    #[tokio::test]
    async fn test_find_all_by_muscle_group_and_difficulty() {
        let repo = RoutineRepository::new(setup_test_db());
        repo.create(new_routine(
            "Legs",
            Difficulty::Beginner,
            vec![MuscleGroup::Legs],
        ))
        .await
        .unwrap();
        repo.create(new_routine(
            "Full body",
            Difficulty::Advanced,
            vec![MuscleGroup::FullBody, MuscleGroup::Legs],
        ))
        .await
        .unwrap();

        let legs = repo
            .find_all(&RoutineFilter {
                muscle_group: Some(MuscleGroup::Legs),
                ..Default::default()
            })
            .await
            .unwrap();
        assert_eq!(legs.len(), 2);

        let advanced_legs = repo
            .find_all(&RoutineFilter {
                difficulty: Some(Difficulty::Advanced),
                muscle_group: Some(MuscleGroup::Legs),
            })
            .await
            .unwrap();
        assert_eq!(advanced_legs.len(), 1);
        assert_eq!(advanced_legs[0].name, "Full body");
    }

    #[tokio::test]
    async fn test_update_preserves_created_at() {
        let repo = RoutineRepository::new(setup_test_db());
        let routine = repo
            .create(new_routine("Core", Difficulty::Beginner, vec![]))
            .await
            .unwrap();

        let updated = repo
            .update(
                routine.id,
                UpdateWorkoutRoutine {
                    estimated_duration_minutes: Patch::Value(20),
                    ..Default::default()
                },
            )
            .await
            .unwrap();

        assert_eq!(updated.estimated_duration_minutes, 20);
        assert_eq!(updated.created_at, routine.created_at);
        assert_eq!(updated.name, "Core");
    }

    #[tokio::test]
    async fn test_delete_then_missing() {
        let repo = RoutineRepository::new(setup_test_db());
        let routine = repo
            .create(new_routine("Mobility", Difficulty::Beginner, vec![]))
            .await
            .unwrap();

        let deleted = repo.delete(routine.id).await.unwrap();

        assert_eq!(deleted.id, routine.id);
        assert!(!repo.exists(routine.id).await.unwrap());
        assert!(matches!(
            repo.update(routine.id, UpdateWorkoutRoutine::default()).await,
            Err(AppError::NotFound(_))
        ));
    }
}
