use chrono::{DateTime, Utc};
use rusqlite::Row;
use serde::{Deserialize, Serialize};

use super::enums::dedup_muscle_groups;
use super::from_row::json_column;
use super::{Difficulty, FromSqliteRow, MuscleGroup, Patch};
use crate::error::{AppError, Result};

pub const DEFAULT_CREATOR: &str = "admin";

/// One exercise slot inside a routine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoutineExercise {
    pub exercise_id: i64,
    pub sets: Option<u32>,
    pub reps: Option<u32>,
    pub duration_seconds: Option<u32>,
    pub rest_seconds: Option<u32>,
    pub weight_kg: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkoutRoutine {
    pub id: i64,
    pub name: String,
    pub description: String,
    pub difficulty: Difficulty,
    pub target_muscle_groups: Vec<MuscleGroup>,
    pub estimated_duration_minutes: u32,
    pub exercises: Vec<RoutineExercise>,
    pub created_at: DateTime<Utc>,
    pub created_by: String,
}

impl FromSqliteRow for WorkoutRoutine {
    fn from_row(row: &Row) -> rusqlite::Result<Self> {
        Ok(Self {
            id: row.get("id")?,
            name: row.get("name")?,
            description: row.get("description")?,
            difficulty: row.get("difficulty")?,
            target_muscle_groups: json_column(row, "target_muscle_groups")?,
            estimated_duration_minutes: row.get("estimated_duration_minutes")?,
            exercises: json_column(row, "exercises")?,
            created_at: row.get("created_at")?,
            created_by: row.get("created_by")?,
        })
    }
}

fn default_creator() -> String {
    DEFAULT_CREATOR.to_string()
}

#[derive(Debug, Deserialize)]
pub struct CreateWorkoutRoutine {
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub difficulty: Difficulty,
    #[serde(default)]
    pub target_muscle_groups: Vec<MuscleGroup>,
    pub estimated_duration_minutes: u32,
    #[serde(default)]
    pub exercises: Vec<RoutineExercise>,
    #[serde(default = "default_creator")]
    pub created_by: String,
}

impl CreateWorkoutRoutine {
    pub fn validate(&self) -> Result<()> {
        validate_name(&self.name)
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct UpdateWorkoutRoutine {
    pub name: Patch<String>,
    pub description: Patch<String>,
    pub difficulty: Patch<Difficulty>,
    pub target_muscle_groups: Patch<Vec<MuscleGroup>>,
    pub estimated_duration_minutes: Patch<u32>,
    pub exercises: Patch<Vec<RoutineExercise>>,
    pub created_by: Patch<String>,
}

impl WorkoutRoutine {
    pub fn apply(&mut self, update: UpdateWorkoutRoutine) -> Result<()> {
        update.name.apply_to("name", &mut self.name)?;
        validate_name(&self.name)?;
        update.description.apply_to("description", &mut self.description)?;
        update.difficulty.apply_to("difficulty", &mut self.difficulty)?;
        update
            .target_muscle_groups
            .apply_to("target_muscle_groups", &mut self.target_muscle_groups)?;
        self.target_muscle_groups =
            dedup_muscle_groups(std::mem::take(&mut self.target_muscle_groups));
        update
            .estimated_duration_minutes
            .apply_to("estimated_duration_minutes", &mut self.estimated_duration_minutes)?;
        update.exercises.apply_to("exercises", &mut self.exercises)?;
        update.created_by.apply_to("created_by", &mut self.created_by)?;
        Ok(())
    }
}

/// Query parameters accepted by `GET /routines`.
#[derive(Debug, Default, Clone, Deserialize)]
pub struct RoutineFilter {
    pub difficulty: Option<Difficulty>,
    pub muscle_group: Option<MuscleGroup>,
}

fn validate_name(name: &str) -> Result<()> {
    if name.trim().is_empty() {
        return Err(AppError::Validation("Routine name is required".to_string()));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_defaults_creator_to_admin() {
        let create: CreateWorkoutRoutine = serde_json::from_str(
            r#"{"name": "Push day", "difficulty": "intermediate", "estimated_duration_minutes": 45}"#,
        )
        .unwrap();

        assert_eq!(create.created_by, "admin");
        assert!(create.exercises.is_empty());
        assert!(create.target_muscle_groups.is_empty());
    }

    #[test]
    fn test_routine_exercise_optional_fields() {
        let slot: RoutineExercise =
            serde_json::from_str(r#"{"exercise_id": 3, "sets": 4, "reps": 8}"#).unwrap();

        assert_eq!(slot.exercise_id, 3);
        assert_eq!(slot.sets, Some(4));
        assert_eq!(slot.rest_seconds, None);
        assert_eq!(slot.weight_kg, None);
    }

    #[test]
    fn test_apply_keeps_created_at() {
        let created_at = Utc::now();
        let mut routine = WorkoutRoutine {
            id: 7,
            name: "Legs".to_string(),
            description: String::new(),
            difficulty: Difficulty::Beginner,
            target_muscle_groups: vec![MuscleGroup::Legs],
            estimated_duration_minutes: 30,
            exercises: vec![],
            created_at,
            created_by: "admin".to_string(),
        };
        let update: UpdateWorkoutRoutine = serde_json::from_str(
            r#"{"estimated_duration_minutes": 50, "created_at": "2020-01-01T00:00:00Z"}"#,
        )
        .unwrap();

        routine.apply(update).unwrap();

        assert_eq!(routine.estimated_duration_minutes, 50);
        assert_eq!(routine.created_at, created_at);
        assert_eq!(routine.id, 7);
    }

    #[test]
    fn test_apply_rejects_null_duration() {
        let mut routine = WorkoutRoutine {
            id: 1,
            name: "Core".to_string(),
            description: String::new(),
            difficulty: Difficulty::Beginner,
            target_muscle_groups: vec![],
            estimated_duration_minutes: 20,
            exercises: vec![],
            created_at: Utc::now(),
            created_by: "admin".to_string(),
        };
        let update: UpdateWorkoutRoutine =
            serde_json::from_str(r#"{"estimated_duration_minutes": null}"#).unwrap();

        assert!(matches!(routine.apply(update), Err(AppError::Validation(_))));
    }
}
