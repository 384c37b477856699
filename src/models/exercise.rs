use rusqlite::Row;
use serde::{Deserialize, Serialize};

use super::enums::dedup_muscle_groups;
use super::from_row::json_column;
use super::{Difficulty, ExerciseType, FromSqliteRow, MuscleGroup, Patch};
use crate::error::{AppError, Result};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Exercise {
    pub id: i64,
    pub name: String,
    pub description: String,
    pub exercise_type: ExerciseType,
    pub difficulty: Difficulty,
    pub muscle_groups: Vec<MuscleGroup>,
    pub duration_minutes: Option<u32>,
    pub calories_burned_per_minute: Option<f64>,
    pub equipment_needed: Vec<String>,
    pub instructions: Vec<String>,
}

impl FromSqliteRow for Exercise {
    fn from_row(row: &Row) -> rusqlite::Result<Self> {
        Ok(Self {
            id: row.get("id")?,
            name: row.get("name")?,
            description: row.get("description")?,
            exercise_type: row.get("exercise_type")?,
            difficulty: row.get("difficulty")?,
            muscle_groups: json_column(row, "muscle_groups")?,
            duration_minutes: row.get("duration_minutes")?,
            calories_burned_per_minute: row.get("calories_burned_per_minute")?,
            equipment_needed: json_column(row, "equipment_needed")?,
            instructions: json_column(row, "instructions")?,
        })
    }
}

#[derive(Debug, Deserialize)]
pub struct CreateExercise {
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub exercise_type: ExerciseType,
    pub difficulty: Difficulty,
    #[serde(default)]
    pub muscle_groups: Vec<MuscleGroup>,
    pub duration_minutes: Option<u32>,
    pub calories_burned_per_minute: Option<f64>,
    #[serde(default)]
    pub equipment_needed: Vec<String>,
    #[serde(default)]
    pub instructions: Vec<String>,
}

impl CreateExercise {
    pub fn validate(&self) -> Result<()> {
        validate_name(&self.name)
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct UpdateExercise {
    pub name: Patch<String>,
    pub description: Patch<String>,
    pub exercise_type: Patch<ExerciseType>,
    pub difficulty: Patch<Difficulty>,
    pub muscle_groups: Patch<Vec<MuscleGroup>>,
    pub duration_minutes: Patch<u32>,
    pub calories_burned_per_minute: Patch<f64>,
    pub equipment_needed: Patch<Vec<String>>,
    pub instructions: Patch<Vec<String>>,
}

impl Exercise {
    /// Merge the supplied fields into this exercise.
    pub fn apply(&mut self, update: UpdateExercise) -> Result<()> {
        update.name.apply_to("name", &mut self.name)?;
        validate_name(&self.name)?;
        update.description.apply_to("description", &mut self.description)?;
        update
            .exercise_type
            .apply_to("exercise_type", &mut self.exercise_type)?;
        update.difficulty.apply_to("difficulty", &mut self.difficulty)?;
        update
            .muscle_groups
            .apply_to("muscle_groups", &mut self.muscle_groups)?;
        self.muscle_groups = dedup_muscle_groups(std::mem::take(&mut self.muscle_groups));
        update.duration_minutes.apply_to_option(&mut self.duration_minutes);
        update
            .calories_burned_per_minute
            .apply_to_option(&mut self.calories_burned_per_minute);
        update
            .equipment_needed
            .apply_to("equipment_needed", &mut self.equipment_needed)?;
        update
            .instructions
            .apply_to("instructions", &mut self.instructions)?;
        Ok(())
    }
}

/// Query parameters accepted by `GET /exercises`.
#[derive(Debug, Default, Clone, Deserialize)]
pub struct ExerciseFilter {
    pub exercise_type: Option<ExerciseType>,
    pub difficulty: Option<Difficulty>,
    pub muscle_group: Option<MuscleGroup>,
}

fn validate_name(name: &str) -> Result<()> {
    if name.trim().is_empty() {
        return Err(AppError::Validation("Exercise name is required".to_string()));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn push_ups() -> Exercise {
        Exercise {
            id: 1,
            name: "Push-ups".to_string(),
            description: "Bodyweight press".to_string(),
            exercise_type: ExerciseType::Strength,
            difficulty: Difficulty::Beginner,
            muscle_groups: vec![MuscleGroup::Chest, MuscleGroup::Arms],
            duration_minutes: Some(10),
            calories_burned_per_minute: Some(7.5),
            equipment_needed: vec![],
            instructions: vec!["Lower slowly".to_string()],
        }
    }

    #[test]
    fn test_empty_update_changes_nothing() {
        let mut exercise = push_ups();
        exercise.apply(UpdateExercise::default()).unwrap();
        assert_eq!(exercise, push_ups());
    }

    #[test]
    fn test_update_only_touches_supplied_fields() {
        let mut exercise = push_ups();
        let update: UpdateExercise = serde_json::from_str(
            r#"{"difficulty": "advanced", "duration_minutes": null, "muscle_groups": ["core", "core"]}"#,
        )
        .unwrap();

        exercise.apply(update).unwrap();

        assert_eq!(exercise.difficulty, Difficulty::Advanced);
        assert_eq!(exercise.duration_minutes, None);
        assert_eq!(exercise.muscle_groups, vec![MuscleGroup::Core]);
        assert_eq!(exercise.name, "Push-ups");
        assert_eq!(exercise.calories_burned_per_minute, Some(7.5));
        assert_eq!(exercise.id, 1);
    }

    #[test]
    fn test_update_rejects_blank_name() {
        let mut exercise = push_ups();
        let update: UpdateExercise = serde_json::from_str(r#"{"name": "   "}"#).unwrap();

        assert!(matches!(
            exercise.apply(update),
            Err(AppError::Validation(_))
        ));
    }

    #[test]
    fn test_update_ignores_id() {
        let mut exercise = push_ups();
        let update: UpdateExercise = serde_json::from_str(r#"{"id": 99}"#).unwrap();

        exercise.apply(update).unwrap();

        assert_eq!(exercise.id, 1);
    }

    #[test]
    fn test_create_defaults() {
        let create: CreateExercise = serde_json::from_str(
            r#"{"name": "Run", "exercise_type": "cardio", "difficulty": "beginner"}"#,
        )
        .unwrap();

        assert_eq!(create.description, "");
        assert!(create.muscle_groups.is_empty());
        assert!(create.equipment_needed.is_empty());
        assert_eq!(create.duration_minutes, None);
        create.validate().unwrap();
    }
}
