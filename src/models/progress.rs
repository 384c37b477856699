use chrono::{DateTime, Utc};
use rusqlite::Row;
use serde::{Deserialize, Serialize};

use super::{FromSqliteRow, Patch};
use crate::error::Result;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserProgress {
    pub id: i64,
    pub user_id: i64,
    pub exercise_id: i64,
    pub date: DateTime<Utc>,
    pub weight_kg: Option<f64>,
    pub reps: Option<u32>,
    pub sets: Option<u32>,
    pub duration_minutes: Option<u32>,
    pub personal_record: bool,
}

impl FromSqliteRow for UserProgress {
    fn from_row(row: &Row) -> rusqlite::Result<Self> {
        Ok(Self {
            id: row.get("id")?,
            user_id: row.get("user_id")?,
            exercise_id: row.get("exercise_id")?,
            date: row.get("date")?,
            weight_kg: row.get("weight_kg")?,
            reps: row.get("reps")?,
            sets: row.get("sets")?,
            duration_minutes: row.get("duration_minutes")?,
            personal_record: row.get("personal_record")?,
        })
    }
}

#[derive(Debug, Deserialize)]
pub struct CreateUserProgress {
    pub user_id: i64,
    pub exercise_id: i64,
    /// Recorded at creation time when absent.
    pub date: Option<DateTime<Utc>>,
    pub weight_kg: Option<f64>,
    pub reps: Option<u32>,
    pub sets: Option<u32>,
    pub duration_minutes: Option<u32>,
    #[serde(default)]
    pub personal_record: bool,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct UpdateUserProgress {
    pub date: Patch<DateTime<Utc>>,
    pub weight_kg: Patch<f64>,
    pub reps: Patch<u32>,
    pub sets: Patch<u32>,
    pub duration_minutes: Patch<u32>,
    pub personal_record: Patch<bool>,
}

impl UserProgress {
    pub fn apply(&mut self, update: UpdateUserProgress) -> Result<()> {
        update.date.apply_to("date", &mut self.date)?;
        update.weight_kg.apply_to_option(&mut self.weight_kg);
        update.reps.apply_to_option(&mut self.reps);
        update.sets.apply_to_option(&mut self.sets);
        update.duration_minutes.apply_to_option(&mut self.duration_minutes);
        update
            .personal_record
            .apply_to("personal_record", &mut self.personal_record)?;
        Ok(())
    }
}

/// Query parameters accepted by `GET /progress`.
#[derive(Debug, Default, Clone, Deserialize)]
pub struct ProgressFilter {
    pub user_id: Option<i64>,
    pub exercise_id: Option<i64>,
}
