use chrono::{DateTime, Utc};
use rusqlite::Row;
use serde::{Deserialize, Serialize};

use super::{FromSqliteRow, Patch};
use crate::error::Result;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkoutSession {
    pub id: i64,
    pub user_id: i64,
    pub routine_id: i64,
    pub started_at: DateTime<Utc>,
    pub completed_at: Option<DateTime<Utc>>,
    pub total_duration_minutes: Option<u32>,
    pub calories_burned: Option<f64>,
    pub notes: Option<String>,
    pub completed: bool,
}

impl FromSqliteRow for WorkoutSession {
    fn from_row(row: &Row) -> rusqlite::Result<Self> {
        Ok(Self {
            id: row.get("id")?,
            user_id: row.get("user_id")?,
            routine_id: row.get("routine_id")?,
            started_at: row.get("started_at")?,
            completed_at: row.get("completed_at")?,
            total_duration_minutes: row.get("total_duration_minutes")?,
            calories_burned: row.get("calories_burned")?,
            notes: row.get("notes")?,
            completed: row.get("completed")?,
        })
    }
}

#[derive(Debug, Deserialize)]
pub struct CreateWorkoutSession {
    pub user_id: i64,
    pub routine_id: i64,
    pub total_duration_minutes: Option<u32>,
    pub calories_burned: Option<f64>,
    pub notes: Option<String>,
    #[serde(default)]
    pub completed: bool,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct UpdateWorkoutSession {
    pub completed: Patch<bool>,
    pub completed_at: Patch<DateTime<Utc>>,
    pub total_duration_minutes: Patch<u32>,
    pub calories_burned: Patch<f64>,
    pub notes: Patch<String>,
}

impl WorkoutSession {
    /// Merge the supplied fields into this session.
    ///
    /// Moving `completed` from false to true stamps `completed_at` with `now`
    /// when the session has no completion time yet and the payload carries
    /// none.
    pub fn apply(&mut self, update: UpdateWorkoutSession, now: DateTime<Utc>) -> Result<()> {
        let was_completed = self.completed;
        let completed_at_supplied = update.completed_at.is_value();

        update.completed.apply_to("completed", &mut self.completed)?;
        update.completed_at.apply_to_option(&mut self.completed_at);
        update
            .total_duration_minutes
            .apply_to_option(&mut self.total_duration_minutes);
        update.calories_burned.apply_to_option(&mut self.calories_burned);
        update.notes.apply_to_option(&mut self.notes);

        if self.completed
            && !was_completed
            && !completed_at_supplied
            && self.completed_at.is_none()
        {
            self.completed_at = Some(now);
        }
        Ok(())
    }
}

/// Query parameters accepted by `GET /sessions`.
#[derive(Debug, Default, Clone, Deserialize)]
pub struct SessionFilter {
    pub user_id: Option<i64>,
}
