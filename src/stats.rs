//! Aggregates derived from stored sessions and progress records. Nothing here
//! is cached; each request recomputes from the current rows.

use std::collections::HashSet;

use serde::Serialize;

use crate::models::{Exercise, User, UserProgress, WorkoutSession};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UserStats {
    pub user_id: i64,
    pub username: String,
    pub total_sessions: usize,
    pub completed_sessions: usize,
    pub total_duration_minutes: u64,
    pub total_calories_burned: f64,
    pub total_progress_records: usize,
    pub personal_records: usize,
    pub completion_rate: f64,
}

impl UserStats {
    /// Rows that belong to other users are ignored.
    pub fn compute(user: &User, sessions: &[WorkoutSession], progress: &[UserProgress]) -> Self {
        let sessions: Vec<&WorkoutSession> =
            sessions.iter().filter(|s| s.user_id == user.id).collect();
        let completed: Vec<&WorkoutSession> =
            sessions.iter().copied().filter(|s| s.completed).collect();
        let progress: Vec<&UserProgress> =
            progress.iter().filter(|p| p.user_id == user.id).collect();

        let completion_rate = if sessions.is_empty() {
            0.0
        } else {
            completed.len() as f64 / sessions.len() as f64
        };

        Self {
            user_id: user.id,
            username: user.username.clone(),
            total_sessions: sessions.len(),
            completed_sessions: completed.len(),
            total_duration_minutes: completed
                .iter()
                .filter_map(|s| s.total_duration_minutes)
                .map(u64::from)
                .sum(),
            total_calories_burned: completed.iter().filter_map(|s| s.calories_burned).sum(),
            total_progress_records: progress.len(),
            personal_records: progress.iter().filter(|p| p.personal_record).count(),
            completion_rate,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExerciseStats {
    pub exercise_id: i64,
    pub exercise_name: String,
    pub total_records: usize,
    pub unique_users: usize,
    pub personal_records: usize,
    pub average_weight_kg: f64,
    pub average_reps: f64,
}

impl ExerciseStats {
    pub fn compute(exercise: &Exercise, progress: &[UserProgress]) -> Self {
        let records: Vec<&UserProgress> = progress
            .iter()
            .filter(|p| p.exercise_id == exercise.id)
            .collect();
        let unique_users: HashSet<i64> = records.iter().map(|p| p.user_id).collect();

        Self {
            exercise_id: exercise.id,
            exercise_name: exercise.name.clone(),
            total_records: records.len(),
            unique_users: unique_users.len(),
            personal_records: records.iter().filter(|p| p.personal_record).count(),
            average_weight_kg: average(records.iter().filter_map(|p| p.weight_kg)),
            average_reps: average(records.iter().filter_map(|p| p.reps.map(f64::from))),
        }
    }
}

fn average(values: impl Iterator<Item = f64>) -> f64 {
    let (sum, count) = values.fold((0.0, 0usize), |(sum, count), v| (sum + v, count + 1));
    if count == 0 {
        0.0
    } else {
        sum / count as f64
    }
}
