use chrono::{DateTime, Utc};
use rusqlite::Row;
use serde::{Deserialize, Serialize};

use super::from_row::json_column;
use super::{Difficulty, FromSqliteRow, Patch};
use crate::error::{AppError, Result};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: i64,
    pub username: String,
    pub email: String,
    pub age: Option<u32>,
    pub weight_kg: Option<f64>,
    pub height_cm: Option<f64>,
    pub fitness_level: Difficulty,
    pub goals: Vec<String>,
    pub created_at: DateTime<Utc>,
}

impl FromSqliteRow for User {
    fn from_row(row: &Row) -> rusqlite::Result<Self> {
        Ok(Self {
            id: row.get("id")?,
            username: row.get("username")?,
            email: row.get("email")?,
            age: row.get("age")?,
            weight_kg: row.get("weight_kg")?,
            height_cm: row.get("height_cm")?,
            fitness_level: row.get("fitness_level")?,
            goals: json_column(row, "goals")?,
            created_at: row.get("created_at")?,
        })
    }
}

#[derive(Debug, Deserialize)]
pub struct CreateUser {
    pub username: String,
    pub email: String,
    pub age: Option<u32>,
    pub weight_kg: Option<f64>,
    pub height_cm: Option<f64>,
    #[serde(default)]
    pub fitness_level: Difficulty,
    #[serde(default)]
    pub goals: Vec<String>,
}

impl CreateUser {
    pub fn validate(&self) -> Result<()> {
        validate_username(&self.username)?;
        validate_email(&self.email)
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct UpdateUser {
    pub username: Patch<String>,
    pub email: Patch<String>,
    pub age: Patch<u32>,
    pub weight_kg: Patch<f64>,
    pub height_cm: Patch<f64>,
    pub fitness_level: Patch<Difficulty>,
    pub goals: Patch<Vec<String>>,
}

impl User {
    pub fn apply(&mut self, update: UpdateUser) -> Result<()> {
        update.username.apply_to("username", &mut self.username)?;
        validate_username(&self.username)?;
        update.email.apply_to("email", &mut self.email)?;
        validate_email(&self.email)?;
        update.age.apply_to_option(&mut self.age);
        update.weight_kg.apply_to_option(&mut self.weight_kg);
        update.height_cm.apply_to_option(&mut self.height_cm);
        update
            .fitness_level
            .apply_to("fitness_level", &mut self.fitness_level)?;
        update.goals.apply_to("goals", &mut self.goals)?;
        Ok(())
    }
}

fn validate_username(username: &str) -> Result<()> {
    if username.trim().is_empty() {
        return Err(AppError::Validation("Username is required".to_string()));
    }
    Ok(())
}

fn validate_email(email: &str) -> Result<()> {
    let valid = match email.split_once('@') {
        Some((local, domain)) => {
            !local.is_empty()
                && domain.contains('.')
                && !domain.starts_with('.')
                && !domain.ends_with('.')
        }
        None => false,
    };
    if !valid {
        return Err(AppError::Validation(format!("Invalid email address: {}", email)));
    }
    Ok(())
}
