use chrono::Utc;
use rusqlite::{params, OptionalExtension};

use crate::db::{with_connection, DbPool};
use crate::error::{AppError, Result};
use crate::models::{CreateUser, FromSqliteRow, UpdateUser, User};

fn not_found() -> AppError {
    AppError::NotFound("User not found".to_string())
}

#[derive(Clone)]
pub struct UserRepository {
    pool: DbPool,
}

impl UserRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    pub async fn find_by_id(&self, id: i64) -> Result<Option<User>> {
        with_connection(&self.pool, move |conn| {
            let user = conn
                .query_row("SELECT * FROM users WHERE id = ?", [id], User::from_row)
                .optional()?;
            Ok(user)
        })
        .await
    }

    pub async fn exists(&self, id: i64) -> Result<bool> {
        with_connection(&self.pool, move |conn| {
            let exists: bool = conn.query_row(
                "SELECT EXISTS(SELECT 1 FROM users WHERE id = ?)",
                [id],
                |row| row.get(0),
            )?;
            Ok(exists)
        })
        .await
    }

    pub async fn find_all(&self) -> Result<Vec<User>> {
        with_connection(&self.pool, |conn| {
            let mut stmt = conn.prepare("SELECT * FROM users ORDER BY id")?;
            let users = stmt
                .query_map([], User::from_row)?
                .collect::<rusqlite::Result<Vec<_>>>()?;
            Ok(users)
        })
        .await
    }

    pub async fn create(&self, new: CreateUser) -> Result<User> {
        let goals = serde_json::to_string(&new.goals)?;
        let created_at = Utc::now();

        with_connection(&self.pool, move |conn| {
            let user = conn.query_row(
                "INSERT INTO users (username, email, age, weight_kg, height_cm,
                    fitness_level, goals, created_at)
                 VALUES (?, ?, ?, ?, ?, ?, ?, ?)
                 RETURNING *",
                params![
                    new.username,
                    new.email,
                    new.age,
                    new.weight_kg,
                    new.height_cm,
                    new.fitness_level,
                    goals,
                    created_at
                ],
                User::from_row,
            )?;
            Ok(user)
        })
        .await
    }

    pub async fn update(&self, id: i64, update: UpdateUser) -> Result<User> {
        with_connection(&self.pool, move |conn| {
            let tx = conn.transaction()?;
            let mut user = tx
                .query_row("SELECT * FROM users WHERE id = ?", [id], User::from_row)
                .optional()?
                .ok_or_else(not_found)?;

            user.apply(update)?;

            tx.execute(
                "UPDATE users SET username = ?, email = ?, age = ?, weight_kg = ?,
                    height_cm = ?, fitness_level = ?, goals = ?
                 WHERE id = ?",
                params![
                    user.username,
                    user.email,
                    user.age,
                    user.weight_kg,
                    user.height_cm,
                    user.fitness_level,
                    serde_json::to_string(&user.goals)?,
                    id
                ],
            )?;
            tx.commit()?;
            Ok(user)
        })
        .await
    }

    /// Sessions and progress entries of the user are left in place.
    pub async fn delete(&self, id: i64) -> Result<User> {
        with_connection(&self.pool, move |conn| {
            conn.query_row(
                "DELETE FROM users WHERE id = ? RETURNING *",
                [id],
                User::from_row,
            )
            .optional()?
            .ok_or_else(not_found)
        })
        .await
    }
}
