use std::fmt;
use std::str::FromStr;

use rusqlite::types::{FromSql, FromSqlError, FromSqlResult, ToSql, ToSqlOutput, ValueRef};
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error)]
#[error("unknown {kind}: {value}")]
pub struct ParseEnumError {
    kind: &'static str,
    value: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExerciseType {
    Cardio,
    Strength,
    Flexibility,
    Balance,
    Sports,
}

impl ExerciseType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ExerciseType::Cardio => "cardio",
            ExerciseType::Strength => "strength",
            ExerciseType::Flexibility => "flexibility",
            ExerciseType::Balance => "balance",
            ExerciseType::Sports => "sports",
        }
    }
}

impl FromStr for ExerciseType {
    type Err = ParseEnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "cardio" => Ok(ExerciseType::Cardio),
            "strength" => Ok(ExerciseType::Strength),
            "flexibility" => Ok(ExerciseType::Flexibility),
            "balance" => Ok(ExerciseType::Balance),
            "sports" => Ok(ExerciseType::Sports),
            _ => Err(ParseEnumError {
                kind: "exercise type",
                value: s.to_string(),
            }),
        }
    }
}

/// Exercise and routine difficulty; also a user's fitness level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Difficulty {
    #[default]
    Beginner,
    Intermediate,
    Advanced,
}

impl Difficulty {
    pub fn as_str(&self) -> &'static str {
        match self {
            Difficulty::Beginner => "beginner",
            Difficulty::Intermediate => "intermediate",
            Difficulty::Advanced => "advanced",
        }
    }
}

impl FromStr for Difficulty {
    type Err = ParseEnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "beginner" => Ok(Difficulty::Beginner),
            "intermediate" => Ok(Difficulty::Intermediate),
            "advanced" => Ok(Difficulty::Advanced),
            _ => Err(ParseEnumError {
                kind: "difficulty",
                value: s.to_string(),
            }),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MuscleGroup {
    Chest,
    Back,
    Shoulders,
    Arms,
    Legs,
    Core,
    FullBody,
}

impl MuscleGroup {
    pub fn as_str(&self) -> &'static str {
        match self {
            MuscleGroup::Chest => "chest",
            MuscleGroup::Back => "back",
            MuscleGroup::Shoulders => "shoulders",
            MuscleGroup::Arms => "arms",
            MuscleGroup::Legs => "legs",
            MuscleGroup::Core => "core",
            MuscleGroup::FullBody => "full_body",
        }
    }
}

impl FromStr for MuscleGroup {
    type Err = ParseEnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "chest" => Ok(MuscleGroup::Chest),
            "back" => Ok(MuscleGroup::Back),
            "shoulders" => Ok(MuscleGroup::Shoulders),
            "arms" => Ok(MuscleGroup::Arms),
            "legs" => Ok(MuscleGroup::Legs),
            "core" => Ok(MuscleGroup::Core),
            "full_body" => Ok(MuscleGroup::FullBody),
            _ => Err(ParseEnumError {
                kind: "muscle group",
                value: s.to_string(),
            }),
        }
    }
}

/// Muscle groups form a set: drop repeats, keep first-seen order.
pub fn dedup_muscle_groups(groups: Vec<MuscleGroup>) -> Vec<MuscleGroup> {
    let mut unique = Vec::with_capacity(groups.len());
    for group in groups {
        if !unique.contains(&group) {
            unique.push(group);
        }
    }
    unique
}

// Stored as their snake_case text.
macro_rules! impl_text_column {
    ($($ty:ty),+) => {
        $(
            impl fmt::Display for $ty {
                fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                    f.write_str(self.as_str())
                }
            }

            impl ToSql for $ty {
                fn to_sql(&self) -> rusqlite::Result<ToSqlOutput<'_>> {
                    Ok(ToSqlOutput::from(self.as_str()))
                }
            }

            impl FromSql for $ty {
                fn column_result(value: ValueRef<'_>) -> FromSqlResult<Self> {
                    value
                        .as_str()?
                        .parse()
                        .map_err(|e| FromSqlError::Other(Box::new(e)))
                }
            }
        )+
    };
}

impl_text_column!(ExerciseType, Difficulty, MuscleGroup);
