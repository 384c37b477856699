use serde::{Deserialize, Deserializer};

use crate::error::{AppError, Result};

/// One field of a partial-update payload.
///
/// Fields left out of the JSON body deserialize to `Absent` (via
/// `#[serde(default)]`), an explicit `null` to `Null`.
#[derive(Debug, Clone, PartialEq)]
pub enum Patch<T> {
    Absent,
    Null,
    Value(T),
}

impl<T> Default for Patch<T> {
    fn default() -> Self {
        Patch::Absent
    }
}

impl<'de, T> Deserialize<'de> for Patch<T>
where
    T: Deserialize<'de>,
{
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        Ok(match Option::<T>::deserialize(deserializer)? {
            Some(value) => Patch::Value(value),
            None => Patch::Null,
        })
    }
}

impl<T> Patch<T> {
    pub fn is_value(&self) -> bool {
        matches!(self, Patch::Value(_))
    }

    /// Overwrite a required field. `null` is rejected.
    pub fn apply_to(self, field: &str, target: &mut T) -> Result<()> {
        match self {
            Patch::Absent => Ok(()),
            Patch::Null => Err(AppError::Validation(format!("{} cannot be null", field))),
            Patch::Value(value) => {
                *target = value;
                Ok(())
            }
        }
    }

    /// Overwrite a nullable field. `null` clears it.
    pub fn apply_to_option(self, target: &mut Option<T>) {
        match self {
            Patch::Absent => {}
            Patch::Null => *target = None,
            Patch::Value(value) => *target = Some(value),
        }
    }
}
