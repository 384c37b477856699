use std::collections::BTreeMap;
use std::sync::{Arc, Mutex, MutexGuard};

use chrono::Utc;

use crate::error::{AppError, Result};
use crate::models::{ArithmeticOperation, Calculation, OperationUpdate};

fn not_found() -> AppError {
    AppError::NotFound("Operation not found".to_string())
}

struct Inner {
    operations: BTreeMap<i64, ArithmeticOperation>,
    next_id: i64,
}

impl Default for Inner {
    fn default() -> Self {
        Self {
            operations: BTreeMap::new(),
            next_id: 1,
        }
    }
}

/// Process-local store for arithmetic operations. Contents are lost on restart.
#[derive(Clone, Default)]
pub struct OperationStore {
    inner: Arc<Mutex<Inner>>,
}

impl OperationStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> Result<MutexGuard<'_, Inner>> {
        self.inner
            .lock()
            .map_err(|_| AppError::Internal("operation store lock poisoned".to_string()))
    }

    pub fn insert(&self, calculation: Calculation) -> Result<ArithmeticOperation> {
        let mut inner = self.lock()?;
        let id = inner.next_id;
        inner.next_id += 1;

        let operation = stored(id, calculation);
        inner.operations.insert(id, operation.clone());
        Ok(operation)
    }

    pub fn find_all(&self) -> Result<Vec<ArithmeticOperation>> {
        Ok(self.lock()?.operations.values().cloned().collect())
    }

    pub fn find_by_id(&self, id: i64) -> Result<Option<ArithmeticOperation>> {
        Ok(self.lock()?.operations.get(&id).cloned())
    }

    pub fn replace(&self, id: i64, calculation: Calculation) -> Result<ArithmeticOperation> {
        let mut inner = self.lock()?;
        let slot = inner.operations.get_mut(&id).ok_or_else(not_found)?;
        *slot = stored(id, calculation);
        Ok(slot.clone())
    }

    /// Merges the supplied inputs into the stored ones and recomputes.
    /// The stored operation is untouched when the merge fails.
    pub fn update(&self, id: i64, update: OperationUpdate) -> Result<ArithmeticOperation> {
        let mut inner = self.lock()?;
        let slot = inner.operations.get_mut(&id).ok_or_else(not_found)?;
        let calculation = slot.merged(update)?;
        *slot = stored(id, calculation);
        Ok(slot.clone())
    }

    pub fn delete(&self, id: i64) -> Result<ArithmeticOperation> {
        self.lock()?.operations.remove(&id).ok_or_else(not_found)
    }

    /// Removes every operation and restarts ids at 1. Returns how many were removed.
    pub fn clear(&self) -> Result<usize> {
        let mut inner = self.lock()?;
        let count = inner.operations.len();
        *inner = Inner::default();
        Ok(count)
    }
}

fn stored(id: i64, calculation: Calculation) -> ArithmeticOperation {
    ArithmeticOperation {
        id,
        operation: calculation.operation,
        value1: calculation.value1,
        value2: calculation.value2,
        result: calculation.result,
        timestamp: Utc::now(),
    }
}
