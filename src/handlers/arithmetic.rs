use axum::{extract::State, Json};
use serde_json::{json, Value};

use crate::error::{AppError, Result};
use crate::extract::{ApiJson, ApiPath};
use crate::models::{ArithmeticOperation, OperationRequest, OperationUpdate};
use crate::repositories::OperationStore;

#[derive(Clone)]
pub struct ArithmeticState {
    pub store: OperationStore,
}

pub async fn list(State(state): State<ArithmeticState>) -> Result<Json<Vec<ArithmeticOperation>>> {
    Ok(Json(state.store.find_all()?))
}

pub async fn show(
    State(state): State<ArithmeticState>,
    ApiPath(id): ApiPath<i64>,
) -> Result<Json<ArithmeticOperation>> {
    let operation = state
        .store
        .find_by_id(id)?
        .ok_or_else(|| AppError::NotFound("Operation not found".to_string()))?;
    Ok(Json(operation))
}

pub async fn create(
    State(state): State<ArithmeticState>,
    ApiJson(payload): ApiJson<OperationRequest>,
) -> Result<Json<ArithmeticOperation>> {
    let calculation = payload.calculate()?;
    let operation = state.store.insert(calculation)?;
    tracing::debug!("Operation computed: {} = {}", operation.id, operation.result);
    Ok(Json(operation))
}

/// Full replace; every input must be supplied.
pub async fn replace(
    State(state): State<ArithmeticState>,
    ApiPath(id): ApiPath<i64>,
    ApiJson(payload): ApiJson<OperationRequest>,
) -> Result<Json<ArithmeticOperation>> {
    if state.store.find_by_id(id)?.is_none() {
        return Err(AppError::NotFound("Operation not found".to_string()));
    }
    let calculation = payload.calculate()?;
    Ok(Json(state.store.replace(id, calculation)?))
}

pub async fn update(
    State(state): State<ArithmeticState>,
    ApiPath(id): ApiPath<i64>,
    ApiJson(payload): ApiJson<OperationUpdate>,
) -> Result<Json<ArithmeticOperation>> {
    Ok(Json(state.store.update(id, payload)?))
}

pub async fn delete(
    State(state): State<ArithmeticState>,
    ApiPath(id): ApiPath<i64>,
) -> Result<Json<Value>> {
    let operation = state.store.delete(id)?;
    super::deleted("Operation", "operation", id, &operation)
}

pub async fn clear_all(State(state): State<ArithmeticState>) -> Result<Json<Value>> {
    let count = state.store.clear()?;
    tracing::info!("Arithmetic operations cleared: {}", count);
    Ok(Json(json!({
        "message": format!("All {} operations deleted successfully", count)
    })))
}
