use axum::Json;
use serde::{Deserialize, Serialize};

use crate::error::{AppError, Result};
use crate::extract::{ApiJson, ApiQuery};

#[derive(Debug, Deserialize)]
pub struct ProcessRequest {
    pub value1: i64,
    pub value2: i64,
}

#[derive(Debug, Serialize)]
pub struct ResultResponse<T> {
    pub result: T,
}

pub async fn process(
    ApiJson(payload): ApiJson<ProcessRequest>,
) -> Result<Json<ResultResponse<i64>>> {
    let result = payload
        .value1
        .checked_add(payload.value2)
        .ok_or_else(|| AppError::Validation("Integer overflow".to_string()))?;
    Ok(Json(ResultResponse { result }))
}

#[derive(Debug, Deserialize)]
pub struct ConcatQuery {
    pub param1: String,
    pub param2: String,
}

pub async fn concat(ApiQuery(query): ApiQuery<ConcatQuery>) -> Json<ResultResponse<String>> {
    Json(ResultResponse {
        result: query.param1 + &query.param2,
    })
}

#[derive(Debug, Deserialize)]
pub struct LengthQuery {
    pub string: String,
}

#[derive(Debug, Serialize)]
pub struct LengthResponse {
    pub length: usize,
}

/// Counts characters, not bytes.
pub async fn length(ApiQuery(query): ApiQuery<LengthQuery>) -> Json<LengthResponse> {
    Json(LengthResponse {
        length: query.string.chars().count(),
    })
}
