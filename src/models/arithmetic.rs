use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::Patch;
use crate::error::{AppError, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Operation {
    Add,
    Subtract,
    Multiply,
    Divide,
}

impl Operation {
    pub fn as_str(&self) -> &'static str {
        match self {
            Operation::Add => "add",
            Operation::Subtract => "subtract",
            Operation::Multiply => "multiply",
            Operation::Divide => "divide",
        }
    }

    /// JSON has no representation for infinities, so an overflowing result
    /// is rejected instead of being stored.
    pub fn evaluate(self, value1: f64, value2: f64) -> Result<f64> {
        let result = match self {
            Operation::Add => value1 + value2,
            Operation::Subtract => value1 - value2,
            Operation::Multiply => value1 * value2,
            Operation::Divide => {
                if value2 == 0.0 {
                    return Err(AppError::Validation(
                        "Division by zero is not allowed".to_string(),
                    ));
                }
                value1 / value2
            }
        };
        if !result.is_finite() {
            return Err(AppError::Validation(
                "Result is not a finite number".to_string(),
            ));
        }
        Ok(result)
    }
}

impl FromStr for Operation {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "add" => Ok(Operation::Add),
            "subtract" => Ok(Operation::Subtract),
            "multiply" => Ok(Operation::Multiply),
            "divide" => Ok(Operation::Divide),
            _ => Err(AppError::Validation(format!("Unsupported operation: {}", s))),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ArithmeticOperation {
    pub id: i64,
    pub operation: Operation,
    pub value1: f64,
    pub value2: f64,
    pub result: f64,
    /// When `result` was last computed.
    pub timestamp: DateTime<Utc>,
}

/// A validated operation with its computed result, not yet stored.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Calculation {
    pub operation: Operation,
    pub value1: f64,
    pub value2: f64,
    pub result: f64,
}

impl Calculation {
    pub fn compute(operation: &str, value1: f64, value2: f64) -> Result<Self> {
        let operation: Operation = operation.parse()?;
        let result = operation.evaluate(value1, value2)?;
        Ok(Self {
            operation,
            value1,
            value2,
            result,
        })
    }
}

/// Body of create and full-replace requests. The operation stays a plain
/// string here so an unknown name is reported as a 400 with its own message.
#[derive(Debug, Deserialize)]
pub struct OperationRequest {
    pub operation: String,
    pub value1: f64,
    pub value2: f64,
}

impl OperationRequest {
    pub fn calculate(&self) -> Result<Calculation> {
        Calculation::compute(&self.operation, self.value1, self.value2)
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct OperationUpdate {
    pub operation: Patch<String>,
    pub value1: Patch<f64>,
    pub value2: Patch<f64>,
}

impl ArithmeticOperation {
    /// Merge the supplied inputs and recompute the result.
    pub fn merged(&self, update: OperationUpdate) -> Result<Calculation> {
        let mut operation = self.operation.as_str().to_string();
        let mut value1 = self.value1;
        let mut value2 = self.value2;
        update.operation.apply_to("operation", &mut operation)?;
        update.value1.apply_to("value1", &mut value1)?;
        update.value2.apply_to("value2", &mut value2)?;
        Calculation::compute(&operation, value1, value2)
    }
}
