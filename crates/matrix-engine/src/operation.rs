use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Operations the engine can apply to a pair of matrices.
#[derive(Deserialize, Serialize, Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "lowercase")]
pub enum Operation {
    #[default]
    Add,
    Subtract,
    Multiply,
    /// Multiplies every cell of A by the (0, 0) cell of B.
    #[serde(rename = "scalar", alias = "scalar_multiply", alias = "scalar-multiply")]
    ScalarMultiply,
}

impl Operation {
    /// Selector name, as accepted by `FromStr`.
    pub fn as_str(&self) -> &'static str {
        match self {
            Operation::Add => "add",
            Operation::Subtract => "subtract",
            Operation::Multiply => "multiply",
            Operation::ScalarMultiply => "scalar",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Operation::Add => "Addition (A + B)",
            Operation::Subtract => "Subtraction (A - B)",
            Operation::Multiply => "Multiplication (A × B)",
            Operation::ScalarMultiply => "Scalar Multiplication (A × scalar)",
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Operation {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "add" => Ok(Operation::Add),
            "subtract" => Ok(Operation::Subtract),
            "multiply" => Ok(Operation::Multiply),
            "scalar" | "scalar_multiply" | "scalar-multiply" => Ok(Operation::ScalarMultiply),
            _ => Err(format!(
                "Unknown operation: {}. Expected one of add, subtract, multiply, scalar",
                s
            )),
        }
    }
}
