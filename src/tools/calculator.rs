// Copyright 2026 BadCompany
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Arithmetic tool.

use crate::engine_core::errors::ToolError;
use crate::engine_core::models::{OperationDescriptor, ParamKind, ParameterSpec};
use crate::engine_core::params::Arguments;
use crate::tools::ToolHandler;
use crate::utils::number::format_number;
use crate::utils::value::display_optional;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    Add,
    Subtract,
    Multiply,
    Divide,
    Power,
    Sqrt,
}

impl Operation {
    pub const ALL: [Operation; 6] = [
        Operation::Add,
        Operation::Subtract,
        Operation::Multiply,
        Operation::Divide,
        Operation::Power,
        Operation::Sqrt,
    ];

    pub const fn as_str(&self) -> &'static str {
        match self {
            Operation::Add => "add",
            Operation::Subtract => "subtract",
            Operation::Multiply => "multiply",
            Operation::Divide => "divide",
            Operation::Power => "power",
            Operation::Sqrt => "sqrt",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|op| op.as_str() == name)
    }

    pub fn symbol(&self) -> &'static str {
        match self {
            Operation::Add => "+",
            Operation::Subtract => "-",
            Operation::Multiply => "×",
            Operation::Divide => "÷",
            Operation::Power => "^",
            Operation::Sqrt => "√",
        }
    }

    /// Noun used when the second operand is missing.
    fn operand_label(&self) -> &'static str {
        match self {
            Operation::Add => "addition",
            Operation::Subtract => "subtraction",
            Operation::Multiply => "multiplication",
            Operation::Divide => "division",
            Operation::Power => "power operation",
            Operation::Sqrt => "square root",
        }
    }
}

const OPERATION_NAMES: &[&str] = &[
    Operation::Add.as_str(),
    Operation::Subtract.as_str(),
    Operation::Multiply.as_str(),
    Operation::Divide.as_str(),
    Operation::Power.as_str(),
    Operation::Sqrt.as_str(),
];

static DESCRIPTOR: OperationDescriptor = OperationDescriptor {
    name: "calculator",
    description: "Performs basic mathematical calculations",
    parameters: &[
        // Resolved after `a`, so that a bad operand is reported first
        ParameterSpec::required(
            "operation",
            ParamKind::String,
            "Mathematical operation to perform",
        )
        .one_of(OPERATION_NAMES)
        .unchecked(),
        ParameterSpec::required("a", ParamKind::Number, "First number"),
        ParameterSpec::optional("b", ParamKind::Number, "Second number (not required for sqrt)"),
    ],
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CalculatorTool;

impl ToolHandler for CalculatorTool {
    fn descriptor(&self) -> &'static OperationDescriptor {
        &DESCRIPTOR
    }

    fn call(&self, args: Arguments<'_>) -> Result<String, ToolError> {
        let a = args.number("a").ok_or(ToolError::InvalidParameter {
            name: "a".to_string(),
            kind: ParamKind::Number,
        })?;
        let op = args
            .str("operation")
            .and_then(Operation::from_name)
            .ok_or_else(|| ToolError::UnknownValue {
                name: "operation".to_string(),
                value: display_optional(args.value("operation")),
            })?;
        // A `b` of the wrong kind counts as missing
        calculate(op, a, args.number("b"))
    }
}

/// Apply `op` and render the `Result: ...` line.
pub fn calculate(op: Operation, a: f64, b: Option<f64>) -> Result<String, ToolError> {
    let (b, result) = match op {
        Operation::Sqrt => {
            if a < 0.0 {
                return Err(ToolError::NegativeSquareRoot);
            }
            return Ok(format!(
                "Result: √{} = {}",
                format_number(a),
                format_number(a.sqrt())
            ));
        }
        Operation::Add => {
            let b = operand(op, b)?;
            (b, a + b)
        }
        Operation::Subtract => {
            let b = operand(op, b)?;
            (b, a - b)
        }
        Operation::Multiply => {
            let b = operand(op, b)?;
            (b, a * b)
        }
        Operation::Divide => {
            let b = operand(op, b)?;
            if b == 0.0 {
                return Err(ToolError::DivideByZero);
            }
            (b, a / b)
        }
        Operation::Power => {
            let b = operand(op, b)?;
            (b, a.powf(b))
        }
    };

    Ok(format!(
        "Result: {} {} {} = {}",
        format_number(a),
        op.symbol(),
        format_number(b),
        format_number(result)
    ))
}

fn operand(op: Operation, b: Option<f64>) -> Result<f64, ToolError> {
    b.ok_or(ToolError::MissingOperand(op.operand_label()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_binary_operations() {
        assert_eq!(
            calculate(Operation::Add, 2.0, Some(3.0)).unwrap(),
            "Result: 2 + 3 = 5"
        );
        assert_eq!(
            calculate(Operation::Subtract, 2.0, Some(3.5)).unwrap(),
            "Result: 2 - 3.5 = -1.5"
        );
        assert_eq!(
            calculate(Operation::Multiply, 4.0, Some(2.5)).unwrap(),
            "Result: 4 × 2.5 = 10"
        );
        assert_eq!(
            calculate(Operation::Divide, 1.0, Some(4.0)).unwrap(),
            "Result: 1 ÷ 4 = 0.25"
        );
        assert_eq!(
            calculate(Operation::Power, 2.0, Some(10.0)).unwrap(),
            "Result: 2 ^ 10 = 1024"
        );
    }

    #[test]
    fn test_sqrt() {
        assert_eq!(
            calculate(Operation::Sqrt, 16.0, None).unwrap(),
            "Result: √16 = 4"
        );
        assert_eq!(
            calculate(Operation::Sqrt, 9.0, Some(100.0)).unwrap(),
            "Result: √9 = 3"
        );
        assert_eq!(
            calculate(Operation::Sqrt, -4.0, None).unwrap_err(),
            ToolError::NegativeSquareRoot
        );
    }

    #[test]
    fn test_divide_by_zero() {
        assert_eq!(
            calculate(Operation::Divide, 1.0, Some(0.0)).unwrap_err(),
            ToolError::DivideByZero
        );
        assert_eq!(
            calculate(Operation::Divide, 1.0, Some(-0.0)).unwrap_err(),
            ToolError::DivideByZero
        );
    }

    #[test]
    fn test_missing_operand_messages() {
        let cases = [
            (Operation::Add, "addition"),
            (Operation::Subtract, "subtraction"),
            (Operation::Multiply, "multiplication"),
            (Operation::Divide, "division"),
            (Operation::Power, "power operation"),
        ];
        for (op, label) in cases {
            let err = calculate(op, 1.0, None).unwrap_err();
            assert_eq!(
                err.to_string(),
                format!("Parameter \"b\" must be a number for {label}")
            );
        }
    }

    #[test]
    fn test_operation_names_round_trip() {
        for op in Operation::ALL {
            assert_eq!(Operation::from_name(op.as_str()), Some(op));
        }
        assert_eq!(Operation::from_name("modulo"), None);
        assert_eq!(OPERATION_NAMES.len(), Operation::ALL.len());
    }
}
