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

// Domain error types - the Display text is what the caller sees

use thiserror::Error;

use crate::engine_core::models::ParamKind;

/// Failure of a single tool invocation.
///
/// Every variant is recovered by the dispatcher and reported to the client
/// as a tool result with `isError: true`; none of them is a protocol fault.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ToolError {
    /// No descriptor matches the requested name
    #[error("Unknown tool: {0}")]
    UnknownTool(String),

    /// Required parameter missing, or a parameter of the wrong kind
    #[error("Parameter \"{name}\" must be a {kind}")]
    InvalidParameter { name: String, kind: ParamKind },

    /// Second calculator operand missing for a binary operation
    #[error("Parameter \"b\" must be a number for {0}")]
    MissingOperand(&'static str),

    /// Enumerated parameter outside its allowed set
    #[error("Unknown {name}: {value}")]
    UnknownValue { name: String, value: String },

    #[error("Cannot divide by zero")]
    DivideByZero,

    #[error("Cannot calculate square root of negative number")]
    NegativeSquareRoot,

    #[error("Invalid timezone: {0}")]
    InvalidTimezone(String),

    /// Unexpected failure inside a handler
    #[error("Error: {0}")]
    Internal(String),
}

/// Host-level errors raised while assembling the server configuration.
#[derive(Error, Debug)]
pub enum ServerError {
    #[error("Configuration error: {0}")]
    ConfigurationError(String),
}
