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

//! Operation registry.
//!
//! `Tool` is the closed set of operations this server exposes. Each variant
//! wraps a handler that owns its descriptor, so the names used for discovery
//! and for dispatch come from a single place. Calls are forwarded by enum
//! match (static dispatch).

pub mod calculator;
pub mod hello;
pub mod time;

use crate::engine_core::errors::ToolError;
use crate::engine_core::models::{OperationDescriptor, ToolDefinition};
use crate::engine_core::params::Arguments;

pub use calculator::CalculatorTool;
pub use hello::HelloTool;
pub use time::TimeTool;

/// Behaviour shared by every operation.
pub trait ToolHandler: Send + Sync {
    /// Static metadata: name, description and parameter list
    fn descriptor(&self) -> &'static OperationDescriptor;

    /// Execute with arguments already checked against the descriptor.
    fn call(&self, args: Arguments<'_>) -> Result<String, ToolError>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tool {
    Hello(HelloTool),
    Time(TimeTool),
    Calculator(CalculatorTool),
}

impl Tool {
    /// Every registered operation, in discovery order.
    pub const ALL: [Tool; 3] = [
        Tool::Hello(HelloTool),
        Tool::Time(TimeTool),
        Tool::Calculator(CalculatorTool),
    ];

    pub fn from_name(name: &str) -> Option<Tool> {
        Self::ALL
            .into_iter()
            .find(|tool| tool.descriptor().name == name)
    }

    pub fn name(&self) -> &'static str {
        self.descriptor().name
    }
}

impl ToolHandler for Tool {
    fn descriptor(&self) -> &'static OperationDescriptor {
        match self {
            Self::Hello(t) => t.descriptor(),
            Self::Time(t) => t.descriptor(),
            Self::Calculator(t) => t.descriptor(),
        }
    }

    fn call(&self, args: Arguments<'_>) -> Result<String, ToolError> {
        match self {
            Self::Hello(t) => t.call(args),
            Self::Time(t) => t.call(args),
            Self::Calculator(t) => t.call(args),
        }
    }
}

/// Descriptors of all operations, in discovery order. Never fails.
pub fn list_operations() -> Vec<&'static OperationDescriptor> {
    Tool::ALL.iter().map(|t| t.descriptor()).collect()
}

/// Discovery payload entries for `tools/list`.
pub fn list_tools() -> Vec<ToolDefinition> {
    list_operations().into_iter().map(ToolDefinition::from).collect()
}
