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

use crate::engine_core::errors::ToolError;
use crate::engine_core::models::{OperationDescriptor, ParamKind, ParameterSpec};
use crate::engine_core::params::Arguments;
use crate::tools::ToolHandler;
use crate::utils::value::{display_value, is_falsy};

const DEFAULT_NAME: &str = "World";

static DESCRIPTOR: OperationDescriptor = OperationDescriptor {
    name: "hello",
    description: "Returns a friendly greeting message",
    parameters: &[ParameterSpec::optional(
        "name",
        ParamKind::String,
        "Name to greet (optional)",
    )],
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct HelloTool;

impl ToolHandler for HelloTool {
    fn descriptor(&self) -> &'static OperationDescriptor {
        &DESCRIPTOR
    }

    fn call(&self, args: Arguments<'_>) -> Result<String, ToolError> {
        // Any non-empty value is greeted as written
        let name = args
            .value("name")
            .filter(|v| !is_falsy(v))
            .map(display_value);
        Ok(greeting(name.as_deref()))
    }
}

pub fn greeting(name: Option<&str>) -> String {
    let name = name.unwrap_or(DEFAULT_NAME);
    format!("Hello, {name}! 👋 Welcome to the Simple MCP Server!")
}
