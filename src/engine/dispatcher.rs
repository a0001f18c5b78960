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

//! Request dispatcher.
//!
//! Routes an `InvocationRequest` to its tool, validates the parameters
//! against the tool's descriptor and turns every failure into an error
//! `InvocationResult`. Nothing escapes `invoke`, panics included.

use std::any::Any;
use std::panic::{self, AssertUnwindSafe};

use tracing::{debug, warn};

use crate::engine_core::errors::ToolError;
use crate::engine_core::models::{InvocationRequest, InvocationResult, OperationDescriptor};
use crate::engine_core::params::Arguments;
use crate::tools::{self, Tool, ToolHandler};

pub struct Dispatcher;

impl Dispatcher {
    /// Discovery: the immutable operation catalog.
    pub fn list_operations() -> Vec<&'static OperationDescriptor> {
        tools::list_operations()
    }

    /// Execute one invocation. Never panics, never returns `Err`.
    pub fn invoke(request: &InvocationRequest) -> InvocationResult {
        debug!(tool = %request.operation_name, "Dispatching tool call");
        guard(&request.operation_name, || Self::execute(request))
    }

    fn execute(request: &InvocationRequest) -> Result<String, ToolError> {
        let tool = Tool::from_name(&request.operation_name)
            .ok_or_else(|| ToolError::UnknownTool(request.operation_name.clone()))?;
        let args = Arguments::validate(tool.descriptor(), &request.parameters)?;
        tool.call(args)
    }
}

/// Run a handler, turning its error or panic into an error result.
fn guard<F>(tool: &str, handler: F) -> InvocationResult
where
    F: FnOnce() -> Result<String, ToolError>,
{
    let outcome = panic::catch_unwind(AssertUnwindSafe(handler))
        .unwrap_or_else(|payload| Err(ToolError::Internal(panic_message(&*payload))));

    match outcome {
        Ok(text) => InvocationResult::success(text),
        Err(e) => {
            warn!(tool = %tool, "Tool call failed: {}", e);
            InvocationResult::error(e.to_string())
        }
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        s.to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "Unknown error".to_string()
    }
}
