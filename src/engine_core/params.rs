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

//! Parameter validation.
//!
//! `Arguments` is produced only by [`Arguments::validate`], so a handler that
//! receives one can rely on every required parameter having passed its
//! presence, kind and enum checks. Optional parameters are not checked: the
//! typed accessors return `None` for a value of the wrong kind and each
//! operation decides what that means.

use serde_json::{Map, Value};

use crate::engine_core::errors::ToolError;
use crate::engine_core::models::{OperationDescriptor, ParamKind};

/// Validated view over an invocation's parameter map.
#[derive(Debug, Clone, Copy)]
pub struct Arguments<'a> {
    raw: &'a Map<String, Value>,
}

impl<'a> Arguments<'a> {
    /// Check `raw` against the descriptor's required parameters, in declared
    /// order.
    pub fn validate(
        descriptor: &OperationDescriptor,
        raw: &'a Map<String, Value>,
    ) -> Result<Self, ToolError> {
        for spec in descriptor
            .parameters
            .iter()
            .filter(|p| p.required && !p.unchecked)
        {
            let value = match raw.get(spec.name) {
                None | Some(Value::Null) => return Err(invalid(spec.name, spec.kind)),
                Some(v) => v,
            };

            if !spec.kind.matches(value) {
                return Err(invalid(spec.name, spec.kind));
            }

            if let (Some(allowed), Some(s)) = (spec.allowed_values, value.as_str()) {
                if !allowed.contains(&s) {
                    return Err(ToolError::UnknownValue {
                        name: spec.name.to_string(),
                        value: s.to_string(),
                    });
                }
            }
        }
        Ok(Self { raw })
    }

    /// Raw value of a parameter; `null` reads as absent.
    pub fn value(&self, name: &str) -> Option<&'a Value> {
        self.raw.get(name).filter(|v| !v.is_null())
    }

    pub fn str(&self, name: &str) -> Option<&'a str> {
        self.value(name).and_then(Value::as_str)
    }

    pub fn number(&self, name: &str) -> Option<f64> {
        self.value(name).and_then(Value::as_f64)
    }

    /// Like [`Arguments::str`], but treats an empty string as absent.
    pub fn non_empty_str(&self, name: &str) -> Option<&'a str> {
        self.str(name).filter(|s| !s.is_empty())
    }
}

fn invalid(name: &str, kind: ParamKind) -> ToolError {
    ToolError::InvalidParameter {
        name: name.to_string(),
        kind,
    }
}
