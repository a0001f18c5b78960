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

//! simple-mcp-server: a minimal Model Context Protocol tool server.
//!
//! This library provides the tool catalog (`hello`, `time`, `calculator`),
//! the dispatcher that validates and executes invocations, and the stdio
//! JSON-RPC transport that exposes them to MCP clients.

pub mod config;
pub mod engine;
pub mod engine_core;
pub mod mcp;
pub mod protocol;
pub mod tools;
pub mod utils;
