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

//! Server constants - single source of truth for names, codes and limits.

/// JSON-RPC 2.0 Error Codes
pub mod jsonrpc {
    /// Protocol version string carried by every message
    pub const VERSION: &str = "2.0";
    /// Parse error (standard JSON-RPC)
    pub const ERROR_PARSE: i32 = -32700;
    /// Invalid request (standard JSON-RPC)
    pub const ERROR_INVALID_REQUEST: i32 = -32600;
    /// Method not found (standard JSON-RPC)
    pub const ERROR_METHOD_NOT_FOUND: i32 = -32601;
    /// Invalid params (standard JSON-RPC)
    pub const ERROR_INVALID_PARAMS: i32 = -32602;
    /// Internal error (standard JSON-RPC)
    pub const ERROR_INTERNAL: i32 = -32603;
}

/// Server identity reported during `initialize`
pub mod server {
    pub const NAME: &str = "simple-mcp-server";
    pub const VERSION: &str = env!("CARGO_PKG_VERSION");
}

/// MCP protocol versions understood by this server, newest first.
pub mod protocol {
    pub const V2025_06_18: &str = "2025-06-18";
    pub const V2025_03_26: &str = "2025-03-26";
    pub const V2024_11_05: &str = "2024-11-05";

    pub const SUPPORTED: &[&str] = &[V2025_06_18, V2025_03_26, V2024_11_05];
    pub const DEFAULT: &str = V2024_11_05;
}

/// Configuration Environment Variables
pub mod config {
    pub const ENV_LOG_LEVEL: &str = "LOG_LEVEL";
    pub const ENV_LOG_FORMAT: &str = "LOG_FORMAT";
    pub const ENV_PROTOCOL_VERSION: &str = "SIMPLE_MCP_PROTOCOL_VERSION";
}

/// MCP Protocol Methods
pub mod methods {
    pub const INITIALIZE: &str = "initialize";
    pub const INITIALIZED: &str = "notifications/initialized";
    pub const PING: &str = "ping";
    pub const TOOLS_LIST: &str = "tools/list";
    pub const TOOLS_CALL: &str = "tools/call";
}

/// Transport Limits
pub mod limits {
    /// Maximum allowed JSON-RPC message size (10 MB)
    pub const MAX_MESSAGE_SIZE_BYTES: u64 = 10 * 1024 * 1024;
    /// Maximum size of an LSP-style header block
    pub const MAX_HEADER_SIZE_BYTES: usize = 4096;
    /// Capacity of the reader -> server event channel
    pub const EVENT_CHANNEL_CAPACITY: usize = 32;
}
