// Copyright 2026 BadCompany
// Licensed under the Apache License, Version 2.0

#![no_main]

use libfuzzer_sys::fuzz_target;
use simple_mcp_server::engine_core::models::{
    InitializeParams, JsonRpcRequest, JsonRpcResponse, ToolCallParams,
};

fuzz_target!(|data: &[u8]| {
    // Typed request shapes must reject odd JSON without crashing.
    let _ = serde_json::from_slice::<JsonRpcRequest>(data);
    let _ = serde_json::from_slice::<JsonRpcResponse>(data);
    let _ = serde_json::from_slice::<ToolCallParams>(data);
    let _ = serde_json::from_slice::<InitializeParams>(data);
});
