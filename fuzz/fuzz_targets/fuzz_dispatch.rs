// Copyright 2026 BadCompany
// Licensed under the Apache License, Version 2.0

#![no_main]

use libfuzzer_sys::fuzz_target;
use simple_mcp_server::engine::Dispatcher;
use simple_mcp_server::engine_core::models::InvocationRequest;

fuzz_target!(|data: &[u8]| {
    // Any argument object must produce a result, never a crash.
    let Ok(arguments) = serde_json::from_slice::<serde_json::Value>(data) else {
        return;
    };
    for name in ["hello", "time", "calculator"] {
        let result = Dispatcher::invoke(&InvocationRequest::from_value(name, arguments.clone()));
        assert!(!result.text.is_empty());
    }
});
