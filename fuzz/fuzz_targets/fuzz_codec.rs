// Copyright 2026 BadCompany
// Licensed under the Apache License, Version 2.0

#![no_main]

use bytes::BytesMut;
use libfuzzer_sys::fuzz_target;
use simple_mcp_server::mcp::codec::McpCodec;
use tokio_util::codec::Decoder;

fuzz_target!(|data: &[u8]| {
    // No byte sequence may panic the decoder, whatever the framing.
    let mut codec = McpCodec::new();
    let mut buffer = BytesMut::from(data);

    // Drain every complete frame, then the EOF path.
    loop {
        match codec.decode(&mut buffer) {
            Ok(Some(frame)) => {
                let _ = frame.parse::<serde_json::Value>();
            }
            Ok(None) | Err(_) => break,
        }
    }
    let _ = codec.decode_eof(&mut buffer);
});
