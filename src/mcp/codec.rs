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

//! MCP Transport Codec.
//!
//! Handles the low-level framing of JSON-RPC messages.
//! Supports both newline-delimited JSON (the MCP stdio default) and LSP-style
//! Content-Length headers. The framing is detected per message: a frame
//! whose first line starts like an HTTP header (`Name:`) is read as a header
//! block, anything else as a line. Undecodable lines are handed up as
//! frames so the server can answer them with a parse error.

use crate::engine_core::constants::limits;
use crate::engine_core::models::{JsonRpcRequest, JsonRpcResponse};
use anyhow::{anyhow, Context, Result};
use bytes::BytesMut;
use serde::de::DeserializeOwned;
use serde::Serialize;
use tokio_util::codec::{Decoder, Encoder};
use tracing::{debug, trace};

/// How message boundaries are marked on the pipe
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Framing {
    /// One JSON document per line
    #[default]
    Line,
    /// `Content-Length: N` header block, blank line, N-byte body
    ContentLength,
}

/// One undecoded message body together with the framing it arrived in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frame {
    pub framing: Framing,
    pub body: BytesMut,
}

impl Frame {
    pub fn parse<T: DeserializeOwned>(&self) -> serde_json::Result<T> {
        serde_json::from_slice(&self.body)
    }
}

// State machine for LSP-style headers
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum DecodeState {
    Head,
    Body(usize),
}

pub struct McpCodec {
    state: DecodeState,
    /// Framing used by the encoder
    framing: Framing,
}

impl McpCodec {
    #[must_use]
    pub fn new() -> Self {
        Self::with_framing(Framing::Line)
    }

    #[must_use]
    pub fn with_framing(framing: Framing) -> Self {
        Self {
            state: DecodeState::Head,
            framing,
        }
    }

    pub fn set_framing(&mut self, framing: Framing) {
        self.framing = framing;
    }

    pub fn framing(&self) -> Framing {
        self.framing
    }

    fn encode_value<T: Serialize>(&self, item: &T, dst: &mut BytesMut) -> Result<()> {
        let body = serde_json::to_vec(item).context("Failed to serialize message")?;
        match self.framing {
            Framing::Line => {
                dst.reserve(body.len() + 1);
                dst.extend_from_slice(&body);
                dst.extend_from_slice(b"\n");
            }
            Framing::ContentLength => {
                let header = format!("Content-Length: {}\r\n\r\n", body.len());
                dst.reserve(header.len() + body.len());
                dst.extend_from_slice(header.as_bytes());
                dst.extend_from_slice(&body);
            }
        }
        Ok(())
    }
}

impl Default for McpCodec {
    fn default() -> Self {
        Self::new()
    }
}

fn skip_blank(src: &mut BytesMut) {
    let blank = src
        .iter()
        .take_while(|b| b.is_ascii_whitespace())
        .count();
    let _ = src.split_to(blank);
}

fn starts_json(src: &[u8]) -> bool {
    matches!(src.first(), Some(b'{') | Some(b'['))
}

fn is_token(b: &u8) -> bool {
    b.is_ascii_alphanumeric() || *b == b'-'
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Head {
    Header,
    Line,
    /// Partial first line that could still become a header name
    Undecided,
}

fn classify(src: &[u8]) -> Head {
    if starts_json(src) {
        return Head::Line;
    }
    let newline = src.iter().position(|b| *b == b'\n');
    let first = &src[..newline.unwrap_or(src.len())];
    match first.iter().position(|b| *b == b':') {
        Some(colon) if colon > 0 && first[..colon].iter().all(is_token) => Head::Header,
        Some(_) => Head::Line,
        None if newline.is_none()
            && first.iter().all(is_token)
            && first.len() <= limits::MAX_HEADER_SIZE_BYTES =>
        {
            Head::Undecided
        }
        None => Head::Line,
    }
}

fn decode_line(src: &mut BytesMut) -> Result<Option<Frame>> {
    match src.iter().position(|b| *b == b'\n') {
        Some(i) => {
            let mut line = src.split_to(i + 1);
            line.truncate(i);
            if line.last() == Some(&b'\r') {
                line.truncate(i - 1);
            }
            Ok(Some(Frame {
                framing: Framing::Line,
                body: line,
            }))
        }
        None => {
            if src.len() as u64 > limits::MAX_MESSAGE_SIZE_BYTES {
                return Err(anyhow!("Message exceeded size limit of {} bytes", limits::MAX_MESSAGE_SIZE_BYTES));
            }
            Ok(None)
        }
    }
}

/// Index just past the `\r\n\r\n` or `\n\n` terminating a header block.
fn header_end(src: &[u8]) -> Option<usize> {
    let mut i = 0;
    while i < src.len() {
        if src[i] == b'\n' {
            if i >= 1 && src[i - 1] == b'\n' {
                return Some(i + 1);
            }
            if i >= 3 && src[i - 1] == b'\r' && src[i - 2] == b'\n' && src[i - 3] == b'\r' {
                return Some(i + 1);
            }
        }
        i += 1;
    }
    None
}

fn content_length(headers: &str) -> Result<usize> {
    let mut len = None;
    for line in headers.lines() {
        if let Some((name, value)) = line.split_once(':') {
            if name.trim().eq_ignore_ascii_case("content-length") {
                let parsed = value
                    .trim()
                    .parse::<usize>()
                    .context("Invalid content-length value")?;
                debug!("Found Content-Length: {}", parsed);
                len = Some(parsed);
            }
        }
    }
    match len {
        Some(0) | None => Err(anyhow!("Missing or invalid Content-Length header")),
        Some(n) => Ok(n),
    }
}

impl Decoder for McpCodec {
    type Item = Frame;
    type Error = anyhow::Error;

    fn decode(&mut self, src: &mut BytesMut) -> Result<Option<Self::Item>> {
        trace!("Decoder attempting to read from {} bytes buffer", src.len());
        loop {
            match self.state {
                DecodeState::Head => {
                    skip_blank(src);
                    if src.is_empty() {
                        return Ok(None);
                    }

                    match classify(src) {
                        Head::Line => return decode_line(src),
                        Head::Undecided => return Ok(None),
                        Head::Header => {}
                    }

                    let Some(end) = header_end(src) else {
                        if src.len() > limits::MAX_HEADER_SIZE_BYTES {
                            return Err(anyhow!("Header too large"));
                        }
                        return Ok(None);
                    };

                    let header_bytes = src.split_to(end);
                    let header_str =
                        std::str::from_utf8(&header_bytes).context("Invalid UTF-8 in headers")?;
                    let len = content_length(header_str)?;

                    if len as u64 > limits::MAX_MESSAGE_SIZE_BYTES {
                        return Err(anyhow!("Message length {} exceeds max limit", len));
                    }

                    self.state = DecodeState::Body(len);
                }
                DecodeState::Body(len) => {
                    if src.len() < len {
                        src.reserve(len - src.len());
                        return Ok(None);
                    }
                    let body = src.split_to(len);
                    self.state = DecodeState::Head;
                    return Ok(Some(Frame {
                        framing: Framing::ContentLength,
                        body,
                    }));
                }
            }
        }
    }

    fn decode_eof(&mut self, src: &mut BytesMut) -> Result<Option<Self::Item>> {
        if let Some(frame) = self.decode(src)? {
            return Ok(Some(frame));
        }
        if src.is_empty() {
            return Ok(None);
        }
        // Whatever is left of a line (or an unfinished header) is handed up
        // as a final line; parsing it decides whether it was a message.
        if self.state == DecodeState::Head {
            let body = src.split_to(src.len());
            return Ok(Some(Frame {
                framing: Framing::Line,
                body,
            }));
        }
        Err(anyhow!("{} bytes remaining on stream at EOF", src.len()))
    }
}

// Unified Encoder for both Request and Response
impl<'a> Encoder<&'a JsonRpcRequest> for McpCodec {
    type Error = anyhow::Error;
    fn encode(&mut self, item: &'a JsonRpcRequest, dst: &mut BytesMut) -> Result<()> {
        self.encode_value(item, dst)
    }
}

impl<'a> Encoder<&'a JsonRpcResponse> for McpCodec {
    type Error = anyhow::Error;
    fn encode(&mut self, item: &'a JsonRpcResponse, dst: &mut BytesMut) -> Result<()> {
        self.encode_value(item, dst)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{json, Value};

    fn decode_all(codec: &mut McpCodec, data: &[u8]) -> Vec<Frame> {
        let mut src = BytesMut::from(data);
        let mut frames = Vec::new();
        while let Some(frame) = codec.decode(&mut src).unwrap() {
            frames.push(frame);
        }
        frames
    }

    #[test]
    fn test_line_framing() {
        let mut codec = McpCodec::new();
        let frames = decode_all(
            &mut codec,
            b"{\"jsonrpc\":\"2.0\",\"method\":\"ping\",\"id\":1}\r\n\n{\"a\":2}\n",
        );
        assert_eq!(frames.len(), 2);
        assert!(frames.iter().all(|f| f.framing == Framing::Line));
        let v: Value = frames[1].parse().unwrap();
        assert_eq!(v, json!({"a": 2}));
    }

    #[test]
    fn test_partial_line_waits() {
        let mut codec = McpCodec::new();
        let mut src = BytesMut::from(&b"{\"a\":"[..]);
        assert!(codec.decode(&mut src).unwrap().is_none());
        src.extend_from_slice(b"1}\n");
        assert!(codec.decode(&mut src).unwrap().is_some());
    }

    #[test]
    fn test_content_length_framing() {
        let body = br#"{"jsonrpc":"2.0","method":"ping","id":1}"#;
        let mut data = format!("Content-Length: {}\r\n\r\n", body.len()).into_bytes();
        data.extend_from_slice(body);
        data.extend_from_slice(b"{\"line\":true}\n");

        let mut codec = McpCodec::new();
        let frames = decode_all(&mut codec, &data);
        assert_eq!(frames.len(), 2);
        assert_eq!(frames[0].framing, Framing::ContentLength);
        assert_eq!(&frames[0].body[..], &body[..]);
        assert_eq!(frames[1].framing, Framing::Line);
    }

    #[test]
    fn test_content_length_split_body() {
        let mut codec = McpCodec::new();
        let mut src = BytesMut::from(&b"content-length: 7\n\n{\"a\""[..]);
        assert!(codec.decode(&mut src).unwrap().is_none());
        src.extend_from_slice(b":1}");
        let frame = codec.decode(&mut src).unwrap().unwrap();
        assert_eq!(&frame.body[..], b"{\"a\":1}");
    }

    #[test]
    fn test_missing_content_length() {
        let mut codec = McpCodec::new();
        let mut src = BytesMut::from(&b"X-Other: 1\r\n\r\n{}"[..]);
        assert!(codec.decode(&mut src).is_err());
    }

    #[test]
    fn test_header_too_large() {
        let mut codec = McpCodec::new();
        let mut data = b"X-Pad: ".to_vec();
        data.extend(vec![b'A'; limits::MAX_HEADER_SIZE_BYTES]);
        let mut src = BytesMut::from(data.as_slice());
        assert!(codec.decode(&mut src).is_err());
    }

    #[test]
    fn test_garbage_line_is_a_frame() {
        let mut codec = McpCodec::new();
        let frames = decode_all(&mut codec, b"this is not json\n");
        assert_eq!(frames.len(), 1);
        assert_eq!(frames[0].framing, Framing::Line);
        assert!(frames[0].parse::<Value>().is_err());
    }

    #[test]
    fn test_partial_header_name_waits() {
        let mut codec = McpCodec::new();
        let mut src = BytesMut::from(&b"Content-Len"[..]);
        assert!(codec.decode(&mut src).unwrap().is_none());
        src.extend_from_slice(b"gth: 2\r\n\r\n{}");
        let frame = codec.decode(&mut src).unwrap().unwrap();
        assert_eq!(frame.framing, Framing::ContentLength);
    }

    #[test]
    fn test_eof_with_garbage() {
        let mut codec = McpCodec::new();
        let mut src = BytesMut::from(&b"garbage"[..]);
        let frame = codec.decode_eof(&mut src).unwrap().unwrap();
        assert_eq!(frame.framing, Framing::Line);
    }

    #[test]
    fn test_eof_without_newline() {
        let mut codec = McpCodec::new();
        let mut src = BytesMut::from(&b"{\"id\":3}"[..]);
        let frame = codec.decode_eof(&mut src).unwrap().unwrap();
        assert_eq!(&frame.body[..], b"{\"id\":3}");
        assert!(codec.decode_eof(&mut src).unwrap().is_none());
    }

    #[test]
    fn test_encode_both_framings() {
        let resp = JsonRpcResponse::success(json!(1), json!({}));

        let mut codec = McpCodec::new();
        let mut dst = BytesMut::new();
        codec.encode(&resp, &mut dst).unwrap();
        assert!(dst.ends_with(b"\n"));
        assert!(!dst.starts_with(b"Content-Length"));

        codec.set_framing(Framing::ContentLength);
        let mut dst = BytesMut::new();
        codec.encode(&resp, &mut dst).unwrap();
        assert!(dst.starts_with(b"Content-Length: "));
        let mut decoder = McpCodec::new();
        let frame = decoder.decode(&mut dst).unwrap().unwrap();
        assert_eq!(frame.framing, Framing::ContentLength);
    }
}
