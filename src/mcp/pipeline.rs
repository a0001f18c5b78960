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

//! Downstream reader task.
//!
//! Decodes frames from the client pipe and forwards them to the server loop
//! as typed events over an `mpsc` channel.

use futures_util::StreamExt;
use serde_json::Value;
use tokio::io::AsyncRead;
use tokio::sync::mpsc;
use tokio_util::codec::FramedRead;
use tracing::{debug, error};

use crate::engine_core::models::JsonRpcRequest;
use crate::mcp::codec::{Frame, Framing, McpCodec};

/// Messages arriving from the Downstream Client
#[derive(Debug)]
pub enum DownstreamEvent {
    Request(JsonRpcRequest, Framing),
    /// Body was not valid JSON
    Malformed { framing: Framing, error: String },
    /// Valid JSON, but not a JSON-RPC request object
    Invalid {
        framing: Framing,
        id: Value,
        error: String,
    },
    /// Unrecoverable framing error; the reader stops after sending it
    Error(String),
    /// Client disconnected (EOF)
    Disconnect,
}

impl DownstreamEvent {
    fn from_frame(frame: Frame) -> Self {
        let framing = frame.framing;
        let value: Value = match frame.parse() {
            Ok(v) => v,
            Err(e) => {
                return DownstreamEvent::Malformed {
                    framing,
                    error: e.to_string(),
                }
            }
        };

        let id = value.get("id").cloned().unwrap_or(Value::Null);
        match serde_json::from_value::<JsonRpcRequest>(value) {
            Ok(req) => DownstreamEvent::Request(req, framing),
            Err(e) => DownstreamEvent::Invalid {
                framing,
                id,
                error: e.to_string(),
            },
        }
    }
}

/// Spawns a background task reading client messages from `stream`.
pub fn spawn_downstream_reader<R>(stream: R, tx: mpsc::Sender<DownstreamEvent>)
where
    R: AsyncRead + Unpin + Send + 'static,
{
    tokio::spawn(async move {
        let mut framed = FramedRead::new(stream, McpCodec::new());

        while let Some(result) = framed.next().await {
            match result {
                Ok(frame) => {
                    debug!("Received {} byte frame ({:?})", frame.body.len(), frame.framing);
                    if tx.send(DownstreamEvent::from_frame(frame)).await.is_err() {
                        // Server loop is gone
                        return;
                    }
                }
                Err(e) => {
                    error!("Framing error: {}", e);
                    let _ = tx.send(DownstreamEvent::Error(e.to_string())).await;
                    break;
                }
            }
        }
        let _ = tx.send(DownstreamEvent::Disconnect).await;
    });
}
