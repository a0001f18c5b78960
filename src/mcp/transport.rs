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

//! JSON-RPC 2.0 transport for MCP.
//!
//! `ResponseWriter` frames and writes responses to the client, using the
//! framing of the request being answered.

use anyhow::{Context, Result};
use futures_util::SinkExt;
use serde_json::Value;
use tokio::io::AsyncWrite;
use tokio_util::codec::FramedWrite;
use tracing::debug;

use crate::engine_core::models::JsonRpcResponse;
use crate::mcp::codec::{Framing, McpCodec};

pub struct ResponseWriter<W> {
    framed: FramedWrite<W, McpCodec>,
}

impl<W> ResponseWriter<W>
where
    W: AsyncWrite + Unpin,
{
    pub fn new(writer: W) -> Self {
        Self {
            framed: FramedWrite::new(writer, McpCodec::new()),
        }
    }

    /// Write a JSON-RPC response and flush.
    pub async fn write_response(&mut self, response: &JsonRpcResponse, framing: Framing) -> Result<()> {
        debug!(id = %response.id, "Sending response");
        self.framed.encoder_mut().set_framing(framing);
        self.framed
            .send(response)
            .await
            .context("Failed to write response")?;
        Ok(())
    }

    /// Write a generic error response.
    pub async fn write_error(
        &mut self,
        id: Value,
        code: i32,
        message: &str,
        framing: Framing,
    ) -> Result<()> {
        let response = JsonRpcResponse::error(id, code, message);
        self.write_response(&response, framing).await
    }

    pub fn into_inner(self) -> W {
        self.framed.into_inner()
    }
}
