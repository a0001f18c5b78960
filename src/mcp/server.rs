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

//! MCP stdio server.
//!
//! - `DownstreamReader` task: decodes client frames into `DownstreamEvent`s.
//! - `McpServer::serve` (main loop): handles one request at a time and
//!   writes the response in the framing the request used, until the client
//!   disconnects or the shutdown future resolves.
//!
//! Tool failures are returned inside successful `tools/call` results; only
//! malformed traffic produces JSON-RPC errors.

use std::future::Future;
use std::sync::Arc;

use anyhow::Result;
use serde_json::{json, Value};
use tokio::io::{AsyncRead, AsyncWrite};
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

use crate::config::Config;
use crate::engine::Dispatcher;
use crate::engine_core::constants::{jsonrpc, limits, methods, server};
use crate::engine_core::models::{
    CallToolResult, InitializeParams, InvocationRequest, JsonRpcRequest, JsonRpcResponse,
    ToolCallParams,
};
use crate::mcp::pipeline::{self, DownstreamEvent};
use crate::mcp::transport::ResponseWriter;
use crate::protocol::negotiation::HandshakeManager;
use crate::tools;

pub struct McpServer {
    config: Arc<Config>,
    /// Version agreed during `initialize`
    protocol_version: Option<String>,
}

impl McpServer {
    pub fn new(config: Arc<Config>) -> Self {
        Self {
            config,
            protocol_version: None,
        }
    }

    pub fn protocol_version(&self) -> Option<&str> {
        self.protocol_version.as_deref()
    }

    /// Serve over the process's stdin/stdout until EOF, Ctrl-C or SIGTERM.
    pub async fn run(&mut self) -> Result<()> {
        info!(
            "{} v{} listening on stdio",
            server::NAME,
            server::VERSION
        );
        self.serve(tokio::io::stdin(), tokio::io::stdout(), shutdown_signal())
            .await?;
        info!("Server stopped");
        Ok(())
    }

    /// Main loop over an arbitrary reader/writer pair.
    pub async fn serve<R, W, S>(&mut self, reader: R, writer: W, shutdown: S) -> Result<()>
    where
        R: AsyncRead + Unpin + Send + 'static,
        W: AsyncWrite + Unpin,
        S: Future<Output = ()>,
    {
        let (tx, mut rx) = mpsc::channel(limits::EVENT_CHANNEL_CAPACITY);
        pipeline::spawn_downstream_reader(reader, tx);

        let mut writer = ResponseWriter::new(writer);
        tokio::pin!(shutdown);

        loop {
            tokio::select! {
                event = rx.recv() => {
                    match event {
                        Some(DownstreamEvent::Request(req, framing)) => {
                            if let Some(resp) = self.handle_request(&req) {
                                writer.write_response(&resp, framing).await?;
                            }
                        }
                        Some(DownstreamEvent::Malformed { framing, error }) => {
                            warn!("Parse error: {}", error);
                            writer
                                .write_error(Value::Null, jsonrpc::ERROR_PARSE, &format!("Parse error: {error}"), framing)
                                .await?;
                        }
                        Some(DownstreamEvent::Invalid { framing, id, error }) => {
                            warn!("Invalid request: {}", error);
                            writer
                                .write_error(id, jsonrpc::ERROR_INVALID_REQUEST, &format!("Invalid request: {error}"), framing)
                                .await?;
                        }
                        Some(DownstreamEvent::Error(e)) => {
                            warn!("Downstream transport error: {}", e);
                        }
                        Some(DownstreamEvent::Disconnect) | None => {
                            info!("Client disconnected. Shutting down.");
                            break;
                        }
                    }
                }
                _ = &mut shutdown => {
                    info!("Shutdown signal received.");
                    break;
                }
            }
        }

        Ok(())
    }

    /// Handle one request; `None` for notifications.
    pub fn handle_request(&mut self, req: &JsonRpcRequest) -> Option<JsonRpcResponse> {
        debug!(method = %req.method, "Handling request");

        let Some(id) = req.id.clone() else {
            if req.method == methods::INITIALIZED {
                info!("Client initialized");
            } else {
                debug!("Ignoring notification {}", req.method);
            }
            return None;
        };

        let response = match req.method.as_str() {
            methods::INITIALIZE => self.handle_initialize(id, req.params.as_ref()),
            methods::PING => JsonRpcResponse::success(id, json!({})),
            methods::TOOLS_LIST => JsonRpcResponse::success(id, json!({ "tools": tools::list_tools() })),
            methods::TOOLS_CALL => Self::handle_tools_call(id, req.params.clone()),
            other => JsonRpcResponse::error(
                id,
                jsonrpc::ERROR_METHOD_NOT_FOUND,
                format!("Method not found: {other}"),
            ),
        };
        Some(response)
    }

    fn handle_initialize(&mut self, id: Value, params: Option<&Value>) -> JsonRpcResponse {
        let params: InitializeParams = params
            .cloned()
            .and_then(|p| serde_json::from_value(p).ok())
            .unwrap_or_default();
        if let Some(client) = &params.client_info {
            info!("Client: {}", client);
        }

        let version = HandshakeManager::negotiate(
            params.protocol_version.as_deref(),
            &self.config.protocol_version,
        );
        self.protocol_version = Some(version.clone());

        JsonRpcResponse::success(
            id,
            json!({
                "protocolVersion": version,
                "capabilities": { "tools": {} },
                "serverInfo": {
                    "name": server::NAME,
                    "version": server::VERSION
                }
            }),
        )
    }

    fn handle_tools_call(id: Value, params: Option<Value>) -> JsonRpcResponse {
        let call: ToolCallParams = match params.map(serde_json::from_value) {
            Some(Ok(call)) => call,
            Some(Err(e)) => {
                return JsonRpcResponse::error(id, jsonrpc::ERROR_INVALID_PARAMS, format!("Invalid params: {e}"))
            }
            None => {
                return JsonRpcResponse::error(id, jsonrpc::ERROR_INVALID_PARAMS, "Invalid params: missing tool name")
            }
        };

        let request = InvocationRequest::from_value(call.name, call.arguments);
        let result = CallToolResult::from(Dispatcher::invoke(&request));
        match serde_json::to_value(result) {
            Ok(value) => JsonRpcResponse::success(id, value),
            Err(e) => JsonRpcResponse::error(id, jsonrpc::ERROR_INTERNAL, e.to_string()),
        }
    }
}

/// Resolves on Ctrl-C, or SIGTERM on Unix.
pub async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            warn!("Failed to listen for Ctrl+C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        use tokio::signal::unix::{signal, SignalKind};
        match signal(SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                warn!("Failed to listen for SIGTERM: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {}
        _ = terminate => {}
    }
}
