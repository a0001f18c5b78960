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

// Main entry point for the Simple MCP Server
use std::process::ExitCode;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use clap::Parser;
use serde_json::{json, Value};
use tracing::info;

use simple_mcp_server::config::{Config, LogFormat};
use simple_mcp_server::engine::Dispatcher;
use simple_mcp_server::engine_core::models::{CallToolResult, InvocationRequest};
use simple_mcp_server::mcp::server::McpServer;
use simple_mcp_server::tools;

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Cli {
    /// Log filter (overrides LOG_LEVEL; RUST_LOG wins over both)
    #[arg(long)]
    log_level: Option<String>,

    /// Log output format: text or json
    #[arg(long)]
    log_format: Option<LogFormat>,

    /// Protocol version answered to clients with an unsupported version
    #[arg(long)]
    protocol_version: Option<String>,

    /// Print the tool catalog as JSON and exit
    #[arg(long, conflicts_with = "invoke")]
    list_tools: bool,

    /// Invoke a single tool, print its result as JSON and exit
    #[arg(long, value_name = "NAME")]
    invoke: Option<String>,

    /// Tool arguments as a JSON object (with --invoke)
    #[arg(long, value_name = "JSON", requires = "invoke")]
    args: Option<String>,
}

fn main() -> anyhow::Result<ExitCode> {
    let cli = Cli::parse();

    install_panic_hook();

    let mut config = Config::from_env()?;
    if let Some(level) = cli.log_level {
        config.log_level = level;
    }
    if let Some(format) = cli.log_format {
        config.log_format = format;
    }
    if let Some(version) = cli.protocol_version {
        config.set_protocol_version(version)?;
    }

    init_tracing(&config);

    if cli.list_tools {
        let catalog = json!({ "tools": tools::list_tools() });
        println!("{}", serde_json::to_string_pretty(&catalog)?);
        return Ok(ExitCode::SUCCESS);
    }

    if let Some(name) = cli.invoke {
        let arguments: Value = match cli.args {
            Some(raw) => serde_json::from_str(&raw).context("--args must be valid JSON")?,
            None => json!({}),
        };
        let result = CallToolResult::from(Dispatcher::invoke(&InvocationRequest::from_value(
            name, arguments,
        )));
        println!("{}", serde_json::to_string(&result)?);
        return Ok(if result.is_error {
            ExitCode::FAILURE
        } else {
            ExitCode::SUCCESS
        });
    }

    info!(
        protocol_version = %config.protocol_version,
        "Starting Simple MCP Server"
    );
    let runtime = tokio::runtime::Runtime::new()?;
    let mut server = McpServer::new(Arc::new(config));
    let outcome = runtime.block_on(server.run());
    // The stdin reader may still be parked in a blocking read after a signal
    runtime.shutdown_timeout(Duration::from_millis(100));
    outcome?;

    Ok(ExitCode::SUCCESS)
}

fn install_panic_hook() {
    std::panic::set_hook(Box::new(|panic_info| {
        let location = panic_info
            .location()
            .map(|l| format!("{}:{}:{}", l.file(), l.line(), l.column()))
            .unwrap_or_else(|| "unknown".to_string());

        let message = if let Some(s) = panic_info.payload().downcast_ref::<&str>() {
            s.to_string()
        } else if let Some(s) = panic_info.payload().downcast_ref::<String>() {
            s.clone()
        } else {
            "Unknown panic".to_string()
        };

        eprintln!("PANIC: {} at {}", message, location);
    }));
}

fn init_tracing(config: &Config) {
    use tracing_subscriber::fmt;
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.log_level))
        .unwrap_or_else(|_| EnvFilter::new("info"));

    // stdout carries the protocol
    let subscriber = fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_ids(false)
        .with_writer(std::io::stderr);

    match config.log_format {
        LogFormat::Json => subscriber.json().init(),
        LogFormat::Text => subscriber.init(),
    }
}
