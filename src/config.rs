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

use crate::engine_core::constants::{config, protocol};
use crate::engine_core::errors::ServerError;
use crate::protocol::negotiation::HandshakeManager;
use serde::{Deserialize, Serialize};
use std::env;
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Text,
    Json,
}

impl FromStr for LogFormat {
    type Err = ServerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "text" => Ok(LogFormat::Text),
            "json" => Ok(LogFormat::Json),
            other => Err(ServerError::ConfigurationError(format!(
                "Unsupported log format '{}' (expected text or json)",
                other
            ))),
        }
    }
}

impl fmt::Display for LogFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LogFormat::Text => f.write_str("text"),
            LogFormat::Json => f.write_str("json"),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub log_level: String,
    pub log_format: LogFormat,
    /// Answered when the client asks for a version we do not speak
    pub protocol_version: String,
}

impl Config {
    pub fn from_env() -> Result<Self, ServerError> {
        let mut cfg = Self::default();
        if let Ok(level) = env::var(config::ENV_LOG_LEVEL) {
            cfg.log_level = level;
        }
        if let Ok(format) = env::var(config::ENV_LOG_FORMAT) {
            cfg.log_format = format.parse()?;
        }
        if let Ok(version) = env::var(config::ENV_PROTOCOL_VERSION) {
            cfg.set_protocol_version(version)?;
        }
        Ok(cfg)
    }

    pub fn set_protocol_version(&mut self, version: impl Into<String>) -> Result<(), ServerError> {
        let version = version.into();
        if !HandshakeManager::is_supported(&version) {
            return Err(ServerError::ConfigurationError(format!(
                "Unsupported protocol version '{}' (supported: {})",
                version,
                protocol::SUPPORTED.join(", ")
            )));
        }
        self.protocol_version = version;
        Ok(())
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            log_format: LogFormat::Text,
            protocol_version: protocol::DEFAULT.to_string(),
        }
    }
}
