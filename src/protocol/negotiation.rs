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

//! Protocol version negotiation.
//!
//! The client proposes a version in `initialize`. A version this server
//! understands is echoed back; anything else gets the configured default,
//! and the client decides whether it can continue.

use tracing::info;

use crate::engine_core::constants::protocol;

pub struct HandshakeManager;

impl HandshakeManager {
    pub fn is_supported(version: &str) -> bool {
        protocol::SUPPORTED.contains(&version)
    }

    /// Pick the version to answer `initialize` with.
    pub fn negotiate(client_version: Option<&str>, preferred: &str) -> String {
        match client_version {
            Some(v) if Self::is_supported(v) => {
                info!("Negotiated protocol version {}", v);
                v.to_string()
            }
            Some(v) => {
                info!(
                    "Unknown protocol version '{}', answering with {}",
                    v, preferred
                );
                preferred.to_string()
            }
            None => preferred.to_string(),
        }
    }
}
