//! MCP protocol handshake.

pub mod negotiation;
