//! MCP transport and server loop.
//!
//! This module contains the wire codec, the downstream reader task, the
//! response writer and the stdio server that ties them to the dispatcher.

pub mod codec;
pub mod pipeline;
pub mod server;
pub mod transport;
