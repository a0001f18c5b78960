//! Tool execution engine.
//!
//! This module contains the dispatcher that validates invocations and
//! routes them to the registered tools.

pub mod dispatcher;

pub use dispatcher::Dispatcher;
