//! Core types shared by the tools, the dispatcher and the transport.

pub mod constants;
pub mod errors;
pub mod models;
pub mod params;
