//! Small helpers used by the tools.

pub mod number;
pub mod time;
pub mod value;
