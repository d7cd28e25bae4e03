//! Tool, resource and prompt handlers
//!
//! Every handler is a plain function of its arguments (and, for the clock-based
//! ones, the current time). None of them keep state between calls.

pub mod prompts;
pub mod resources;
pub mod tools;
pub mod utils;
