//! CLI interface
//!
//! This module parses the global flags, builds the command registry and
//! dispatches to the requested command.

pub mod app;
pub mod commands;

// Re-export main types
pub use app::*;
