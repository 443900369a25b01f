//! Configuration access and loading
//!
//! This module defines the `Configuration` accessor trait and loads
//! vobla.yml files into an in-memory implementation of it.

pub mod parse;
pub mod types;

// Re-export main types
pub use parse::*;
pub use types::*;
