//! Vobla - a small sub-command framework
//!
//! Programs register named commands in a registry, dispatch on the first
//! command line token and report every outcome as a [`Status`]. The crate
//! also carries the helpers its built-in commands use: a key/value
//! configuration accessor, a file handle, MD5/SHA-1 digests and a few
//! process queries.

// Public modules
pub mod cli;
pub mod command;
pub mod config;
pub mod error;
pub mod status;
pub mod sys;

// Re-export commonly used types
pub use error::{Result, VoblaError};
pub use status::Status;

/// Current version of Vobla
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
