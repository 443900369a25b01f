//! Sub-command framework
//!
//! A host program registers named [`Command`]s in a [`CommandRegistry`],
//! looks one up by the first command line token, and hands it the remaining
//! arguments. Every step reports through [`Status`](crate::Status).
//!
//! - `command.rs` - the `Command` trait and `CommandInfo`
//! - `registry.rs` - ownership and lookup of named commands
//! - `help.rs` - the built-in `help` command
//! - `context.rs` - output streams and verbosity passed to `run`

pub mod command;
pub mod context;
pub mod help;
pub mod registry;

// Re-export main types
pub use command::*;
pub use context::*;
pub use help::*;
pub use registry::*;
