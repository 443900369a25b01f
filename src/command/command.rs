//! Command trait and shared command metadata

use crate::command::Context;
use crate::status::Status;
use std::io::Write;

/// Metadata every command carries
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommandInfo {
    /// Name of the invoking binary, assigned by the host before dispatch
    pub program: String,

    /// One-line invocation synopsis
    pub usage: String,

    /// Longer help text
    pub description: String,
}

impl CommandInfo {
    pub fn new(usage: impl Into<String>, description: impl Into<String>) -> Self {
        CommandInfo {
            program: String::new(),
            usage: usage.into(),
            description: description.into(),
        }
    }
}

/// A named unit of command line work.
///
/// The host calls `parse_args` with the arguments that follow the command
/// token, then `run` if parsing succeeded. Neither call may terminate the
/// process; failures are reported through the returned [`Status`].
pub trait Command {
    fn info(&self) -> &CommandInfo;

    fn info_mut(&mut self) -> &mut CommandInfo;

    /// Consume command specific flags and positional arguments
    fn parse_args(&mut self, args: &[String]) -> Status;

    /// Execute the command after a successful `parse_args`
    fn run(&mut self, ctx: &mut Context) -> Status;

    /// Write the usage line and the description, skipping empty parts.
    /// Write errors are ignored.
    fn print_help(&self, out: &mut dyn Write) {
        let usage = self.usage();
        if !usage.is_empty() {
            let _ = writeln!(out, "Usage: {}", usage);
        }
        let description = self.description();
        if !description.is_empty() {
            let _ = writeln!(out, "{}", description);
        }
    }

    fn usage(&self) -> &str {
        &self.info().usage
    }

    fn description(&self) -> &str {
        &self.info().description
    }

    fn program(&self) -> &str {
        &self.info().program
    }

    fn set_program(&mut self, program: &str) {
        self.info_mut().program = program.to_string();
    }
}
