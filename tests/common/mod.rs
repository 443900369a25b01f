//! Common test utilities

#![allow(dead_code)]

use std::cell::Cell;
use std::fs;
use std::path::PathBuf;
use std::rc::Rc;
use tempfile::TempDir;
use vobla::command::{Command, CommandInfo, Context};
use vobla::Status;

/// Create a temporary directory with a vobla.yml file
pub fn create_test_config(content: &str) -> (TempDir, PathBuf) {
    let temp_dir = TempDir::new().unwrap();
    let config_path = temp_dir.path().join("vobla.yml");
    fs::write(&config_path, content).unwrap();
    (temp_dir, config_path)
}

/// Owned argument vector from string literals
pub fn args(values: &[&str]) -> Vec<String> {
    values.iter().map(|s| s.to_string()).collect()
}

/// Command that counts its runs and remembers the arguments it was given
pub struct RecordingCommand {
    info: CommandInfo,
    pub received: Vec<String>,
    pub runs: Rc<Cell<usize>>,
}

impl RecordingCommand {
    pub fn new(usage: &str, description: &str) -> Self {
        RecordingCommand {
            info: CommandInfo::new(usage, description),
            received: Vec::new(),
            runs: Rc::new(Cell::new(0)),
        }
    }
}

impl Default for RecordingCommand {
    fn default() -> Self {
        RecordingCommand::new("", "")
    }
}

impl Command for RecordingCommand {
    fn info(&self) -> &CommandInfo {
        &self.info
    }

    fn info_mut(&mut self) -> &mut CommandInfo {
        &mut self.info
    }

    fn parse_args(&mut self, args: &[String]) -> Status {
        if args.iter().any(|a| a == "--fail") {
            return Status::new(-22, "unknown flag --fail");
        }
        self.received = args.to_vec();
        Status::ok()
    }

    fn run(&mut self, _ctx: &mut Context) -> Status {
        self.runs.set(self.runs.get() + 1);
        Status::ok()
    }
}
