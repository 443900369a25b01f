//! Execution context for running commands
//!
//! The context owns the output streams a command writes to and the
//! verbosity level used for diagnostic lines.

use colored::Colorize;
use std::cell::RefCell;
use std::io::{self, Write};
use std::rc::Rc;

/// Verbosity levels for output
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Verbosity {
    Silent = 0,
    Quiet = 1,
    Normal = 2,
    Verbose = 3,
}

impl Verbosity {
    /// Parse a verbosity name as used in configuration files
    pub fn from_name(name: &str) -> Option<Self> {
        match name.trim().to_lowercase().as_str() {
            "silent" => Some(Verbosity::Silent),
            "quiet" => Some(Verbosity::Quiet),
            "normal" => Some(Verbosity::Normal),
            "verbose" | "debug" => Some(Verbosity::Verbose),
            _ => None,
        }
    }
}

/// Execution context handed to `Command::run`
pub struct Context {
    /// Name of the invoking program
    pub program: String,

    /// Verbosity level
    pub verbosity: Verbosity,

    out: Box<dyn Write>,
    err: Box<dyn Write>,
}

impl Context {
    /// Create a context writing to the process' stdout and stderr
    pub fn new(program: impl Into<String>) -> Self {
        Context {
            program: program.into(),
            verbosity: Verbosity::Normal,
            out: Box::new(io::stdout()),
            err: Box::new(io::stderr()),
        }
    }

    /// Create a context whose streams are captured in memory
    pub fn captured(program: impl Into<String>) -> (Self, Capture, Capture) {
        let out = Capture::default();
        let err = Capture::default();
        let ctx = Context::new(program).with_streams(Box::new(out.clone()), Box::new(err.clone()));
        (ctx, out, err)
    }

    /// Replace the output and error streams
    pub fn with_streams(mut self, out: Box<dyn Write>, err: Box<dyn Write>) -> Self {
        self.out = out;
        self.err = err;
        self
    }

    /// Set verbosity level
    pub fn with_verbosity(mut self, verbosity: Verbosity) -> Self {
        self.verbosity = verbosity;
        self
    }

    /// Standard (help) output stream
    pub fn out(&mut self) -> &mut dyn Write {
        self.out.as_mut()
    }

    /// Error/diagnostic output stream
    pub fn err(&mut self) -> &mut dyn Write {
        self.err.as_mut()
    }

    /// Print info message
    pub fn print_info(&mut self, message: &str) {
        if self.verbosity >= Verbosity::Normal {
            let _ = writeln!(self.err, "{} {}", "[INFO]".green(), message);
        }
    }

    /// Print warning message
    pub fn print_warn(&mut self, message: &str) {
        if self.verbosity >= Verbosity::Quiet {
            let _ = writeln!(self.err, "{} {}", "[WARN]".yellow(), message);
        }
    }

    /// Print error message
    pub fn print_error(&mut self, message: &str) {
        if self.verbosity >= Verbosity::Quiet {
            let _ = writeln!(self.err, "{} {}", "[ERROR]".red(), message);
        }
    }

    /// Print debug message (only in verbose mode)
    pub fn print_debug(&mut self, message: &str) {
        if self.verbosity >= Verbosity::Verbose {
            let _ = writeln!(self.err, "{} {}", "[DEBUG]".dimmed(), message);
        }
    }
}

/// In-memory sink shared between a `Context` and the code inspecting it
#[derive(Debug, Clone, Default)]
pub struct Capture(Rc<RefCell<Vec<u8>>>);

impl Capture {
    /// Everything written so far, lossily decoded
    pub fn contents(&self) -> String {
        String::from_utf8_lossy(&self.0.borrow()).into_owned()
    }

    pub fn is_empty(&self) -> bool {
        self.0.borrow().is_empty()
    }
}

impl Write for Capture {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.borrow_mut().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}
