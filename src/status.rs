//! Success/failure value returned across the command boundary
//!
//! A `Status` is a `(code, message)` pair. Code 0 means success; OS failures
//! carry the negated errno so they can be told apart from plain failure codes.

use crate::error::VoblaError;
use std::fmt;
use std::io;
use std::mem;

/// Outcome of a fallible command operation
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct Status {
    code: i32,
    message: String,
}

impl Status {
    /// The canonical success value (code 0, empty message)
    pub const fn ok() -> Self {
        Status {
            code: 0,
            message: String::new(),
        }
    }

    /// Create a status with an explicit code and message
    pub fn new(code: i32, message: impl Into<String>) -> Self {
        Status {
            code,
            message: message.into(),
        }
    }

    /// Describe an OS error number: code is `-errno`, message is the platform text.
    ///
    /// errno 0 is not an error and yields `Status::ok()`.
    pub fn from_system_error(errno: i32) -> Self {
        if errno == 0 {
            return Status::ok();
        }
        let text = io::Error::from_raw_os_error(errno).to_string();
        let suffix = format!(" (os error {})", errno);
        let message = text.strip_suffix(&suffix).unwrap_or(&text).to_string();
        Status {
            code: errno.wrapping_neg(),
            message,
        }
    }

    /// True iff the code is 0
    pub fn is_ok(&self) -> bool {
        self.code == 0
    }

    pub fn code(&self) -> i32 {
        self.code
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    /// Overwrite both fields at once
    pub fn set(&mut self, code: i32, message: impl Into<String>) {
        self.code = code;
        self.message = message.into();
    }

    pub fn set_code(&mut self, code: i32) {
        self.code = code;
    }

    pub fn set_message(&mut self, message: impl Into<String>) {
        self.message = message.into();
    }

    /// Move the value out, leaving `Status::ok()` behind
    pub fn take(&mut self) -> Status {
        mem::take(self)
    }

    /// Convert a failure into an error so it can travel through `?`
    pub fn into_result(self) -> crate::Result<()> {
        if self.is_ok() {
            Ok(())
        } else {
            Err(VoblaError::Status(self))
        }
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_ok() {
            write!(f, "OK")
        } else {
            write!(f, "{} (code {})", self.message, self.code)
        }
    }
}

impl From<io::Error> for Status {
    fn from(err: io::Error) -> Self {
        match err.raw_os_error() {
            Some(errno) => Status::from_system_error(errno),
            None => Status::new(-1, err.to_string()),
        }
    }
}

impl<E: Into<Status>> From<std::result::Result<(), E>> for Status {
    fn from(result: std::result::Result<(), E>) -> Self {
        match result {
            Ok(()) => Status::ok(),
            Err(e) => e.into(),
        }
    }
}
