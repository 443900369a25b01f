//! File handle that reports failures as `Status`

use crate::status::Status;
use std::fs::{File, OpenOptions};
use std::path::Path;

#[cfg(unix)]
use std::os::unix::io::{AsRawFd, RawFd};

/// An optionally open file.
///
/// Failures to open carry the OS errno through [`Status::from_system_error`].
#[derive(Debug, Default)]
pub struct FileHandle {
    file: Option<File>,
}

impl FileHandle {
    pub fn new() -> Self {
        Self::default()
    }

    /// Open `path` read-only
    pub fn open_read(path: impl AsRef<Path>) -> Result<Self, Status> {
        Self::open_with(path, OpenOptions::new().read(true))
    }

    /// Create (or truncate) `path` for writing
    pub fn create(path: impl AsRef<Path>) -> Result<Self, Status> {
        Self::open_with(path, OpenOptions::new().write(true).create(true).truncate(true))
    }

    /// Open `path` with the given options
    pub fn open_with(path: impl AsRef<Path>, options: &OpenOptions) -> Result<Self, Status> {
        let mut handle = FileHandle::new();
        let status = handle.open(path, options);
        if status.is_ok() {
            Ok(handle)
        } else {
            Err(status)
        }
    }

    /// Open `path`, closing any file held before
    pub fn open(&mut self, path: impl AsRef<Path>, options: &OpenOptions) -> Status {
        self.close();
        match options.open(path) {
            Ok(file) => {
                self.file = Some(file);
                Status::ok()
            }
            Err(e) => Status::from(e),
        }
    }

    /// Close the file. Closing a closed handle is a no-op.
    pub fn close(&mut self) -> Status {
        self.file = None;
        Status::ok()
    }

    pub fn is_open(&self) -> bool {
        self.file.is_some()
    }

    /// Raw descriptor of the open file
    #[cfg(unix)]
    pub fn fd(&self) -> Option<RawFd> {
        self.file.as_ref().map(|f| f.as_raw_fd())
    }

    pub fn file_mut(&mut self) -> Option<&mut File> {
        self.file.as_mut()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::{Read, Write};
    use tempfile::TempDir;

    const ENOENT: i32 = 2;

    #[test]
    fn test_open_missing_file() {
        let temp_dir = TempDir::new().unwrap();
        let err = FileHandle::open_read(temp_dir.path().join("missing")).unwrap_err();
        assert_eq!(err, Status::from_system_error(ENOENT));
    }

    #[test]
    fn test_create_write_read() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("data.txt");

        let mut handle = FileHandle::create(&path).unwrap();
        assert!(handle.is_open());
        handle.file_mut().unwrap().write_all(b"payload").unwrap();
        assert!(handle.close().is_ok());
        assert!(!handle.is_open());

        let mut handle = FileHandle::open_read(&path).unwrap();
        let mut text = String::new();
        handle.file_mut().unwrap().read_to_string(&mut text).unwrap();
        assert_eq!(text, "payload");
    }

    #[cfg(unix)]
    #[test]
    fn test_fd() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("fd.txt");
        let mut handle = FileHandle::create(&path).unwrap();
        assert!(handle.fd().unwrap() > 2);
        handle.close();
        assert_eq!(handle.fd(), None);
        assert!(handle.close().is_ok());
    }
}
