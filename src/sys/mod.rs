//! Operating system helpers used by the built-in commands

pub mod digest;
pub mod file;
pub mod sysinfo;

pub use digest::{digest_reader, Algorithm, DigestValue, Digester};
pub use file::FileHandle;
