//! MD5 and SHA-1 digests with staged computation

use crate::error::{Result, VoblaError};
use crate::status::Status;
use sha1::{Digest as _, Sha1};
use std::fmt;
use std::io::Read;
use std::str::FromStr;

/// Supported digest algorithms
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Algorithm {
    Md5,
    Sha1,
}

impl Algorithm {
    pub fn name(&self) -> &'static str {
        match self {
            Algorithm::Md5 => "md5",
            Algorithm::Sha1 => "sha1",
        }
    }

    /// Digest length in bytes
    pub fn output_len(&self) -> usize {
        match self {
            Algorithm::Md5 => 16,
            Algorithm::Sha1 => 20,
        }
    }
}

impl FromStr for Algorithm {
    type Err = Status;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "md5" => Ok(Algorithm::Md5),
            "sha1" | "sha-1" => Ok(Algorithm::Sha1),
            other => Err(Status::new(-1, format!("Unknown digest algorithm: {}", other))),
        }
    }
}

enum State {
    Md5(md5::Context),
    Sha1(Sha1),
}

/// Incremental digest: `new`, any number of `update`s, then `finalize`
pub struct Digester {
    state: State,
}

impl Digester {
    pub fn new(algorithm: Algorithm) -> Self {
        let state = match algorithm {
            Algorithm::Md5 => State::Md5(md5::Context::new()),
            Algorithm::Sha1 => State::Sha1(Sha1::new()),
        };
        Digester { state }
    }

    /// One-shot digest of `data`
    pub fn compute(algorithm: Algorithm, data: impl AsRef<[u8]>) -> DigestValue {
        let mut digester = Digester::new(algorithm);
        digester.update(data);
        digester.finalize()
    }

    pub fn update(&mut self, data: impl AsRef<[u8]>) {
        match &mut self.state {
            State::Md5(ctx) => ctx.consume(data),
            State::Sha1(hasher) => hasher.update(data),
        }
    }

    pub fn finalize(self) -> DigestValue {
        let bytes = match self.state {
            State::Md5(ctx) => ctx.compute().0.to_vec(),
            State::Sha1(hasher) => hasher.finalize().to_vec(),
        };
        DigestValue(bytes)
    }
}

/// Digest everything `reader` yields
pub fn digest_reader(algorithm: Algorithm, mut reader: impl Read) -> Result<DigestValue> {
    let mut digester = Digester::new(algorithm);
    let mut buffer = [0u8; 8192];
    loop {
        let n = reader.read(&mut buffer).map_err(VoblaError::Io)?;
        if n == 0 {
            break;
        }
        digester.update(&buffer[..n]);
    }
    Ok(digester.finalize())
}

/// Finished digest bytes; `Display` renders lowercase hex
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DigestValue(Vec<u8>);

impl DigestValue {
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    pub fn to_hex(&self) -> String {
        hex::encode(&self.0)
    }
}

impl fmt::Display for DigestValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}
