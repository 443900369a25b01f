//! `digest` - MD5 / SHA-1 checksums of files

use crate::cli::commands::parse_with;
use crate::command::{Command, CommandInfo, Context};
use crate::status::Status;
use crate::sys::{digest_reader, Algorithm, FileHandle};
use clap::{Arg, ArgAction};
use std::path::{Path, PathBuf};

pub struct DigestCommand {
    info: CommandInfo,
    algorithm: Algorithm,
    patterns: Vec<String>,
}

impl Default for DigestCommand {
    fn default() -> Self {
        DigestCommand {
            info: CommandInfo::new(
                "digest [-a md5|sha1] PATH|GLOB...",
                "Print the checksum of each file as '<hex>  <path>'.\n\
                 Glob patterns are expanded; the default algorithm is md5.",
            ),
            algorithm: Algorithm::Md5,
            patterns: Vec::new(),
        }
    }
}

impl DigestCommand {
    /// Expand one argument into paths; plain paths are kept as is
    fn expand(pattern: &str) -> Result<Vec<PathBuf>, Status> {
        if !pattern.contains(&['*', '?', '['][..]) {
            return Ok(vec![PathBuf::from(pattern)]);
        }
        let paths = glob::glob(pattern)
            .map_err(|e| Status::new(-1, format!("Invalid pattern '{}': {}", pattern, e)))?;
        // Entries that cannot be read while walking are skipped.
        Ok(paths.filter_map(|entry| entry.ok()).collect())
    }

    fn digest_file(&self, path: &Path, ctx: &mut Context) -> Status {
        let mut handle = match FileHandle::open_read(path) {
            Ok(handle) => handle,
            Err(status) => return status,
        };
        let Some(file) = handle.file_mut() else {
            return Status::new(-1, "file is not open");
        };
        match digest_reader(self.algorithm, file) {
            Ok(value) => {
                let _ = writeln!(ctx.out(), "{}  {}", value, path.display());
                Status::ok()
            }
            Err(e) => Status::from(e),
        }
    }
}

impl Command for DigestCommand {
    fn info(&self) -> &CommandInfo {
        &self.info
    }

    fn info_mut(&mut self) -> &mut CommandInfo {
        &mut self.info
    }

    fn parse_args(&mut self, args: &[String]) -> Status {
        let parser = clap::Command::new("digest")
            .arg(
                Arg::new("algorithm")
                    .short('a')
                    .long("algorithm")
                    .value_name("ALGORITHM")
                    .default_value("md5"),
            )
            .arg(
                Arg::new("paths")
                    .value_name("PATH")
                    .action(ArgAction::Append)
                    .num_args(1..)
                    .required(true),
            );
        let matches = match parse_with(parser, args) {
            Ok(matches) => matches,
            Err(status) => return status,
        };

        let algorithm = matches.get_one::<String>("algorithm").map(String::as_str).unwrap_or("md5");
        self.algorithm = match algorithm.parse() {
            Ok(algorithm) => algorithm,
            Err(status) => return status,
        };
        self.patterns = matches
            .get_many::<String>("paths")
            .map(|values| values.cloned().collect())
            .unwrap_or_default();
        Status::ok()
    }

    /// Keeps going after a failed file and returns the last failure
    fn run(&mut self, ctx: &mut Context) -> Status {
        let mut result = Status::ok();
        ctx.print_debug(&format!("digest algorithm: {}", self.algorithm.name()));

        for pattern in &self.patterns {
            let paths = match Self::expand(pattern) {
                Ok(paths) => paths,
                Err(status) => {
                    ctx.print_error(status.message());
                    result = status;
                    continue;
                }
            };
            if paths.is_empty() {
                ctx.print_warn(&format!("no files match '{}'", pattern));
            }
            for path in paths {
                let status = self.digest_file(&path, ctx);
                if !status.is_ok() {
                    ctx.print_error(&format!("{}: {}", path.display(), status.message()));
                    result = status;
                }
            }
        }
        result
    }
}
