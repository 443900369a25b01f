//! Built-in commands of the vobla binary
//!
//! Each command owns its flag syntax; most describe it with a small clap
//! parser run over the arguments that follow the command token.

pub mod completion;
pub mod config;
pub mod digest;
pub mod info;

pub use completion::CompletionCommand;
pub use config::ConfigCommand;
pub use digest::DigestCommand;
pub use info::InfoCommand;

use crate::status::Status;
use clap::ArgMatches;

/// Run `parser` over `args` (command token already stripped).
///
/// Clap errors become a failed `Status` carrying clap's one-line message.
pub(crate) fn parse_with(parser: clap::Command, args: &[String]) -> Result<ArgMatches, Status> {
    parser
        .no_binary_name(true)
        .disable_help_flag(true)
        .try_get_matches_from(args)
        .map_err(|e| {
            let rendered = e.to_string();
            let first_line = rendered.lines().next().unwrap_or_default();
            let message = first_line.strip_prefix("error: ").unwrap_or(first_line);
            Status::new(-1, message.to_string())
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Arg;

    #[test]
    fn test_parse_with_strips_clap_prefix() {
        let parser = clap::Command::new("demo").arg(Arg::new("name").required(true));
        let err = parse_with(parser, &[]).unwrap_err();
        assert_eq!(err.code(), -1);
        assert!(!err.message().starts_with("error:"));
        assert!(err.message().contains("required"));
    }

    #[test]
    fn test_parse_with_ok() {
        let parser = clap::Command::new("demo").arg(Arg::new("name"));
        let matches = parse_with(parser, &["x".to_string()]).unwrap();
        assert_eq!(matches.get_one::<String>("name").map(String::as_str), Some("x"));
    }
}
