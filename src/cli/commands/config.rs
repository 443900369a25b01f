//! `config` - read values from the loaded configuration

use crate::cli::commands::parse_with;
use crate::command::{Command, CommandInfo, Context};
use crate::config::{Configuration, MemoryConfig};
use crate::error::ConfigResult;
use crate::status::Status;
use clap::{Arg, ArgMatches};
use globset::Glob;
use std::rc::Rc;

/// How `config get` should coerce the value before printing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ValueType {
    String,
    Bool,
    Int,
    Int64,
    Double,
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Action {
    Get { key: String, value_type: ValueType },
    List { pattern: Option<String> },
}

pub struct ConfigCommand {
    info: CommandInfo,
    config: Rc<MemoryConfig>,
    action: Option<Action>,
}

impl ConfigCommand {
    pub fn new(config: Rc<MemoryConfig>) -> Self {
        ConfigCommand {
            info: CommandInfo::new(
                "config get KEY [--type string|bool|int|int64|double] | config list [PATTERN]",
                "Read the loaded configuration. Nested keys are joined with dots,\n\
                 e.g. 'log.verbosity'. PATTERN is a glob over key names.",
            ),
            config,
            action: None,
        }
    }

    fn arg_parser() -> clap::Command {
        clap::Command::new("config")
            .subcommand_required(true)
            .subcommand(
                clap::Command::new("get").arg(Arg::new("key").required(true)).arg(
                    Arg::new("type")
                        .short('t')
                        .long("type")
                        .value_parser(["string", "bool", "int", "int64", "double"])
                        .default_value("string"),
                ),
            )
            .subcommand(clap::Command::new("list").arg(Arg::new("pattern")))
    }

    fn action_from(matches: &ArgMatches) -> Option<Action> {
        match matches.subcommand()? {
            ("get", sub) => {
                let key = sub.get_one::<String>("key")?.clone();
                let value_type = match sub.get_one::<String>("type").map(String::as_str) {
                    Some("bool") => ValueType::Bool,
                    Some("int") => ValueType::Int,
                    Some("int64") => ValueType::Int64,
                    Some("double") => ValueType::Double,
                    _ => ValueType::String,
                };
                Some(Action::Get { key, value_type })
            }
            ("list", sub) => Some(Action::List {
                pattern: sub.get_one::<String>("pattern").cloned(),
            }),
            _ => None,
        }
    }

    fn lookup(&self, key: &str, value_type: ValueType) -> ConfigResult<String> {
        let config = self.config.as_ref();
        Ok(match value_type {
            ValueType::String => config.get(key)?,
            ValueType::Bool => config.get_bool(key)?.to_string(),
            ValueType::Int => config.get_int(key)?.to_string(),
            ValueType::Int64 => config.get_int64(key)?.to_string(),
            ValueType::Double => config.get_double(key)?.to_string(),
        })
    }

    fn list(&self, pattern: Option<&str>, ctx: &mut Context) -> Status {
        let matcher = match pattern.map(Glob::new).transpose() {
            Ok(glob) => glob.map(|g| g.compile_matcher()),
            Err(e) => return Status::new(-1, format!("Invalid pattern: {}", e)),
        };
        for (key, value) in self.config.iter() {
            if matcher.as_ref().map_or(true, |m| m.is_match(key)) {
                let _ = writeln!(ctx.out(), "{} = {}", key, value);
            }
        }
        Status::ok()
    }
}

impl Command for ConfigCommand {
    fn info(&self) -> &CommandInfo {
        &self.info
    }

    fn info_mut(&mut self) -> &mut CommandInfo {
        &mut self.info
    }

    fn parse_args(&mut self, args: &[String]) -> Status {
        self.action = None;
        let matches = match parse_with(Self::arg_parser(), args) {
            Ok(matches) => matches,
            Err(status) => return status,
        };
        self.action = Self::action_from(&matches);
        Status::ok()
    }

    fn run(&mut self, ctx: &mut Context) -> Status {
        match self.action.clone() {
            Some(Action::Get { key, value_type }) => match self.lookup(&key, value_type) {
                Ok(value) => {
                    let _ = writeln!(ctx.out(), "{}", value);
                    Status::ok()
                }
                Err(e) => {
                    ctx.print_error(&e.to_string());
                    Status::from(e)
                }
            },
            Some(Action::List { pattern }) => self.list(pattern.as_deref(), ctx),
            None => Status::new(-1, "config: run called before a successful parse"),
        }
    }
}
