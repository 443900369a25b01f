//! Main CLI application

use crate::cli::commands::{CompletionCommand, ConfigCommand, DigestCommand, InfoCommand};
use crate::command::{CommandRegistry, Context, Verbosity};
use crate::config::{load_config, Configuration, MemoryConfig};
use crate::error::Result;
use crate::register_command;
use crate::status::Status;
use clap::{Arg, ArgAction, ArgMatches, Command};
use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::rc::Rc;

/// Name used when argv[0] is missing or unusable
const DEFAULT_PROGRAM: &str = "vobla";

/// Configuration key consulted when no verbosity flag is given
const VERBOSITY_KEY: &str = "log.verbosity";

/// CLI application
pub struct App {
    /// Name of the invoking binary
    program: String,
    /// Verbosity chosen by flags or configuration
    verbosity: Verbosity,
    /// Config file path, if one was loaded
    config_path: Option<PathBuf>,
    /// Registered commands
    registry: Rc<CommandRegistry>,
    /// Requested command and the arguments after it
    invocation: Option<(String, Vec<String>)>,
}

impl App {
    /// Parse global flags, load configuration, and register the commands
    pub fn from_args<I, T>(args: I) -> Result<Self>
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString> + Clone,
    {
        let args: Vec<OsString> = args.into_iter().map(Into::into).collect();
        let program = program_name(args.first());
        let matches = build_command().try_get_matches_from(&args)?;

        let explicit = matches.get_one::<PathBuf>("config");
        let (config, config_path) = load_config(explicit.map(PathBuf::as_path))?;
        let verbosity = get_verbosity(&matches, &config);

        Ok(App {
            program,
            verbosity,
            config_path,
            registry: build_registry(config),
            invocation: get_invocation(&matches),
        })
    }

    pub fn program(&self) -> &str {
        &self.program
    }

    pub fn verbosity(&self) -> Verbosity {
        self.verbosity
    }

    pub fn config_path(&self) -> Option<&Path> {
        self.config_path.as_deref()
    }

    pub fn registry(&self) -> &Rc<CommandRegistry> {
        &self.registry
    }

    /// A context on the process' standard streams
    pub fn context(&self) -> Context {
        Context::new(self.program.clone()).with_verbosity(self.verbosity)
    }

    /// Dispatch the requested command.
    ///
    /// The command token is stripped before `parse_args`; `run` only happens
    /// when parsing succeeded.
    pub fn run(&self, ctx: &mut Context) -> Status {
        if let Some(path) = &self.config_path {
            ctx.print_debug(&format!("Loaded config: {}", path.display()));
        }

        let Some((name, args)) = &self.invocation else {
            self.print_usage(ctx);
            return Status::ok();
        };

        let Some(cell) = self.registry.get(name) else {
            let _ = writeln!(ctx.err(), "Unknown command: {}", name);
            return Status::new(-1, "Unknown command");
        };

        let mut command = cell.borrow_mut();
        command.set_program(&self.program);
        ctx.print_debug(&format!("Running command: {} {:?}", name, args));

        let status = command.parse_args(args);
        if !status.is_ok() {
            ctx.print_error(status.message());
            command.print_help(ctx.err());
            return status;
        }

        let status = command.run(ctx);
        if !status.is_ok() {
            ctx.print_debug(&format!("Command '{}' failed: {}", name, status));
        }
        status
    }

    /// Usage line and the command list, on the error stream
    fn print_usage(&self, ctx: &mut Context) {
        let err = ctx.err();
        let _ = writeln!(err, "Usage: {} [OPTIONS] <command> [args...]", self.program);
        let _ = writeln!(err);
        let _ = writeln!(err, "Commands:");
        for name in self.registry.names() {
            let usage = self
                .registry
                .get(&name)
                .and_then(|cell| cell.try_borrow().ok().map(|c| c.usage().to_string()))
                .unwrap_or_default();
            let _ = writeln!(err, "  {:12} {}", name, usage);
        }
    }
}

/// Register the built-in commands
pub fn build_registry(config: MemoryConfig) -> Rc<CommandRegistry> {
    let config = Rc::new(config);
    CommandRegistry::with_help(|registry, weak| {
        register_command!(registry, "info", InfoCommand);
        register_command!(registry, "digest", DigestCommand);
        registry.add("config", Box::new(ConfigCommand::new(config)));
        registry.add("completion", Box::new(CompletionCommand::new(weak.clone())));
    })
}

/// Build the clap command for the global flags
fn build_command() -> Command {
    Command::new(DEFAULT_PROGRAM)
        .version(env!("CARGO_PKG_VERSION"))
        .about("Sub-command toolkit: system info, file digests and configuration lookup")
        .allow_external_subcommands(true)
        .disable_help_subcommand(true)
        .arg(
            Arg::new("config")
                .short('c')
                .long("config")
                .value_name("FILE")
                .value_parser(clap::value_parser!(PathBuf))
                .help("Path to a vobla.yml config file"),
        )
        .arg(
            Arg::new("quiet")
                .short('q')
                .long("quiet")
                .help("Only print command output and errors")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("silent")
                .short('s')
                .long("silent")
                .help("Print no diagnostics")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("verbose")
                .short('v')
                .long("verbose")
                .help("Print debug diagnostics")
                .action(ArgAction::SetTrue),
        )
}

/// Get verbosity level from flags, falling back to the configuration
fn get_verbosity(matches: &ArgMatches, config: &MemoryConfig) -> Verbosity {
    if matches.get_flag("silent") {
        Verbosity::Silent
    } else if matches.get_flag("quiet") {
        Verbosity::Quiet
    } else if matches.get_flag("verbose") {
        Verbosity::Verbose
    } else {
        config
            .get(VERBOSITY_KEY)
            .ok()
            .and_then(|name| Verbosity::from_name(&name))
            .unwrap_or(Verbosity::Normal)
    }
}

/// The command token and everything after it
fn get_invocation(matches: &ArgMatches) -> Option<(String, Vec<String>)> {
    let (name, sub_matches) = matches.subcommand()?;
    let args = sub_matches
        .get_many::<OsString>("")
        .map(|values| values.map(|v| v.to_string_lossy().into_owned()).collect())
        .unwrap_or_default();
    Some((name.to_string(), args))
}

/// Basename of argv[0]
fn program_name(argv0: Option<&OsString>) -> String {
    argv0
        .map(Path::new)
        .and_then(Path::file_name)
        .map(|name| name.to_string_lossy().into_owned())
        .filter(|name| !name.is_empty())
        .unwrap_or_else(|| DEFAULT_PROGRAM.to_string())
}

/// Process exit code for a command status
pub fn exit_code(status: &Status) -> i32 {
    if status.is_ok() {
        0
    } else {
        1
    }
}

/// Run the CLI application with the process arguments
pub fn run() -> Result<Status> {
    let app = App::from_args(std::env::args_os())?;
    let mut ctx = app.context();
    Ok(app.run(&mut ctx))
}
