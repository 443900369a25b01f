//! Built-in `help` command

use crate::command::{Command, CommandInfo, CommandRegistry, Context};
use crate::status::Status;
use clap::{Arg, ArgAction};
use std::rc::Weak;

/// Prints the help text of another registered command.
///
/// Holds a weak handle to the registry it is registered in, so the registry
/// keeps sole ownership of every command including this one.
pub struct HelpCommand {
    info: CommandInfo,
    registry: Weak<CommandRegistry>,
    sub_command: Option<String>,
    full: bool,
}

impl HelpCommand {
    pub fn new(registry: Weak<CommandRegistry>) -> Self {
        HelpCommand {
            info: CommandInfo::new(
                "help [--full|--short] [command]",
                "Show the help text of a command.\n\
                 With --full and no command, also list every registered command.",
            ),
            registry,
            sub_command: None,
            full: false,
        }
    }

    /// The command name captured by the last `parse_args`
    pub fn sub_command(&self) -> Option<&str> {
        self.sub_command.as_deref()
    }

    fn arg_parser() -> clap::Command {
        clap::Command::new("help")
            .no_binary_name(true)
            .disable_help_flag(true)
            .arg(Arg::new("full").short('f').long("full").action(ArgAction::SetTrue))
            .arg(
                Arg::new("short")
                    .short('s')
                    .long("short")
                    .action(ArgAction::SetTrue)
                    .overrides_with("full"),
            )
            .arg(Arg::new("command").num_args(0..))
    }
}

impl Command for HelpCommand {
    fn info(&self) -> &CommandInfo {
        &self.info
    }

    fn info_mut(&mut self) -> &mut CommandInfo {
        &mut self.info
    }

    /// Always succeeds: unparsable flags fall back to "no command given".
    fn parse_args(&mut self, args: &[String]) -> Status {
        self.sub_command = None;
        self.full = false;

        if let Ok(matches) = Self::arg_parser().try_get_matches_from(args) {
            self.full = matches.get_flag("full");
            self.sub_command = matches
                .get_many::<String>("command")
                .and_then(|mut names| names.next().cloned());
        }
        Status::ok()
    }

    /// # Panics
    ///
    /// Panics if the registry this command was built for has been dropped.
    fn run(&mut self, ctx: &mut Context) -> Status {
        let Some(registry) = self.registry.upgrade() else {
            panic!("help command used without a live command registry");
        };

        let Some(name) = self.sub_command.as_deref() else {
            let program = ctx.program.clone();
            let _ = writeln!(ctx.err(), "Usage: {} help [command]", program);
            if self.full {
                let _ = writeln!(ctx.err(), "Available commands: {}", registry.names().join(", "));
            }
            return Status::ok();
        };

        match registry.get(name) {
            Some(cell) => {
                // A failed borrow means the target is running right now, i.e. `help help`.
                match cell.try_borrow() {
                    Ok(command) => command.print_help(ctx.out()),
                    Err(_) => self.print_help(ctx.out()),
                }
                Status::ok()
            }
            None => {
                let _ = writeln!(ctx.err(), "Unknown command: {}", name);
                Status::new(-1, "Unknown command")
            }
        }
    }
}
