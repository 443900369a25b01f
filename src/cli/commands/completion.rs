//! `completion` - shell completion scripts for the registered commands

use crate::cli::commands::parse_with;
use crate::command::{Command, CommandInfo, CommandRegistry, Context};
use crate::status::Status;
use clap::{value_parser, Arg, ArgAction};
use clap_complete::Shell;
use std::rc::Weak;

pub struct CompletionCommand {
    info: CommandInfo,
    registry: Weak<CommandRegistry>,
    shell: Option<Shell>,
}

impl CompletionCommand {
    pub fn new(registry: Weak<CommandRegistry>) -> Self {
        CompletionCommand {
            info: CommandInfo::new(
                "completion <bash|elvish|fish|powershell|zsh>",
                "Print a completion script covering every registered command.",
            ),
            registry,
            shell: None,
        }
    }

    /// Clap description of the whole command set, used only for generation
    fn command_tree(&self, program: &str, registry: &CommandRegistry) -> clap::Command {
        let mut tree = clap::Command::new(program.to_string())
            .disable_help_subcommand(true)
            .arg(Arg::new("config").short('c').long("config").value_name("FILE"))
            .arg(Arg::new("quiet").short('q').long("quiet").action(ArgAction::SetTrue))
            .arg(Arg::new("silent").short('s').long("silent").action(ArgAction::SetTrue))
            .arg(Arg::new("verbose").short('v').long("verbose").action(ArgAction::SetTrue));

        for name in registry.names() {
            let mut sub = clap::Command::new(name.clone());
            match registry.get(&name).map(|cell| cell.try_borrow()) {
                Some(Ok(command)) => sub = sub.about(command.usage().to_string()),
                // Borrowed means it is this command, which is running.
                _ => sub = sub.about(self.usage().to_string()),
            }
            tree = tree.subcommand(sub);
        }
        tree
    }
}

impl Command for CompletionCommand {
    fn info(&self) -> &CommandInfo {
        &self.info
    }

    fn info_mut(&mut self) -> &mut CommandInfo {
        &mut self.info
    }

    fn parse_args(&mut self, args: &[String]) -> Status {
        let parser = clap::Command::new("completion").arg(
            Arg::new("shell")
                .required(true)
                .value_parser(value_parser!(Shell)),
        );
        match parse_with(parser, args) {
            Ok(matches) => {
                self.shell = matches.get_one::<Shell>("shell").copied();
                Status::ok()
            }
            Err(status) => status,
        }
    }

    /// # Panics
    ///
    /// Panics if the registry this command was built for has been dropped.
    fn run(&mut self, ctx: &mut Context) -> Status {
        let Some(registry) = self.registry.upgrade() else {
            panic!("completion command used without a live command registry");
        };
        let Some(shell) = self.shell else {
            return Status::new(-1, "completion: no shell given");
        };

        let program = if self.program().is_empty() {
            ctx.program.clone()
        } else {
            self.program().to_string()
        };
        let mut tree = self.command_tree(&program, &registry);
        clap_complete::generate(shell, &mut tree, program, ctx.out());
        Status::ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bash_completion_lists_commands() {
        let registry = CommandRegistry::with_help(|registry, weak| {
            registry.add("completion", Box::new(CompletionCommand::new(weak.clone())));
        });
        let cell = registry.get("completion").unwrap();
        let mut cmd = cell.borrow_mut();
        assert!(cmd.parse_args(&["bash".to_string()]).is_ok());

        let (mut ctx, out, _err) = Context::captured("vobla");
        assert!(cmd.run(&mut ctx).is_ok());
        let script = out.contents();
        assert!(script.contains("vobla"));
        assert!(script.contains("help"));
        assert!(script.contains("completion"));
    }

    #[test]
    fn test_unknown_shell() {
        let mut cmd = CompletionCommand::new(Weak::new());
        assert!(!cmd.parse_args(&["tcsh".to_string()]).is_ok());
    }
}
