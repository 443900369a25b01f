//! `info` - machine and process information

use crate::cli::commands::parse_with;
use crate::command::{Command, CommandInfo, Context};
use crate::status::Status;
use crate::sys::sysinfo;
use clap::{value_parser, Arg};

pub struct InfoCommand {
    info: CommandInfo,
    pid: u32,
}

impl Default for InfoCommand {
    fn default() -> Self {
        InfoCommand {
            info: CommandInfo::new(
                "info [--pid PID]",
                "Print the CPU count and frequency, and the parent and executable name\n\
                 of a process (this one unless --pid is given).",
            ),
            pid: std::process::id(),
        }
    }
}

impl Command for InfoCommand {
    fn info(&self) -> &CommandInfo {
        &self.info
    }

    fn info_mut(&mut self) -> &mut CommandInfo {
        &mut self.info
    }

    fn parse_args(&mut self, args: &[String]) -> Status {
        let parser = clap::Command::new("info").arg(
            Arg::new("pid")
                .short('p')
                .long("pid")
                .value_name("PID")
                .value_parser(value_parser!(u32)),
        );
        match parse_with(parser, args) {
            Ok(matches) => {
                self.pid = matches.get_one::<u32>("pid").copied().unwrap_or_else(std::process::id);
                Status::ok()
            }
            Err(status) => status,
        }
    }

    fn run(&mut self, ctx: &mut Context) -> Status {
        let frequency = sysinfo::cpu_frequency();
        let frequency = if frequency > 0.0 {
            format!("{:.0} MHz", frequency / 1_000_000.0)
        } else {
            "unknown".to_string()
        };
        let parent = sysinfo::parent_pid(self.pid)
            .map(|ppid| ppid.to_string())
            .unwrap_or_else(|| "unknown".to_string());

        let name = match sysinfo::process_name(self.pid) {
            Ok(name) => name,
            Err(e) => {
                let status = Status::from(e);
                ctx.print_error(&format!("cannot read process {}: {}", self.pid, status.message()));
                return status;
            }
        };

        let out = ctx.out();
        let _ = writeln!(out, "cpus:          {}", sysinfo::num_cpus());
        let _ = writeln!(out, "cpu frequency: {}", frequency);
        let _ = writeln!(out, "pid:           {}", self.pid);
        let _ = writeln!(out, "parent pid:    {}", parent);
        let _ = writeln!(out, "name:          {}", name);
        Status::ok()
    }
}
