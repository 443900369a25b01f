use anyhow::Context as _;
use std::process;
use vobla::cli::{exit_code, App};
use vobla::VoblaError;

fn try_main() -> anyhow::Result<i32> {
    let app = match App::from_args(std::env::args_os()) {
        // --help, --version and flag errors are rendered by clap itself
        Err(VoblaError::Cli(e)) => e.exit(),
        other => other.context("failed to start")?,
    };

    let mut ctx = app.context();
    let status = app.run(&mut ctx);
    Ok(exit_code(&status))
}

fn main() {
    match try_main() {
        Ok(code) => process::exit(code),
        Err(e) => {
            eprintln!("Error: {:#}", e);
            process::exit(1);
        }
    }
}
