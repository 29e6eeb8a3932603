mod command_result;
pub mod extract;
pub mod init;
pub mod rewrite;

pub use command_result::*;

use anyhow::Result;

use super::args::{Arguments, Command};

/// Dispatch to the handler for the parsed command.
pub fn run(Arguments { command }: Arguments) -> Result<CommandResult> {
    match command {
        Some(Command::Extract(cmd)) => extract::extract(cmd),
        Some(Command::Rewrite(cmd)) => rewrite::rewrite(cmd),
        Some(Command::Init) => init::init(),
        None => {
            anyhow::bail!("No command provided. Use --help to see available commands.")
        }
    }
}
