//! Command dispatch.
//!
//! # Returns
//! - `Ok(CommandResult)` with issue counts for the exit status
//! - `Err` if the command cannot run at all (config error, unreadable locale
//!   files, fallback cycle, unknown locale)

use anyhow::{Result, bail};

use super::{
    args::{Arguments, Command},
    commands::{
        CommandResult, bake::bake, check::check, init::init, resolve::resolve,
        transform::transform,
    },
};

pub fn run(Arguments { command }: Arguments) -> Result<CommandResult> {
    match command {
        Some(Command::Check(cmd)) => check(cmd),
        Some(Command::Transform(cmd)) => transform(cmd),
        Some(Command::Bake(cmd)) => bake(cmd),
        Some(Command::Resolve(cmd)) => resolve(cmd),
        Some(Command::Init) => init(),
        None => bail!("No command provided. Use --help to see available commands."),
    }
}
