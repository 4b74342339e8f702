use super::context::AppContext;
use crate::cli::root::{Cli, Command};
use crate::commands;
use crate::error::CliError;
use clap::Parser;

pub fn run() -> Result<(), CliError> {
    let cli = Cli::parse();
    let context = AppContext {
        roster_path: cli.path,
        chunk_size: cli.chunk_size,
    };

    match cli.command {
        Command::Init(args) => commands::init::run(&context, args),
        Command::Records(records_command) => commands::records::run(&context, records_command),
    }
}
