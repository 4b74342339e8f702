mod import;
mod list;

use crate::app::AppContext;
use crate::cli::records::{RecordsCommand, RecordsSubcommand};
use crate::error::CliError;

pub fn run(context: &AppContext, command: RecordsCommand) -> Result<(), CliError> {
    match command.command {
        RecordsSubcommand::Import(args) => import::run(context, args),
        RecordsSubcommand::List(args) => list::run(context, args),
    }
}
