use super::records::RecordsCommand;
use clap::{Args, Parser, Subcommand, ValueHint};
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(name = "roster")]
#[command(about = "Roster record store command line interface")]
pub struct Cli {
    /// Path to the .roster file (required when multiple .roster files exist).
    #[arg(long, global = true, value_hint = ValueHint::FilePath)]
    pub path: Option<PathBuf>,

    /// Rows per upsert statement and per lookup query (1 to 5461; larger
    /// values are capped to stay within SQLite's bound-parameter limit).
    #[arg(long, global = true)]
    pub chunk_size: Option<usize>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Create a roster database file with an empty records table.
    Init(InitArgs),
    /// Import or list records.
    Records(RecordsCommand),
}

#[derive(Debug, Args)]
pub struct InitArgs {
    /// File to create. Falls back to --path, then `roster.roster`.
    #[arg(value_hint = ValueHint::FilePath)]
    pub file: Option<PathBuf>,
}
