use super::OutputFormat;
use clap::{Args, Subcommand};

#[derive(Debug, Args)]
pub struct RecordsCommand {
    #[command(subcommand)]
    pub command: RecordsSubcommand,
}

#[derive(Debug, Subcommand)]
pub enum RecordsSubcommand {
    /// Import a JSON array or JSON lines file of validated rows. Use '-' for stdin.
    Import(RecordsImportArgs),
    /// List one page of stored records.
    List(RecordsListArgs),
}

#[derive(Debug, Args)]
pub struct RecordsImportArgs {
    /// Output format for the import summary.
    #[arg(long, value_enum, default_value_t = OutputFormat::Table)]
    pub format: OutputFormat,

    /// Input file. Use '-' to read from stdin.
    pub input: String,
}

#[derive(Debug, Args)]
pub struct RecordsListArgs {
    /// Output format for the page.
    #[arg(long, value_enum, default_value_t = OutputFormat::Table)]
    pub format: OutputFormat,

    /// Page number, starting at 1.
    #[arg(long, default_value_t = 1)]
    pub page: u32,

    /// Records per page; values below 10 are raised to 10.
    #[arg(long, default_value_t = 10)]
    pub size: u32,
}
