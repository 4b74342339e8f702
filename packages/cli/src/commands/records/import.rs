use crate::app::AppContext;
use crate::cli::records::RecordsImportArgs;
use crate::cli::OutputFormat;
use crate::db;
use crate::error::CliError;
use crate::output;
use std::io::Read;

pub fn run(context: &AppContext, args: RecordsImportArgs) -> Result<(), CliError> {
    let document = read_input(&args.input)?;
    let opened = db::open_existing(context)?;
    tracing::debug!(path = %opened.path.display(), bytes = document.len(), "importing records");
    let summary = pollster::block_on(opened.roster.upload_json(&document))
        .map_err(|err| CliError::roster("import failed", err))?;

    match args.format {
        OutputFormat::Json => output::print_summary_json(&summary),
        OutputFormat::Table => output::print_summary_table(&summary),
    }

    Ok(())
}

fn read_input(input: &str) -> Result<String, CliError> {
    if input == "-" {
        let mut text = String::new();
        std::io::stdin()
            .read_to_string(&mut text)
            .map_err(|source| CliError::io("failed to read import from stdin", source))?;
        return non_empty(text, "stdin import input is empty");
    }

    let text = std::fs::read_to_string(input)
        .map_err(|source| CliError::io("failed to read import file", source))?;
    non_empty(text, "import file is empty")
}

fn non_empty(text: String, message: &'static str) -> Result<String, CliError> {
    if text.trim().is_empty() {
        return Err(CliError::InvalidArgs(message));
    }
    Ok(text)
}
