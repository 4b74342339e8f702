use crate::app::AppContext;
use crate::cli::records::RecordsListArgs;
use crate::cli::OutputFormat;
use crate::db;
use crate::error::CliError;
use crate::output;
use roster_rs_sdk::PageRequest;

pub fn run(context: &AppContext, args: RecordsListArgs) -> Result<(), CliError> {
    let opened = db::open_existing(context)?;
    let request = PageRequest::new(args.page, args.size);
    let page = pollster::block_on(opened.roster.list_records(&request))
        .map_err(|err| CliError::roster("listing records failed", err))?;

    match args.format {
        OutputFormat::Json => output::print_page_json(&page),
        OutputFormat::Table => output::print_page_table(&page),
    }

    Ok(())
}
