use crate::app::AppContext;
use crate::cli::root::InitArgs;
use crate::db;
use crate::error::CliError;
use std::path::PathBuf;

const DEFAULT_FILE_NAME: &str = "roster.roster";

pub fn run(context: &AppContext, args: InitArgs) -> Result<(), CliError> {
    let path = args
        .file
        .or_else(|| context.roster_path.clone())
        .unwrap_or_else(|| PathBuf::from(DEFAULT_FILE_NAME));
    if path.exists() {
        return Err(CliError::msg(format!(
            "roster file already exists: {}",
            path.display()
        )));
    }

    db::open_roster_at(&path, context.chunk_size)?;
    println!("Created {}", path.display());
    Ok(())
}
