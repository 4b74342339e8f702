use crate::app::AppContext;
use crate::error::CliError;
use roster_rs_sdk::{open_roster, OpenRosterConfig, Roster, SqliteBackend};
use std::ffi::OsStr;
use std::fs;
use std::path::{Path, PathBuf};

const ROSTER_EXTENSION: &str = "roster";

/// An opened roster together with the file it lives in.
pub struct OpenedRoster {
    pub path: PathBuf,
    pub roster: Roster,
}

/// Opens the roster named by `--path`, or else the only `.roster` file in
/// the working directory. The file must already exist.
pub fn open_existing(context: &AppContext) -> Result<OpenedRoster, CliError> {
    let path = match &context.roster_path {
        Some(path) if path.is_file() => path.clone(),
        Some(path) => {
            return Err(CliError::msg(format!(
                "roster file does not exist: {}; create it with `roster init`",
                path.display()
            )))
        }
        None => {
            let cwd = std::env::current_dir()
                .map_err(|source| CliError::io("failed to read cwd", source))?;
            single_roster_file(&cwd)?
        }
    };
    let roster = open_roster_at(&path, context.chunk_size)?;
    Ok(OpenedRoster { path, roster })
}

/// Opens the file (creating it if missing) and ensures the records table.
pub fn open_roster_at(path: &Path, chunk_size: Option<usize>) -> Result<Roster, CliError> {
    let backend = SqliteBackend::from_path(path).map_err(|err| {
        CliError::roster(
            format!("failed to open sqlite backend at {}", path.display()),
            err,
        )
    })?;

    let config = OpenRosterConfig {
        backend: Some(Box::new(backend)),
        chunk_size,
    };

    pollster::block_on(open_roster(config)).map_err(|err| {
        CliError::roster(
            format!("failed to open roster database at {}", path.display()),
            err,
        )
    })
}

fn single_roster_file(dir: &Path) -> Result<PathBuf, CliError> {
    let mut found = roster_files_in(dir)?;
    match found.len() {
        1 => Ok(found.remove(0)),
        0 => Err(CliError::msg(
            "no .roster files found in current directory; pass --path <path-to-file.roster>",
        )),
        _ => {
            let listed = found
                .iter()
                .map(|path| path.display().to_string())
                .collect::<Vec<_>>()
                .join(", ");
            Err(CliError::msg(format!(
                "multiple .roster files found ({listed}); pass --path <path-to-file.roster>"
            )))
        }
    }
}

fn roster_files_in(dir: &Path) -> Result<Vec<PathBuf>, CliError> {
    let mut files = fs::read_dir(dir)
        .map_err(|source| CliError::io("failed to read cwd entries", source))?
        .map(|entry| entry.map(|entry| entry.path()))
        .collect::<Result<Vec<_>, _>>()
        .map_err(|source| CliError::io("failed to read directory entry", source))?;
    files.retain(|path| path.is_file() && path.extension() == Some(OsStr::new(ROSTER_EXTENSION)));
    files.sort();
    Ok(files)
}
