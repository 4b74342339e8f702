use roster_rs_sdk::RosterError;
use std::fmt::{Display, Formatter};

#[derive(Debug)]
pub enum CliError {
    InvalidArgs(&'static str),
    Message(String),
    Io {
        context: &'static str,
        source: std::io::Error,
    },
    Roster {
        context: String,
        source: RosterError,
    },
}

impl CliError {
    pub fn io(context: &'static str, source: std::io::Error) -> Self {
        Self::Io { context, source }
    }

    pub fn roster(context: impl Into<String>, source: RosterError) -> Self {
        Self::Roster {
            context: context.into(),
            source,
        }
    }

    pub fn msg(message: impl Into<String>) -> Self {
        Self::Message(message.into())
    }
}

impl Display for CliError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidArgs(message) => write!(f, "invalid arguments: {message}"),
            Self::Message(message) => write!(f, "{message}"),
            Self::Io { context, source } => write!(f, "{context}: {source}"),
            Self::Roster { context, source } => {
                write!(f, "{context}: {source} [{}]", source.code)
            }
        }
    }
}

impl std::error::Error for CliError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io { source, .. } => Some(source),
            Self::Roster { source, .. } => Some(source),
            _ => None,
        }
    }
}
