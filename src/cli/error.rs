//! CLI-level errors (wraps application errors)

use thiserror::Error;

use crate::application::ApplicationError;
use crate::infrastructure::WorkbookError;

/// CLI errors are the top-level error type.
/// These are what get displayed to the user.
#[derive(Error, Debug)]
pub enum CliError {
    #[error("{0}")]
    App(#[from] ApplicationError),

    #[error("invalid arguments: {0}")]
    InvalidArgs(String),
}

/// Result type for CLI operations.
pub type CliResult<T> = Result<T, CliError>;

impl CliError {
    /// Get the appropriate exit code for this error.
    pub fn exit_code(&self) -> i32 {
        match self {
            CliError::InvalidArgs(_) => crate::exitcode::USAGE,
            CliError::App(e) => match e {
                ApplicationError::InvalidJson { .. }
                | ApplicationError::NodeNotFound(_)
                | ApplicationError::EmptyHierarchy => crate::exitcode::DATAERR,
                ApplicationError::Config { .. } => crate::exitcode::CONFIG,
                ApplicationError::Workbook(w) => match w {
                    WorkbookError::Read { .. } => crate::exitcode::NOINPUT,
                    WorkbookError::Write { .. } => crate::exitcode::CANTCREAT,
                    WorkbookError::Parse { .. } => crate::exitcode::DATAERR,
                },
            },
        }
    }
}
