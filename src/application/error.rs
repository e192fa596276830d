//! Application-level errors (wraps infrastructure errors)

use thiserror::Error;

use crate::infrastructure::WorkbookError;

/// Application errors cover the caller-side conditions the store itself
/// tolerates silently: JSON validation before an attribute edit, the
/// empty-export precheck, and reporting unknown ids to the user.
#[derive(Error, Debug)]
pub enum ApplicationError {
    #[error("invalid JSON for entity '{id}': {source}")]
    InvalidJson {
        id: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("entity not found: {0}")]
    NodeNotFound(String),

    #[error("nothing to export: hierarchy is empty")]
    EmptyHierarchy,

    #[error(transparent)]
    Workbook(#[from] WorkbookError),

    #[error("config error: {message}")]
    Config { message: String },
}

/// Result type for application layer operations.
pub type ApplicationResult<T> = Result<T, ApplicationError>;
