//! CLI-level errors (wraps application errors)

use thiserror::Error;

use crate::application::ApplicationError;
use crate::domain::ForestError;

/// CLI errors are the top-level error type.
/// These are what get displayed to the user.
#[derive(Error, Debug)]
pub enum CliError {
    #[error("{0}")]
    Application(#[from] ApplicationError),

    #[error("write output: {0}")]
    Output(#[from] std::io::Error),

    #[error("{0}")]
    Usage(String),
}

impl From<ForestError> for CliError {
    fn from(e: ForestError) -> Self {
        CliError::Application(ApplicationError::Domain(e))
    }
}

/// Result type for CLI operations.
pub type CliResult<T> = Result<T, CliError>;

impl CliError {
    /// Get the appropriate exit code for this error.
    pub fn exit_code(&self) -> i32 {
        match self {
            CliError::Usage(_) => crate::exitcode::USAGE,
            CliError::Output(_) => crate::exitcode::IOERR,
            CliError::Application(e) => match e {
                ApplicationError::Domain(ForestError::InvalidTraversalMode(_)) => {
                    crate::exitcode::USAGE
                }
                ApplicationError::Domain(_) | ApplicationError::Parse { .. } => {
                    crate::exitcode::DATAERR
                }
                ApplicationError::Config { .. } => crate::exitcode::CONFIG,
                ApplicationError::OperationFailed { .. } => crate::exitcode::NOINPUT,
            },
        }
    }
}
