//! Error types for xtask commands.

use portfolio_aws::AwsError;
use thiserror::Error;

/// Result type alias for xtask commands.
pub type Result<T> = std::result::Result<T, XtaskError>;

/// Errors that can occur while running an xtask command.
#[derive(Error, Debug)]
pub enum XtaskError {
    #[error(transparent)]
    Aws(#[from] AwsError),

    #[error("Prompt failed: {0}")]
    Prompt(String),

    #[error("Operation cancelled by user")]
    UserCancelled,
}
