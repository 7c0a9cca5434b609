//! # Application Errors

use crate::config::ConfigError;
use roster_core::RosterError;
use thiserror::Error;

/// Everything a CLI command can fail with.
#[derive(Debug, Error)]
pub enum AppError {
    #[error(transparent)]
    Roster(#[from] RosterError),

    #[error(transparent)]
    Config(#[from] ConfigError),

    /// A protected page was requested without a session.
    #[error("Login required (continue at {redirect})")]
    LoginRequired { redirect: String },

    #[error("Page not found: {0}")]
    PageNotFound(String),

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),
}
