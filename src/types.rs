//! Error results that can be returned from the harness

use thiserror::Error;

/// Serious errors that abort a run, and errors from third-party libraries
#[derive(Error, Debug)]
pub enum Error {
    #[error("io error: {0}")]
    IO(#[from] std::io::Error),

    #[error("walk error: {0}")]
    Walk(#[from] walkdir::Error),

    #[error("pattern error: {0}")]
    Pattern(#[from] regex::Error),

    #[error("config error: {0}")]
    Config(String),
}

/// Result that can be returned which holds either T or an Error
pub type Result<T> = std::result::Result<T, Error>;
