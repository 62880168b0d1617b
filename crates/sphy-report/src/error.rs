//! Error types for sphy-report

use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Core error: {0}")]
    Core(#[from] sphy_core::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Signature mismatch for {}: expected {expected}, got {actual}", path.display())]
    SignatureMismatch {
        path: PathBuf,
        expected: String,
        actual: String,
    },

    #[error("Invalid signature file {}: {reason}", path.display())]
    InvalidSignature { path: PathBuf, reason: String },

    #[error("Invalid path: {0}")]
    InvalidPath(String),
}

pub type Result<T> = std::result::Result<T, Error>;
