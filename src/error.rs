//! Error type for the end-to-end pipeline

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error(transparent)]
    Core(#[from] sphy_core::Error),

    #[error(transparent)]
    Report(#[from] sphy_report::Error),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

pub type Result<T> = std::result::Result<T, Error>;
