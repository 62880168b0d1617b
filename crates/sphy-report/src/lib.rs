//! Output side of the SPHY proof pipeline
//!
//! - [`csv_output`]: dataset and report tables as CSV bytes
//! - [`signature`]: SHA-256 sidecar signing and verification
//! - [`staging`]: temporary-file staging so a run publishes all of its
//!   files or none of them

pub mod csv_output;
pub mod error;
pub mod signature;
pub mod staging;

pub use csv_output::{
    dataset_to_csv_bytes, read_dataset, read_report, report_to_csv_bytes, DATASET_FILE,
    DATASET_HEADERS, REPORT_FILE, REPORT_HEADERS,
};
pub use error::{Error, Result};
pub use signature::{is_sha256_hex, sha256_hex, sign_file, signature_path, verify_file};
pub use staging::{atomic_write, StagedOutput};
