//! CSV rendering for the dataset and the summary report
//!
//! Both tables are rendered to bytes first. The dataset signature is taken
//! over exactly these bytes, so what is hashed is what lands on disk.

use crate::error::{Error, Result};
use serde::Serialize;
use sphy_core::{PhaseDataset, PhaseRecord, SovereigntyReport};
use std::io::{self, Read};

/// Default file name of the dataset CSV
pub const DATASET_FILE: &str = "sphy_bell_reversal_proof.csv";

/// Default file name of the report CSV
pub const REPORT_FILE: &str = "sphy_sovereignty_report.csv";

/// Column order of the dataset CSV
pub const DATASET_HEADERS: [&str; 5] = [
    "frame",
    "bell_uncertainty",
    "sphy_sovereignty",
    "latency_tau",
    "reversal_phase_state",
];

/// Column order of the report CSV
pub const REPORT_HEADERS: [&str; 5] = [
    "SPHY_Coherence_Mean",
    "SPHY_Std_Deviation",
    "Bell_Uncertainty_Variance",
    "Sovereignty_Delta",
    "Uncertainty_Status",
];

/// Render the dataset: header row, then one row per frame
pub fn dataset_to_csv_bytes(dataset: &PhaseDataset) -> Result<Vec<u8>> {
    write_table(&DATASET_HEADERS, dataset.records())
}

/// Render the report: header row plus a single data row
pub fn report_to_csv_bytes(report: &SovereigntyReport) -> Result<Vec<u8>> {
    write_table(&REPORT_HEADERS, std::slice::from_ref(report))
}

fn write_table<R: Serialize>(headers: &[&str], rows: &[R]) -> Result<Vec<u8>> {
    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(Vec::new());

    writer.write_record(headers)?;
    for row in rows {
        writer.serialize(row)?;
    }
    writer.flush()?;

    writer
        .into_inner()
        .map_err(|e| Error::Io(io::Error::new(e.error().kind(), e.error().to_string())))
}

/// Parse dataset rows back from CSV
pub fn read_dataset<R: Read>(reader: R) -> Result<Vec<PhaseRecord>> {
    let mut reader = csv::Reader::from_reader(reader);
    let headers = reader.headers()?.clone();
    if headers.iter().ne(DATASET_HEADERS) {
        return Err(Error::Core(sphy_core::Error::InvalidInput(format!(
            "unexpected dataset header: {}",
            headers.iter().collect::<Vec<_>>().join(",")
        ))));
    }
    reader
        .deserialize()
        .map(|row| row.map_err(Error::from))
        .collect()
}

/// Parse the single report row back from CSV
pub fn read_report<R: Read>(reader: R) -> Result<SovereigntyReport> {
    let mut reader = csv::Reader::from_reader(reader);
    let mut rows = reader.deserialize::<SovereigntyReport>();
    match rows.next() {
        Some(row) => Ok(row?),
        None => Err(Error::Core(sphy_core::Error::empty_input("report csv"))),
    }
}
