//! End-to-end proof run
//!
//! Sampling, statistics, CSV rendering, hashing and chart rendering all
//! happen in memory. Only then are the artifacts staged and committed
//! together, so a failing run leaves no output behind.

use crate::config::PipelineConfig;
use crate::error::Result;
use sphy_core::{sample_phase, PhaseDataset, PhaseEngine, SovereigntyReport};
use sphy_report::{dataset_to_csv_bytes, report_to_csv_bytes, sha256_hex, signature_path, StagedOutput};
use sphy_viz::PlotRenderer;
use std::path::PathBuf;
use tracing::{debug, info, instrument};

/// Everything a completed run produced
#[derive(Debug, Clone)]
pub struct PipelineOutcome {
    pub dataset: PhaseDataset,
    pub report: SovereigntyReport,
    pub stability_index: f64,
    /// Hex SHA-256 of the dataset CSV bytes
    pub signature: String,
    pub dataset_path: PathBuf,
    pub report_path: PathBuf,
    pub signature_path: PathBuf,
    /// `None` when the renderer produced no chart
    pub plot_path: Option<PathBuf>,
}

/// Run the proof pipeline against `engine`
#[instrument(skip_all, fields(samples = config.grid.samples, output_dir = %config.output_dir.display()))]
pub fn run<E, R>(config: &PipelineConfig, engine: &E, renderer: &R) -> Result<PipelineOutcome>
where
    E: PhaseEngine + ?Sized,
    R: PlotRenderer + ?Sized,
{
    config.validate()?;

    let samples = sample_phase(engine, &config.grid)?;
    let dataset = PhaseDataset::from_samples(&samples, config.sovereign_threshold)?;
    let report = SovereigntyReport::from_dataset(&dataset, config.extinction_threshold)?;
    let stability_index = report.stability_index();
    info!(
        sovereign_rows = dataset.sovereign_count(),
        rows = dataset.len(),
        status = %report.uncertainty_status,
        "Dataset assembled"
    );

    let dataset_bytes = dataset_to_csv_bytes(&dataset)?;
    let report_bytes = report_to_csv_bytes(&report)?;
    let signature = sha256_hex(&dataset_bytes);
    let plot = if renderer.is_enabled() {
        renderer.render(&dataset, &config.chart)?
    } else {
        debug!("Plot renderer disabled, skipping chart");
        None
    };

    let dataset_path = config.dataset_path();
    let report_path = config.report_path();
    let signature_path = signature_path(&dataset_path)?;
    let plot_path = plot.as_ref().map(|_| config.plot_path());

    let mut stage = StagedOutput::new();
    stage.stage(dataset_path.clone(), &dataset_bytes)?;
    stage.stage(report_path.clone(), &report_bytes)?;
    if let (Some(bytes), Some(path)) = (&plot, &plot_path) {
        stage.stage(path.clone(), bytes)?;
    }
    stage.stage(signature_path.clone(), signature.as_bytes())?;
    let written = stage.commit()?;
    info!(files = written.len(), %signature, "Artifacts committed");

    Ok(PipelineOutcome {
        dataset,
        report,
        stability_index,
        signature,
        dataset_path,
        report_path,
        signature_path,
        plot_path,
    })
}
