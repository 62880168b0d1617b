//! Pipeline configuration
//!
//! Everything a run needs is fixed here; the defaults reproduce the
//! canonical proof run.

use crate::error::{Error, Result};
use sphy_core::{FrameGrid, DEFAULT_LIBRARY_PATH, EXTINCTION_THRESHOLD, PHASE_SYMBOL, SOVEREIGN_THRESHOLD};
use sphy_report::{DATASET_FILE, REPORT_FILE};
use sphy_viz::{ComparisonChart, PLOT_FILE};
use std::path::PathBuf;

/// Parameters for a single proof run
#[derive(Debug, Clone, PartialEq)]
pub struct PipelineConfig {
    /// Native engine library, relative paths resolve against the working directory
    pub library_path: PathBuf,
    /// Exported phase function name
    pub symbol: String,
    pub grid: FrameGrid,
    /// Rows strictly above this are SOVEREIGN
    pub sovereign_threshold: f64,
    /// Sovereignty std dev below this marks uncertainty EXTINCT
    pub extinction_threshold: f64,
    /// Directory all artifacts are written to
    pub output_dir: PathBuf,
    pub dataset_file: String,
    pub report_file: String,
    pub plot_file: String,
    pub chart: ComparisonChart,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            library_path: PathBuf::from(DEFAULT_LIBRARY_PATH),
            symbol: PHASE_SYMBOL.to_string(),
            grid: FrameGrid::default(),
            sovereign_threshold: SOVEREIGN_THRESHOLD,
            extinction_threshold: EXTINCTION_THRESHOLD,
            output_dir: PathBuf::from("."),
            dataset_file: DATASET_FILE.to_string(),
            report_file: REPORT_FILE.to_string(),
            plot_file: PLOT_FILE.to_string(),
            chart: ComparisonChart::default(),
        }
    }
}

impl PipelineConfig {
    /// Same configuration writing into `dir`
    pub fn with_output_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.output_dir = dir.into();
        self
    }

    pub fn with_grid(mut self, grid: FrameGrid) -> Self {
        self.grid = grid;
        self
    }

    pub fn dataset_path(&self) -> PathBuf {
        self.output_dir.join(&self.dataset_file)
    }

    pub fn report_path(&self) -> PathBuf {
        self.output_dir.join(&self.report_file)
    }

    pub fn plot_path(&self) -> PathBuf {
        self.output_dir.join(&self.plot_file)
    }

    /// Reject configurations that cannot produce a complete, distinct set of files
    pub fn validate(&self) -> Result<()> {
        self.grid.validate()?;

        if !self.sovereign_threshold.is_finite() {
            return Err(Error::InvalidConfig(format!(
                "sovereign_threshold must be finite, got {}",
                self.sovereign_threshold
            )));
        }
        if !self.extinction_threshold.is_finite() || self.extinction_threshold < 0.0 {
            return Err(Error::InvalidConfig(format!(
                "extinction_threshold must be finite and non-negative, got {}",
                self.extinction_threshold
            )));
        }
        if self.symbol.is_empty() {
            return Err(Error::InvalidConfig("symbol name is empty".to_string()));
        }

        let names = [&self.dataset_file, &self.report_file, &self.plot_file];
        for name in names {
            if name.is_empty() || name.contains(['/', '\\']) {
                return Err(Error::InvalidConfig(format!(
                    "output file name {name:?} must be a bare, non-empty file name"
                )));
            }
        }

        let signature = sphy_report::signature_path(&self.dataset_path())?;
        let mut paths = vec![
            self.dataset_path(),
            self.report_path(),
            self.plot_path(),
            signature,
        ];
        paths.sort();
        paths.dedup();
        if paths.len() != 4 {
            return Err(Error::InvalidConfig(
                "dataset, report, plot and signature files must all differ".to_string(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_matches_canonical_run() {
        let config = PipelineConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.grid, FrameGrid::new(0.0, 100.0, 500));
        assert_eq!(config.sovereign_threshold, 90.0);
        assert_eq!(config.extinction_threshold, 0.01);
        assert_eq!(config.chart.benchmark_level, 90.5842);
        assert_eq!(config.symbol, "calcular_fase_binaria");
        assert_eq!(config.library_path, PathBuf::from("./libsphy_engine.so"));
        assert!(config.dataset_path().ends_with("sphy_bell_reversal_proof.csv"));
        assert!(config.report_path().ends_with("sphy_sovereignty_report.csv"));
    }

    #[test]
    fn test_rejects_bad_thresholds() {
        let config = PipelineConfig {
            sovereign_threshold: f64::NAN,
            ..Default::default()
        };
        assert!(config.validate().is_err());

        let config = PipelineConfig {
            extinction_threshold: -1.0,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_rejects_small_grid() {
        let config = PipelineConfig::default().with_grid(FrameGrid::new(0.0, 1.0, 1));
        assert!(matches!(config.validate(), Err(Error::Core(_))));
    }

    #[test]
    fn test_rejects_colliding_files() {
        let config = PipelineConfig {
            report_file: DATASET_FILE.to_string(),
            ..Default::default()
        };
        assert!(config.validate().is_err());

        let config = PipelineConfig {
            plot_file: "sphy_bell_reversal_proof_sha256.txt".to_string(),
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_rejects_nested_file_names() {
        let config = PipelineConfig {
            plot_file: "plots/chart.svg".to_string(),
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }
}
