//! # SPHY Proof
//!
//! Samples a native phase engine across a frame grid, labels each frame,
//! summarises the run and publishes a signed set of artifacts:
//!
//! - `sphy_bell_reversal_proof.csv`: one row per frame
//! - `sphy_sovereignty_report.csv`: one summary row
//! - `sphy_bell_reversal_proof_sha256.txt`: digest of the dataset CSV
//! - `sphy_bell_reversal_plot.svg`: comparison chart
//!
//! ```rust,no_run
//! use sphy_proof::{pipeline, NativePhaseEngine, PipelineConfig, SvgPlotRenderer};
//!
//! let config = PipelineConfig::default();
//! let engine = NativePhaseEngine::load(&config.library_path).unwrap();
//! let outcome = pipeline::run(&config, &engine, &SvgPlotRenderer).unwrap();
//! println!("{:.4}%", outcome.stability_index);
//! ```

pub mod config;
pub mod error;
pub mod pipeline;

pub use config::PipelineConfig;
pub use error::{Error, Result};
pub use pipeline::{run, PipelineOutcome};

// Re-export workspace crates
pub use sphy_core::{
    ConstantPhaseEngine, FrameGrid, NativePhaseEngine, PhaseDataset, PhaseEngine, PhaseRecord,
    PhaseState, SovereigntyReport, UncertaintyStatus,
};
pub use sphy_report::{sign_file, verify_file};
pub use sphy_viz::{ComparisonChart, NullPlotRenderer, PlotRenderer, SvgPlotRenderer};
