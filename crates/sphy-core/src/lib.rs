//! # SPHY Core
//!
//! Binding to the native phase engine plus everything computed in memory
//! from its output: the frame grid, the two sampling passes, the labelled
//! dataset and the summary report.
//!
//! ## Key Features
//!
//! - **Pluggable Engine**: [`PhaseEngine`] is implemented by the native
//!   library, by [`ConstantPhaseEngine`] and by any `Fn(f64, bool) -> f64`
//! - **Inclusive Sampling**: [`linspace`] pins both endpoints of the grid
//! - **Exact Degenerate Statistics**: constant columns give zero spread
//! - **NaN Skipping**: statistics ignore NaN rows, and CSV writes them empty
//!
//! ```rust
//! use sphy_core::{sample_phase, FrameGrid, PhaseDataset, SovereigntyReport};
//!
//! let engine = |frame: f64, vr_active: bool| if vr_active { 95.0 } else { frame };
//! let samples = sample_phase(&engine, &FrameGrid::default()).unwrap();
//! let dataset = PhaseDataset::from_samples(&samples, 90.0).unwrap();
//! let report = SovereigntyReport::from_dataset(&dataset, 0.01).unwrap();
//! assert_eq!(report.stability_index(), 100.0);
//! ```

pub mod dataset;
pub mod engine;
pub mod error;
pub mod native;
pub mod sampling;
pub mod serde_nan;
pub mod stats;

// Re-exports
pub use dataset::{PhaseDataset, PhaseRecord, PhaseState, SOVEREIGN_THRESHOLD};
pub use engine::{ConstantPhaseEngine, PhaseEngine};
pub use error::{Error, Result};
pub use native::{NativePhaseEngine, DEFAULT_LIBRARY_PATH, PHASE_SYMBOL};
pub use sampling::{linspace, sample_phase, FrameGrid, PhaseSamples};
pub use stats::{
    stability_index, ColumnMoments, SovereigntyReport, UncertaintyStatus, EXTINCTION_THRESHOLD,
};
