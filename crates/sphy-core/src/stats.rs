//! Summary statistics over the phase dataset
//!
//! Variance and standard deviation use the n-1 (sample) convention.
//! NaN values are skipped and the count is taken over the remaining values.
//! Values are shifted by the first observation before accumulation, which
//! keeps the result stable for columns far from zero and makes a constant
//! column produce exactly zero spread.

use crate::dataset::PhaseDataset;
use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use statrs::statistics::Statistics;
use std::fmt;
use tracing::debug;

/// Default standard deviation below which uncertainty is considered extinct
pub const EXTINCTION_THRESHOLD: f64 = 0.01;

/// Mean and spread of a single column
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ColumnMoments {
    /// Number of non-NaN values the moments were computed over
    pub count: usize,
    pub mean: f64,
    pub variance: f64,
    pub std_dev: f64,
}

impl ColumnMoments {
    /// Compute moments of `data`; requires at least two rows
    ///
    /// NaN rows are skipped. With no remaining values the mean is NaN, and
    /// with fewer than two the variance is NaN.
    pub fn from_slice(data: &[f64]) -> Result<Self> {
        if data.len() < 2 {
            return Err(Error::InsufficientData {
                expected: 2,
                actual: data.len(),
            });
        }

        let valid: Vec<f64> = data.iter().copied().filter(|x| !x.is_nan()).collect();
        let count = valid.len();
        if count < data.len() {
            debug!(skipped = data.len() - count, "Skipping NaN values");
        }

        let (mean, variance) = match valid.first() {
            None => (f64::NAN, f64::NAN),
            Some(&pivot) => {
                let shifted: Vec<f64> = valid.iter().map(|&x| x - pivot).collect();
                let mean = pivot + shifted.iter().mean();
                let variance = if count > 1 {
                    shifted.iter().variance()
                } else {
                    f64::NAN
                };
                (mean, variance)
            }
        };

        Ok(Self {
            count,
            mean,
            variance,
            std_dev: variance.sqrt(),
        })
    }
}

/// Whether uncertainty survived in the sovereignty column
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum UncertaintyStatus {
    Extinct,
    Active,
}

impl UncertaintyStatus {
    /// `Extinct` when `std_dev` is strictly below `threshold`
    pub fn from_std_dev(std_dev: f64, threshold: f64) -> Self {
        if std_dev < threshold {
            Self::Extinct
        } else {
            Self::Active
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Extinct => "EXTINCT",
            Self::Active => "ACTIVE",
        }
    }
}

impl fmt::Display for UncertaintyStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One-row coherence sovereignty report
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SovereigntyReport {
    #[serde(rename = "SPHY_Coherence_Mean", with = "crate::serde_nan")]
    pub sphy_coherence_mean: f64,
    #[serde(rename = "SPHY_Std_Deviation", with = "crate::serde_nan")]
    pub sphy_std_deviation: f64,
    #[serde(rename = "Bell_Uncertainty_Variance", with = "crate::serde_nan")]
    pub bell_uncertainty_variance: f64,
    #[serde(rename = "Sovereignty_Delta", with = "crate::serde_nan")]
    pub sovereignty_delta: f64,
    #[serde(rename = "Uncertainty_Status")]
    pub uncertainty_status: UncertaintyStatus,
}

impl SovereigntyReport {
    /// Summarise `dataset`
    pub fn from_dataset(dataset: &PhaseDataset, extinction_threshold: f64) -> Result<Self> {
        let sphy = ColumnMoments::from_slice(&dataset.sphy_sovereignty())?;
        let bell = ColumnMoments::from_slice(&dataset.bell_uncertainty())?;

        let report = Self {
            sphy_coherence_mean: sphy.mean,
            sphy_std_deviation: sphy.std_dev,
            bell_uncertainty_variance: bell.variance,
            sovereignty_delta: sphy.mean - bell.mean,
            uncertainty_status: UncertaintyStatus::from_std_dev(sphy.std_dev, extinction_threshold),
        };
        debug!(?report, "Computed sovereignty report");
        Ok(report)
    }

    /// `100 - 100 * std(sphy_sovereignty)`
    pub fn stability_index(&self) -> f64 {
        stability_index(self.sphy_std_deviation)
    }
}

/// Stability index for a given sovereignty standard deviation
pub fn stability_index(std_dev: f64) -> f64 {
    100.0 - std_dev * 100.0
}
