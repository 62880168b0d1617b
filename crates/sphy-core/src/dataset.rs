//! The sampled phase dataset
//!
//! One row per frame. Rows are built once from [`PhaseSamples`] and the
//! derived `reversal_phase_state` is fixed at construction.

use crate::error::{Error, Result};
use crate::sampling::PhaseSamples;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Default sovereignty threshold (percent)
pub const SOVEREIGN_THRESHOLD: f64 = 90.0;

/// Categorical label derived from `sphy_sovereignty`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum PhaseState {
    /// `sphy_sovereignty` strictly above the threshold
    Sovereign,
    /// Everything else, including NaN
    Collapsed,
}

impl PhaseState {
    /// Strict comparison: a value equal to `threshold` is collapsed
    pub fn classify(sphy_sovereignty: f64, threshold: f64) -> Self {
        if sphy_sovereignty > threshold {
            Self::Sovereign
        } else {
            Self::Collapsed
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Sovereign => "SOVEREIGN",
            Self::Collapsed => "COLLAPSED",
        }
    }
}

impl fmt::Display for PhaseState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single dataset row
///
/// NaN values serialize as missing fields.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PhaseRecord {
    pub frame: usize,
    #[serde(with = "crate::serde_nan")]
    pub bell_uncertainty: f64,
    #[serde(with = "crate::serde_nan")]
    pub sphy_sovereignty: f64,
    #[serde(with = "crate::serde_nan")]
    pub latency_tau: f64,
    pub reversal_phase_state: PhaseState,
}

/// Row-oriented table of sampled phase values
#[derive(Debug, Clone, PartialEq)]
pub struct PhaseDataset {
    records: Vec<PhaseRecord>,
    threshold: f64,
}

impl PhaseDataset {
    /// Build the dataset from both sampling passes
    pub fn from_samples(samples: &PhaseSamples, threshold: f64) -> Result<Self> {
        if samples.bell.len() != samples.frames.len() {
            return Err(Error::size_mismatch(
                samples.frames.len(),
                samples.bell.len(),
                "bell_uncertainty column",
            ));
        }
        Self::from_columns(&samples.bell, &samples.sphy, threshold)
    }

    /// Build the dataset from the two value columns
    pub fn from_columns(bell: &[f64], sphy: &[f64], threshold: f64) -> Result<Self> {
        if bell.len() != sphy.len() {
            return Err(Error::size_mismatch(bell.len(), sphy.len(), "sphy_sovereignty column"));
        }
        if threshold.is_nan() {
            return Err(Error::InvalidParameter("sovereignty threshold is NaN".to_string()));
        }

        let records = bell
            .iter()
            .zip(sphy)
            .enumerate()
            .map(|(frame, (&bell_uncertainty, &sphy_sovereignty))| PhaseRecord {
                frame,
                bell_uncertainty,
                sphy_sovereignty,
                latency_tau: 0.0,
                reversal_phase_state: PhaseState::classify(sphy_sovereignty, threshold),
            })
            .collect();

        Ok(Self { records, threshold })
    }

    pub fn records(&self) -> &[PhaseRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Threshold the labels were computed with
    pub fn threshold(&self) -> f64 {
        self.threshold
    }

    pub fn frames(&self) -> Vec<usize> {
        self.records.iter().map(|r| r.frame).collect()
    }

    pub fn bell_uncertainty(&self) -> Vec<f64> {
        self.records.iter().map(|r| r.bell_uncertainty).collect()
    }

    pub fn sphy_sovereignty(&self) -> Vec<f64> {
        self.records.iter().map(|r| r.sphy_sovereignty).collect()
    }

    /// Number of rows labelled [`PhaseState::Sovereign`]
    pub fn sovereign_count(&self) -> usize {
        self.records
            .iter()
            .filter(|r| r.reversal_phase_state == PhaseState::Sovereign)
            .count()
    }
}
