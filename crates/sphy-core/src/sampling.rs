//! Frame grid construction and phase sampling

use crate::engine::PhaseEngine;
use crate::error::{Error, Result};
use tracing::{debug, instrument};

/// Evenly spaced values over `[start, stop]`, both ends included
///
/// The last value is pinned to `stop` so the endpoint is exact
/// regardless of rounding in the step.
pub fn linspace(start: f64, stop: f64, samples: usize) -> Vec<f64> {
    match samples {
        0 => Vec::new(),
        1 => vec![start],
        n => {
            let step = (stop - start) / (n - 1) as f64;
            let mut values: Vec<f64> = (0..n).map(|i| start + i as f64 * step).collect();
            values[n - 1] = stop;
            values
        }
    }
}

/// The sampled temporal axis
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameGrid {
    /// First frame value
    pub start: f64,
    /// Last frame value (inclusive)
    pub stop: f64,
    /// Number of frames
    pub samples: usize,
}

impl Default for FrameGrid {
    fn default() -> Self {
        Self {
            start: 0.0,
            stop: 100.0,
            samples: 500,
        }
    }
}

impl FrameGrid {
    pub fn new(start: f64, stop: f64, samples: usize) -> Self {
        Self { start, stop, samples }
    }

    /// Check that the grid can feed the report statistics
    pub fn validate(&self) -> Result<()> {
        if !self.start.is_finite() || !self.stop.is_finite() {
            return Err(Error::non_finite("frame grid bounds"));
        }
        if self.samples < 2 {
            return Err(Error::InvalidParameter(format!(
                "frame grid needs at least 2 samples, got {}",
                self.samples
            )));
        }
        Ok(())
    }

    /// Frame values for this grid
    pub fn frames(&self) -> Vec<f64> {
        linspace(self.start, self.stop, self.samples)
    }
}

/// Raw output of the two sampling passes
#[derive(Debug, Clone, PartialEq)]
pub struct PhaseSamples {
    /// Frame values fed to the engine
    pub frames: Vec<f64>,
    /// Engine output with `vr_active = false`
    pub bell: Vec<f64>,
    /// Engine output with `vr_active = true`
    pub sphy: Vec<f64>,
}

impl PhaseSamples {
    pub fn len(&self) -> usize {
        self.frames.len()
    }

    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }
}

/// Sample `engine` over `grid` with the flag off, then with it on
#[instrument(skip(engine), fields(samples = grid.samples))]
pub fn sample_phase<E: PhaseEngine + ?Sized>(engine: &E, grid: &FrameGrid) -> Result<PhaseSamples> {
    grid.validate()?;
    let frames = grid.frames();

    let bell: Vec<f64> = frames.iter().map(|&f| engine.phase(f, false)).collect();
    let sphy: Vec<f64> = frames.iter().map(|&f| engine.phase(f, true)).collect();

    debug!(
        first = frames.first().copied(),
        last = frames.last().copied(),
        "Sampled phase engine"
    );

    Ok(PhaseSamples { frames, bell, sphy })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::ConstantPhaseEngine;
    use approx::assert_relative_eq;
    use std::cell::RefCell;

    #[test]
    fn test_linspace_endpoints() {
        let values = linspace(0.0, 100.0, 500);
        assert_eq!(values.len(), 500);
        assert_eq!(values[0], 0.0);
        assert_eq!(values[499], 100.0);
        assert_relative_eq!(values[1], 100.0 / 499.0, epsilon = 1e-12);
    }

    #[test]
    fn test_linspace_degenerate_sizes() {
        assert!(linspace(0.0, 1.0, 0).is_empty());
        assert_eq!(linspace(3.0, 7.0, 1), vec![3.0]);
        assert_eq!(linspace(3.0, 7.0, 2), vec![3.0, 7.0]);
    }

    #[test]
    fn test_linspace_descending() {
        let values = linspace(10.0, 0.0, 11);
        assert_eq!(values[0], 10.0);
        assert_eq!(values[10], 0.0);
        assert!(values.windows(2).all(|w| w[1] < w[0]));
    }

    #[test]
    fn test_grid_validation() {
        assert!(FrameGrid::default().validate().is_ok());
        assert!(FrameGrid::new(0.0, 100.0, 1).validate().is_err());
        assert!(FrameGrid::new(f64::NAN, 100.0, 10).validate().is_err());
        assert!(FrameGrid::new(0.0, f64::INFINITY, 10).validate().is_err());
    }

    #[test]
    fn test_sample_phase_runs_flag_off_pass_first() {
        let calls = RefCell::new(Vec::new());
        let engine = |frame: f64, vr_active: bool| {
            calls.borrow_mut().push(vr_active);
            if vr_active { frame + 1000.0 } else { frame }
        };

        let grid = FrameGrid::new(0.0, 4.0, 5);
        let samples = sample_phase(&engine, &grid).unwrap();

        assert_eq!(samples.bell, vec![0.0, 1.0, 2.0, 3.0, 4.0]);
        assert_eq!(samples.sphy, vec![1000.0, 1001.0, 1002.0, 1003.0, 1004.0]);

        let calls = calls.into_inner();
        assert_eq!(calls.len(), 10);
        assert!(calls[..5].iter().all(|&flag| !flag));
        assert!(calls[5..].iter().all(|&flag| flag));
    }

    #[test]
    fn test_sample_phase_default_grid() {
        let samples = sample_phase(&ConstantPhaseEngine(1.0), &FrameGrid::default()).unwrap();
        assert_eq!(samples.len(), 500);
        assert_eq!(samples.frames[0], 0.0);
        assert_eq!(samples.frames[499], 100.0);
    }
}
