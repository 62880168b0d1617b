//! Phase engine abstraction
//!
//! The phase computation itself lives outside this workspace. Everything
//! downstream only sees the [`PhaseEngine`] trait, so the native library,
//! a closure, or a constant stub are interchangeable.

/// A one-parameter phase function evaluated per frame
///
/// `vr_active = false` yields the Bell uncertainty value and
/// `vr_active = true` yields the SPHY sovereignty value.
pub trait PhaseEngine {
    /// Evaluate the phase at `frame`
    fn phase(&self, frame: f64, vr_active: bool) -> f64;
}

impl<F> PhaseEngine for F
where
    F: Fn(f64, bool) -> f64,
{
    #[inline]
    fn phase(&self, frame: f64, vr_active: bool) -> f64 {
        self(frame, vr_active)
    }
}

/// Stub engine that returns the same value for every input
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ConstantPhaseEngine(pub f64);

impl PhaseEngine for ConstantPhaseEngine {
    #[inline]
    fn phase(&self, _frame: f64, _vr_active: bool) -> f64 {
        self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn evaluate<E: PhaseEngine + ?Sized>(engine: &E, frame: f64, flag: bool) -> f64 {
        engine.phase(frame, flag)
    }

    #[test]
    fn test_closure_is_engine() {
        let engine = |frame: f64, vr_active: bool| if vr_active { frame * 2.0 } else { -frame };
        assert_eq!(evaluate(&engine, 3.0, true), 6.0);
        assert_eq!(evaluate(&engine, 3.0, false), -3.0);
    }

    #[test]
    fn test_constant_engine_ignores_inputs() {
        let engine = ConstantPhaseEngine(42.5);
        for frame in [0.0, 1.5, 100.0] {
            assert_eq!(engine.phase(frame, false), 42.5);
            assert_eq!(engine.phase(frame, true), 42.5);
        }
    }

    #[test]
    fn test_dyn_dispatch() {
        let engines: Vec<Box<dyn PhaseEngine>> = vec![
            Box::new(ConstantPhaseEngine(1.0)),
            Box::new(|f: f64, _: bool| f + 1.0),
        ];
        let values: Vec<f64> = engines.iter().map(|e| evaluate(e.as_ref(), 1.0, true)).collect();
        assert_eq!(values, vec![1.0, 2.0]);
    }
}
