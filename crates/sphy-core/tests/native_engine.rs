//! Loading and calling a real shared library through `NativePhaseEngine`

mod common;

use common::fixture_library;
use sphy_core::{
    sample_phase, Error, FrameGrid, NativePhaseEngine, PhaseDataset, PhaseEngine, PHASE_SYMBOL,
    SOVEREIGN_THRESHOLD,
};

#[test]
fn test_load_binds_phase_symbol() {
    let engine = NativePhaseEngine::load(fixture_library()).unwrap();

    assert_eq!(engine.symbol(), PHASE_SYMBOL);
    assert_eq!(engine.path(), fixture_library());
    assert_eq!(engine.phase(0.0, true), 95.0);
    assert_eq!(engine.phase(100.0, true), 94.0);
    assert_eq!(engine.phase(0.0, false), 50.0);
}

#[test]
fn test_load_explicit_symbol() {
    let engine = NativePhaseEngine::load_symbol(fixture_library(), "phase_inverted").unwrap();

    assert_eq!(engine.symbol(), "phase_inverted");
    assert_eq!(engine.phase(0.0, true), 5.0);
    assert_eq!(engine.phase(0.0, false), 50.0);
}

#[test]
fn test_missing_symbol_is_binding_error() {
    match NativePhaseEngine::load_symbol(fixture_library(), "not_exported_anywhere") {
        Err(Error::SymbolBinding { symbol, .. }) => assert_eq!(symbol, "not_exported_anywhere"),
        other => panic!("expected SymbolBinding error, got {other:?}"),
    }
}

#[test]
fn test_sampling_through_native_engine() {
    let engine = NativePhaseEngine::load(fixture_library()).unwrap();
    let samples = sample_phase(&engine, &FrameGrid::default()).unwrap();
    let dataset = PhaseDataset::from_samples(&samples, SOVEREIGN_THRESHOLD).unwrap();

    assert_eq!(dataset.len(), 500);
    assert_eq!(dataset.sovereign_count(), 500);
    assert_eq!(samples.sphy.first(), Some(&95.0));
    assert_eq!(samples.sphy.last(), Some(&94.0));
    assert_eq!(samples.bell[0], 50.0);
}
