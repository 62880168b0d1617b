// Stand-in phase engine, compiled by the tests into a cdylib.

#[no_mangle]
pub extern "C" fn calcular_fase_binaria(frame: f64, vr_active: bool) -> f64 {
    if vr_active {
        95.0 - frame / 100.0
    } else {
        50.0 + 40.0 * (frame / 10.0).sin()
    }
}

#[no_mangle]
pub extern "C" fn phase_inverted(frame: f64, vr_active: bool) -> f64 {
    100.0 - calcular_fase_binaria(frame, vr_active)
}
