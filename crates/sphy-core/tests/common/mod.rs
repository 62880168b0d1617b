//! Builds the stand-in phase engine in `fixtures/` as a shared library
//!
//! The library is compiled once per test binary with the same toolchain
//! that runs the tests.

use std::env::consts::{DLL_PREFIX, DLL_SUFFIX, EXE_SUFFIX};
use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;
use std::sync::OnceLock;

const FIXTURE_SOURCE: &str = include_str!("../fixtures/phase_engine.rs");

/// Path of the compiled fixture library
pub fn fixture_library() -> &'static Path {
    static LIBRARY: OnceLock<PathBuf> = OnceLock::new();
    LIBRARY.get_or_init(build_fixture)
}

fn rustc() -> PathBuf {
    if let Some(rustc) = std::env::var_os("RUSTC") {
        return rustc.into();
    }
    let sibling = Path::new(env!("CARGO")).with_file_name(format!("rustc{EXE_SUFFIX}"));
    if sibling.exists() {
        sibling
    } else {
        PathBuf::from("rustc")
    }
}

fn build_fixture() -> PathBuf {
    let dir = std::env::temp_dir().join(format!("sphy-engine-fixture-{}", std::process::id()));
    fs::create_dir_all(&dir).unwrap();
    let source = dir.join("phase_engine.rs");
    fs::write(&source, FIXTURE_SOURCE).unwrap();

    let library = dir.join(format!("{DLL_PREFIX}sphy_engine{DLL_SUFFIX}"));
    let output = Command::new(rustc())
        .args(["--edition", "2021", "--crate-type", "cdylib", "--crate-name", "sphy_engine"])
        .arg("-o")
        .arg(&library)
        .arg(&source)
        .output()
        .unwrap();
    assert!(
        output.status.success(),
        "fixture build failed:\n{}",
        String::from_utf8_lossy(&output.stderr)
    );
    library
}
