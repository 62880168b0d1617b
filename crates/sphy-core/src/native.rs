//! Native phase engine bound through a dynamically loaded library
//!
//! # Safety
//!
//! The exported symbol must have the C signature
//! `double calcular_fase_binaria(double frame, bool vr_active)`.
//! The loader cannot verify this; a library exporting a different
//! signature under the same name is undefined behaviour.

use crate::engine::PhaseEngine;
use crate::error::{Error, Result};
use libloading::{Library, Symbol};
use std::fmt;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Default relative path of the engine library
pub const DEFAULT_LIBRARY_PATH: &str = "./libsphy_engine.so";

/// Name of the exported phase function
pub const PHASE_SYMBOL: &str = "calcular_fase_binaria";

/// C signature of the exported phase function
type RawPhaseFn = unsafe extern "C" fn(f64, bool) -> f64;

/// Phase engine backed by a native shared library
///
/// The library stays loaded for as long as the engine is alive.
pub struct NativePhaseEngine {
    path: PathBuf,
    symbol: String,
    phase_fn: RawPhaseFn,
    // Must outlive `phase_fn`.
    _library: Library,
}

impl NativePhaseEngine {
    /// Load the engine from `path`, binding [`PHASE_SYMBOL`]
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        Self::load_symbol(path, PHASE_SYMBOL)
    }

    /// Load the engine from `path`, binding an explicitly named symbol
    pub fn load_symbol(path: impl AsRef<Path>, symbol: &str) -> Result<Self> {
        let path = resolve_library_path(path.as_ref())?;
        debug!(path = %path.display(), "Opening native phase library");

        // SAFETY: loading runs the library's initialisers. The engine library
        // is trusted input, same as any linked dependency.
        let library = unsafe { Library::new(&path) }.map_err(|source| Error::LibraryLoad {
            path: path.clone(),
            source,
        })?;

        // SAFETY: the symbol type matches the documented C signature; the
        // copied function pointer is only called while `library` is held.
        let phase_fn = unsafe {
            let bound: Symbol<RawPhaseFn> =
                library
                    .get(symbol.as_bytes())
                    .map_err(|source| Error::SymbolBinding {
                        symbol: symbol.to_string(),
                        source,
                    })?;
            *bound
        };

        info!(path = %path.display(), symbol, "Bound native phase engine");

        Ok(Self {
            path,
            symbol: symbol.to_string(),
            phase_fn,
            _library: library,
        })
    }

    /// Absolute path the library was loaded from
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Name of the bound symbol
    pub fn symbol(&self) -> &str {
        &self.symbol
    }
}

impl PhaseEngine for NativePhaseEngine {
    #[inline]
    fn phase(&self, frame: f64, vr_active: bool) -> f64 {
        // SAFETY: see module docs; `_library` keeps the code mapped.
        unsafe { (self.phase_fn)(frame, vr_active) }
    }
}

impl fmt::Debug for NativePhaseEngine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NativePhaseEngine")
            .field("path", &self.path)
            .field("symbol", &self.symbol)
            .finish_non_exhaustive()
    }
}

/// Resolve a library path against the current working directory
///
/// Absolute paths are returned unchanged. The file is not required to exist.
pub fn resolve_library_path(path: &Path) -> Result<PathBuf> {
    if path.is_absolute() {
        return Ok(path.to_path_buf());
    }
    let cwd = std::env::current_dir()?;
    let stripped = path.strip_prefix(".").unwrap_or(path);
    Ok(cwd.join(stripped))
}
