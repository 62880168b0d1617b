//! All-or-nothing output of a set of files
//!
//! Each artifact is first written to a hidden temporary file next to its
//! destination. [`StagedOutput::commit`] renames them into place, moving any
//! file already at a destination aside first. If staging fails, or the stage
//! is dropped without committing, the temporary files are removed and no
//! destination is touched. If a commit fails partway, every destination is
//! put back to what it held before the commit.

use crate::error::{Error, Result};
use std::fs::{self, File, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Write `data` to `path` through a temporary file and a rename
pub fn atomic_write(path: &Path, data: &[u8]) -> Result<()> {
    let tmp = temp_path_for(path)?;
    if let Err(e) = write_synced(&tmp, data).and_then(|_| fs::rename(&tmp, path)) {
        let _ = fs::remove_file(&tmp);
        return Err(e.into());
    }
    Ok(())
}

fn temp_path_for(path: &Path) -> Result<PathBuf> {
    sibling_path(path, "tmp")
}

fn backup_path_for(path: &Path) -> Result<PathBuf> {
    sibling_path(path, "bak")
}

/// Hidden `.{name}.{tag}.{pid}` next to `path`
fn sibling_path(path: &Path, tag: &str) -> Result<PathBuf> {
    let name = path
        .file_name()
        .and_then(|n| n.to_str())
        .ok_or_else(|| Error::InvalidPath(format!("{} has no UTF-8 file name", path.display())))?;
    let pid = std::process::id();
    Ok(path.with_file_name(format!(".{name}.{tag}.{pid}")))
}

fn write_synced(path: &Path, data: &[u8]) -> std::io::Result<()> {
    let mut file = OpenOptions::new()
        .write(true)
        .create(true)
        .truncate(true)
        .open(path)?;
    file.write_all(data)?;
    file.sync_all()
}

#[derive(Debug)]
struct StagedFile {
    tmp: PathBuf,
    backup: PathBuf,
    dest: PathBuf,
}

/// A destination replaced during commit
#[derive(Debug)]
struct Swapped {
    dest: PathBuf,
    /// Where the previous file was moved, if there was one
    backup: Option<PathBuf>,
}

impl StagedFile {
    /// Move the previous destination aside, then the new file into place
    fn swap_into_place(&self) -> std::io::Result<Swapped> {
        let backup = match fs::symlink_metadata(&self.dest) {
            Ok(_) => {
                fs::rename(&self.dest, &self.backup)?;
                Some(self.backup.clone())
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => None,
            Err(e) => return Err(e),
        };

        if let Err(e) = fs::rename(&self.tmp, &self.dest) {
            if let Some(backup) = &backup {
                let _ = fs::rename(backup, &self.dest);
            }
            return Err(e);
        }
        Ok(Swapped {
            dest: self.dest.clone(),
            backup,
        })
    }
}

impl Swapped {
    /// Put the previous file back, or remove the new one if there was none
    fn restore(&self) {
        match &self.backup {
            Some(backup) => {
                if let Err(e) = fs::rename(backup, &self.dest) {
                    warn!(dest = %self.dest.display(), error = %e, "Could not restore previous file");
                }
            }
            None => {
                let _ = fs::remove_file(&self.dest);
            }
        }
    }
}

/// A set of files that become visible together
#[derive(Debug, Default)]
pub struct StagedOutput {
    staged: Vec<StagedFile>,
}

impl StagedOutput {
    pub fn new() -> Self {
        Self::default()
    }

    /// Write `data` to a temporary file destined for `dest`
    pub fn stage(&mut self, dest: impl Into<PathBuf>, data: &[u8]) -> Result<()> {
        let dest = dest.into();
        if self.staged.iter().any(|f| f.dest == dest) {
            return Err(Error::InvalidPath(format!(
                "{} staged twice",
                dest.display()
            )));
        }

        let tmp = temp_path_for(&dest)?;
        let backup = backup_path_for(&dest)?;
        if let Err(e) = write_synced(&tmp, data) {
            let _ = fs::remove_file(&tmp);
            return Err(e.into());
        }
        debug!(dest = %dest.display(), bytes = data.len(), "Staged artifact");
        self.staged.push(StagedFile { tmp, backup, dest });
        Ok(())
    }

    /// Destinations staged so far, in staging order
    pub fn destinations(&self) -> impl Iterator<Item = &Path> {
        self.staged.iter().map(|f| f.dest.as_path())
    }

    pub fn len(&self) -> usize {
        self.staged.len()
    }

    pub fn is_empty(&self) -> bool {
        self.staged.is_empty()
    }

    /// Move every staged file into place
    ///
    /// Files already at a destination are moved aside first and removed
    /// once every rename succeeded. If a rename fails, the destinations
    /// handled so far are restored to their previous content and the
    /// remaining temporaries are removed.
    pub fn commit(mut self) -> Result<Vec<PathBuf>> {
        let staged = std::mem::take(&mut self.staged);
        let mut swapped: Vec<Swapped> = Vec::with_capacity(staged.len());

        for (i, file) in staged.iter().enumerate() {
            match file.swap_into_place() {
                Ok(done) => swapped.push(done),
                Err(e) => {
                    warn!(dest = %file.dest.display(), error = %e, "Commit failed, rolling back");
                    for done in swapped.iter().rev() {
                        done.restore();
                    }
                    for rest in &staged[i..] {
                        let _ = fs::remove_file(&rest.tmp);
                    }
                    return Err(e.into());
                }
            }
        }

        for backup in swapped.iter().filter_map(|s| s.backup.as_ref()) {
            let _ = fs::remove_file(backup);
        }
        let committed: Vec<PathBuf> = swapped.into_iter().map(|s| s.dest).collect();
        if let Some(parent) = committed.first().and_then(|p| p.parent()) {
            sync_dir(parent);
        }
        Ok(committed)
    }
}

impl Drop for StagedOutput {
    fn drop(&mut self) {
        for file in self.staged.drain(..) {
            let _ = fs::remove_file(&file.tmp);
        }
    }
}

#[cfg(unix)]
fn sync_dir(dir: &Path) {
    let dir = if dir.as_os_str().is_empty() { Path::new(".") } else { dir };
    if let Ok(handle) = File::open(dir) {
        let _ = handle.sync_all();
    }
}

#[cfg(not(unix))]
fn sync_dir(_dir: &Path) {}
