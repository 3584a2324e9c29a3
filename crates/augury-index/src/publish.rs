//! Atomic publication of a substrate generation.
//!
//! Artifacts are written into a sibling staging directory, fsynced, then
//! swapped into place with renames. Readers see either the previous complete
//! generation or the new one, never a mix.

use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

use augury_core::errors::{AuguryError, AuguryResult, SubstrateError};
use tracing::{debug, warn};
use uuid::Uuid;

/// A substrate being assembled next to its final location.
///
/// Dropped without `publish`, the staging directory is removed.
#[derive(Debug)]
pub struct StagedSubstrate {
    staging: PathBuf,
    target: PathBuf,
    committed: bool,
}

impl StagedSubstrate {
    /// Create a fresh staging directory beside `target`.
    pub fn create(target: &Path) -> AuguryResult<Self> {
        let parent = parent_dir(target);
        fs::create_dir_all(&parent).map_err(|e| AuguryError::io(&parent, e))?;

        let staging = parent.join(format!(".{}.staging-{}", dir_name(target), Uuid::new_v4()));
        fs::create_dir(&staging).map_err(|e| AuguryError::io(&staging, e))?;
        debug!(staging = %staging.display(), "created staging directory");

        Ok(Self {
            staging,
            target: target.to_path_buf(),
            committed: false,
        })
    }

    pub fn staging_path(&self) -> &Path {
        &self.staging
    }

    /// Write one artifact into the staging directory and fsync it.
    pub fn write(&self, file_name: &str, bytes: &[u8]) -> AuguryResult<()> {
        let path = self.staging.join(file_name);
        let mut file = File::create(&path).map_err(|e| AuguryError::io(&path, e))?;
        file.write_all(bytes).map_err(|e| AuguryError::io(&path, e))?;
        file.sync_all().map_err(|e| AuguryError::io(&path, e))?;
        Ok(())
    }

    /// Swap the staging directory into the target location.
    ///
    /// An existing target is first moved aside and restored if the swap fails.
    pub fn publish(mut self) -> AuguryResult<PathBuf> {
        let parent = parent_dir(&self.target);
        let retired = if self.target.exists() {
            let retired =
                parent.join(format!(".{}.retired-{}", dir_name(&self.target), Uuid::new_v4()));
            fs::rename(&self.target, &retired).map_err(|e| publish_failed(&self.target, e))?;
            Some(retired)
        } else {
            None
        };

        if let Err(e) = fs::rename(&self.staging, &self.target) {
            if let Some(retired) = &retired {
                if let Err(restore) = fs::rename(retired, &self.target) {
                    warn!(
                        error = %restore,
                        retired = %retired.display(),
                        "failed to restore previous substrate"
                    );
                }
            }
            return Err(publish_failed(&self.target, e));
        }
        self.committed = true;

        if let Some(retired) = retired {
            if let Err(e) = fs::remove_dir_all(&retired) {
                warn!(error = %e, retired = %retired.display(), "failed to remove retired substrate");
            }
        }
        sync_dir(&parent);

        Ok(self.target.clone())
    }
}

impl Drop for StagedSubstrate {
    fn drop(&mut self) {
        if !self.committed {
            let _ = fs::remove_dir_all(&self.staging);
        }
    }
}

fn parent_dir(target: &Path) -> PathBuf {
    match target.parent() {
        Some(p) if !p.as_os_str().is_empty() => p.to_path_buf(),
        _ => PathBuf::from("."),
    }
}

fn dir_name(target: &Path) -> String {
    target
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| "substrate".to_string())
}

fn publish_failed(target: &Path, e: std::io::Error) -> AuguryError {
    SubstrateError::PublishFailed {
        reason: format!("{}: {e}", target.display()),
    }
    .into()
}

// Persist the rename itself.
#[cfg(unix)]
fn sync_dir(dir: &Path) {
    if let Ok(handle) = File::open(dir) {
        let _ = handle.sync_all();
    }
}

#[cfg(not(unix))]
fn sync_dir(_dir: &Path) {}
