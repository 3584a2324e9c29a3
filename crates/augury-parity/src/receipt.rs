//! Write-once parity receipts.

use std::fs;
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

use augury_core::errors::{AuguryError, AuguryResult, ParityError};
use augury_core::ParityReceipt;
use tracing::info;
use uuid::Uuid;

/// Write `receipt` to `path`, refusing to replace an existing file.
///
/// The JSON is written and fsynced under a temporary name, then hard-linked
/// to `path`. The link fails if `path` exists, so a receipt is never
/// overwritten and never observed half-written.
pub fn write_receipt(path: &Path, receipt: &ParityReceipt) -> AuguryResult<()> {
    if path.exists() {
        return Err(exists(path));
    }
    let dir = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p.to_path_buf(),
        _ => PathBuf::from("."),
    };
    fs::create_dir_all(&dir).map_err(|e| AuguryError::io(&dir, e))?;

    let bytes = serde_json::to_vec_pretty(receipt)?;
    let tmp = dir.join(format!(".receipt-{}.tmp", Uuid::new_v4()));
    let result = write_synced(&tmp, &bytes).and_then(|()| match fs::hard_link(&tmp, path) {
        Ok(()) => Ok(()),
        Err(e) if e.kind() == ErrorKind::AlreadyExists => Err(exists(path)),
        Err(e) => Err(AuguryError::io(path, e)),
    });
    let _ = fs::remove_file(&tmp);
    result?;

    info!(path = %path.display(), status = ?receipt.status, "parity receipt written");
    Ok(())
}

/// Read a previously written receipt.
pub fn read_receipt(path: &Path) -> AuguryResult<ParityReceipt> {
    let bytes = fs::read(path).map_err(|e| AuguryError::io(path, e))?;
    Ok(serde_json::from_slice(&bytes)?)
}

fn write_synced(path: &Path, bytes: &[u8]) -> AuguryResult<()> {
    let mut file = fs::File::create(path).map_err(|e| AuguryError::io(path, e))?;
    file.write_all(bytes).map_err(|e| AuguryError::io(path, e))?;
    file.sync_all().map_err(|e| AuguryError::io(path, e))
}

fn exists(path: &Path) -> AuguryError {
    ParityError::ReceiptExists {
        path: path.display().to_string(),
    }
    .into()
}
