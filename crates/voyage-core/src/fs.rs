//! Atomic file replacement for persisted state.

use std::fs::{self, OpenOptions};
use std::io::{self, Write};
use std::path::Path;
use std::time::{SystemTime, UNIX_EPOCH};

use crate::error::{Result, VoyageError};

/// Write `data` to `path` through a sibling temp file, so readers see either
/// the old contents or the new ones.
///
/// On Unix the file is created with mode `0600`.
///
/// # Errors
///
/// Returns `VoyageError::Storage` if the temp file cannot be created, written,
/// synced, or moved into place.
pub fn write_atomic(path: &Path, data: &[u8]) -> Result<()> {
    let parent = path
        .parent()
        .ok_or_else(|| VoyageError::Storage(format!("No parent directory: {}", path.display())))?;
    let filename = path
        .file_name()
        .and_then(|name| name.to_str())
        .ok_or_else(|| VoyageError::Storage(format!("Invalid filename: {}", path.display())))?;
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map_err(|e| VoyageError::Storage(format!("System time error: {}", e)))?
        .as_nanos();
    let temp_path = parent.join(format!(".{}.{}.tmp", filename, nanos));

    let mut options = OpenOptions::new();
    options.write(true).create_new(true);
    #[cfg(unix)]
    {
        use std::os::unix::fs::OpenOptionsExt;
        options.mode(0o600);
    }

    let mut file = options
        .open(&temp_path)
        .map_err(|e| VoyageError::Storage(format!("Temp file create failed: {}", e)))?;
    if let Err(e) = file.write_all(data).and_then(|()| file.sync_all()) {
        let _ = fs::remove_file(&temp_path);
        return Err(VoyageError::Storage(format!("Temp file write failed: {}", e)));
    }
    drop(file);

    rename_with_fallback(&temp_path, path)
        .map_err(|e| VoyageError::Storage(format!("Atomic rename failed: {}", e)))
}

/// Rename a file, removing the destination and retrying when the platform
/// refuses to overwrite. The temp file is removed if both attempts fail.
pub fn rename_with_fallback(temp_path: &Path, destination: &Path) -> io::Result<()> {
    if let Err(first) = fs::rename(temp_path, destination) {
        let _ = fs::remove_file(destination);
        fs::rename(temp_path, destination).map_err(|second| {
            let _ = fs::remove_file(temp_path);
            io::Error::new(
                second.kind(),
                format!("first attempt: {}, retry: {}", first, second),
            )
        })?;
    }
    Ok(())
}
