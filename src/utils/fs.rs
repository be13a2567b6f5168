//! Text file helpers: whole-file UTF-8 reads and atomic replace-by-rename writes.

use std::{
    fs,
    io::Write,
    path::Path,
};

use tempfile::NamedTempFile;

use crate::error::{PatchError, Result};

/// Reads the whole file as UTF-8.
pub fn read_text(path: &Path) -> Result<String> {
    fs::read_to_string(path).map_err(|e| PatchError::from_io(path, "failed to read", e))
}

/// Replaces `path` with `contents` through a temporary file in the same directory.
///
/// The temporary file is renamed over the target only after it has been fully written and
/// flushed, so an interrupted run leaves the previous contents in place. Permissions of an
/// existing target are carried over to the new file. A symlinked target is resolved first, so
/// the file it points to is replaced and the link itself stays.
pub fn write_atomic(path: &Path, contents: &str) -> Result<()> {
    let resolved = fs::canonicalize(path).ok();
    let path = resolved.as_deref().unwrap_or(path);
    let parent = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    let mut temp = NamedTempFile::new_in(parent)
        .map_err(|e| PatchError::from_io(parent, "failed to create temp file in", e))?;

    if let Ok(meta) = fs::metadata(path) {
        temp.as_file()
            .set_permissions(meta.permissions())
            .map_err(|e| PatchError::from_io(temp.path(), "failed to set permissions on", e))?;
    }

    temp.write_all(contents.as_bytes())
        .map_err(|e| PatchError::from_io(temp.path(), "failed to write", e))?;
    temp.as_file()
        .sync_all()
        .map_err(|e| PatchError::from_io(temp.path(), "failed to flush", e))?;

    temp.persist(path)
        .map_err(|e| PatchError::from_io(path, "failed to replace", e.error))?;
    Ok(())
}

/// Copies `from` to `to`, overwriting `to`.
pub fn copy(from: &Path, to: &Path) -> Result<()> {
    fs::copy(from, to)
        .map(|_| ())
        .map_err(|e| PatchError::from_io(from, "failed to back up", e))
}
