//! Notebook ingress and egress
//!
//! The on-disk form written here matches what Jupyter itself writes: keys
//! sorted, one-space indentation, UTF-8 left unescaped, trailing newline.
//! Rewrites go through a temp file in the target directory that is renamed
//! over the original, so readers see either the old or the new notebook.

use crate::error::{NotebookError, NotebookResult};
use crate::notebook::{Notebook, MIN_NBFORMAT};
use serde::Serialize;
use serde_json::Value;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;

/// Parse notebook JSON; `path` is only used for error reporting
///
/// # Errors
/// - `NotebookError::Parse` if the text is not a valid nbformat 4 notebook
/// - `NotebookError::UnsupportedVersion` for nbformat 3 and older
pub fn from_str(path: impl AsRef<Path>, content: &str) -> NotebookResult<Notebook> {
    let path = path.as_ref();
    let value: Value =
        serde_json::from_str(content).map_err(|e| NotebookError::parse_error(path, e))?;

    // Check the version before the layout, old notebooks have no `cells`
    let major = value
        .get("nbformat")
        .and_then(Value::as_u64)
        .and_then(|v| u32::try_from(v).ok());
    if let Some(major) = major {
        if major < MIN_NBFORMAT {
            return Err(NotebookError::UnsupportedVersion {
                path: path.to_path_buf(),
                major,
            });
        }
    }

    serde_json::from_value(value).map_err(|e| NotebookError::parse_error(path, e))
}

/// Serialize notebook to its on-disk bytes
///
/// # Errors
/// `NotebookError::Serialize` if a field cannot be represented as JSON
pub fn to_vec(notebook: &Notebook) -> NotebookResult<Vec<u8>> {
    // Going through `Value` sorts keys at every level
    let value = serde_json::to_value(notebook).map_err(NotebookError::Serialize)?;

    let mut buf = Vec::with_capacity(4096);
    let formatter = serde_json::ser::PrettyFormatter::with_indent(b" ");
    let mut serializer = serde_json::Serializer::with_formatter(&mut buf, formatter);
    value
        .serialize(&mut serializer)
        .map_err(NotebookError::Serialize)?;
    buf.push(b'\n');
    Ok(buf)
}

/// Serialize notebook to its on-disk text form
///
/// # Errors
/// - `NotebookError::Serialize` if a field cannot be represented as JSON
/// - `NotebookError::Encoding` if the output is not valid UTF-8
pub fn to_string(notebook: &Notebook) -> NotebookResult<String> {
    String::from_utf8(to_vec(notebook)?).map_err(NotebookError::Encoding)
}

/// Read notebook from file
///
/// # Errors
/// - `NotebookError::Io` if the file cannot be read
/// - `NotebookError::Parse` / `UnsupportedVersion` as for [`from_str`]
pub fn read_notebook(path: impl AsRef<Path>) -> NotebookResult<Notebook> {
    let path = path.as_ref();
    let content = fs::read_to_string(path).map_err(|e| NotebookError::io_error(path, e))?;
    let notebook = from_str(path, &content)?;

    tracing::debug!(
        path = %path.display(),
        cells = notebook.cells.len(),
        "read notebook"
    );
    Ok(notebook)
}

/// File a write to `path` lands in
///
/// Symlinks are followed so the linked notebook is rewritten, not the link.
/// A path that does not exist yet is used as given.
fn write_target(path: &Path) -> PathBuf {
    fs::canonicalize(path).unwrap_or_else(|_| path.to_path_buf())
}

/// Write notebook to file, replacing it atomically
///
/// The notebook is serialized completely before anything touches the
/// filesystem. When `path` is a symlink the file it points to is replaced
/// and the link is kept. An existing file keeps its permissions.
///
/// # Errors
/// - `NotebookError::Serialize` if serialization fails (file untouched)
/// - `NotebookError::Io` if the temp file cannot be created or written
/// - `NotebookError::Persist` if the rename over the target fails; the temp
///   file is removed and the target left as it was
pub fn write_notebook(path: impl AsRef<Path>, notebook: &Notebook) -> NotebookResult<()> {
    let bytes = to_vec(notebook)?;
    let target = write_target(path.as_ref());

    let dir = match target.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    let mut tmp = NamedTempFile::new_in(dir).map_err(|e| NotebookError::io_error(dir, e))?;
    tmp.write_all(&bytes)
        .map_err(|e| NotebookError::io_error(tmp.path(), e))?;
    tmp.as_file()
        .sync_all()
        .map_err(|e| NotebookError::io_error(tmp.path(), e))?;

    if let Ok(meta) = fs::metadata(&target) {
        tmp.as_file()
            .set_permissions(meta.permissions())
            .map_err(|e| NotebookError::io_error(tmp.path(), e))?;
    }

    // On failure the temp file is dropped and removed
    tmp.persist(&target).map_err(|e| NotebookError::Persist {
        path: target.clone(),
        source: e.error,
    })?;

    tracing::debug!(path = %target.display(), bytes = bytes.len(), "wrote notebook");
    Ok(())
}
