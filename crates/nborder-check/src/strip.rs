//! Output stripping
//!
//! Clears stored outputs from any cell that carries them and drops the
//! legacy `prompt_number` field from any cell. Execution markers are left as they
//! are. Stripping an already stripped notebook changes nothing.

use nborder_notebook::{read_notebook, write_notebook, Cell, Notebook, NotebookResult, PROMPT_NUMBER};
use serde_json::Value;
use std::path::Path;

const OUTPUTS: &str = "outputs";

/// Rewrites a notebook file without its outputs
///
/// The batch runner strips failing notebooks through this seam.
pub trait OutputStripper: Send + Sync {
    /// Strip the notebook at `path`, returning how many cells changed
    ///
    /// # Errors
    /// Any read, parse or write error; the file is left as it was
    fn strip(&self, path: &Path) -> NotebookResult<usize>;
}

/// Strips notebook files in place with [`strip_output_file`]
#[derive(Debug, Clone, Copy, Default)]
pub struct FileStripper;

impl OutputStripper for FileStripper {
    fn strip(&self, path: &Path) -> NotebookResult<usize> {
        strip_output_file(path)
    }
}

/// Strip outputs from an in-memory notebook
#[must_use]
pub fn strip_output(mut notebook: Notebook) -> Notebook {
    strip_cells(&mut notebook);
    notebook
}

/// Strip outputs in place, returning how many cells changed
pub fn strip_cells(notebook: &mut Notebook) -> usize {
    let mut changed = 0;
    for cell in &mut notebook.cells {
        let mut touched = cell.extra_mut().remove(PROMPT_NUMBER).is_some();
        match cell {
            Cell::Code(code) => {
                if !code.outputs.is_empty() {
                    code.outputs.clear();
                    touched = true;
                }
            }
            // Not valid nbformat 4, but cleared the same way when present
            Cell::Markdown(text) | Cell::Raw(text) => {
                if let Some(outputs) = text.extra.get_mut(OUTPUTS) {
                    if outputs.as_array().map_or(true, |list| !list.is_empty()) {
                        *outputs = Value::Array(Vec::new());
                        touched = true;
                    }
                }
            }
        }
        if touched {
            changed += 1;
        }
    }
    changed
}

/// Strip outputs from a notebook file and rewrite it atomically
///
/// # Errors
/// Any read, parse or write error from the notebook layer. On a write error
/// the file on disk is the version that was read.
pub fn strip_output_file(path: impl AsRef<Path>) -> NotebookResult<usize> {
    let path = path.as_ref();
    let mut notebook = read_notebook(path)?;
    let changed = strip_cells(&mut notebook);
    write_notebook(path, &notebook)?;

    tracing::info!(path = %path.display(), cells = changed, "stripped notebook output");
    Ok(changed)
}
