//! Testing utilities for nborder workspace
//!
//! Shared notebook fixtures and helpers for writing them to temp dirs.

#![allow(missing_docs)]

use nborder_notebook::{read_notebook, write_notebook, Cell, CodeCell, ExecutionMarker, Notebook};
use serde_json::{json, Value};
use std::path::{Path, PathBuf};
use tempfile::TempDir;

pub fn stream_output(text: &str) -> Value {
    json!({
        "name": "stdout",
        "output_type": "stream",
        "text": [text]
    })
}

/// Code cell; executed cells get one stream output
pub fn code_cell(source: &str, marker: ExecutionMarker) -> Cell {
    let mut code = CodeCell::new(source, marker);
    code.extra.insert("metadata".to_string(), json!({}));
    if let Some(count) = marker {
        code.outputs.push(stream_output(&format!("out {count}\n")));
    }
    Cell::Code(code)
}

/// Notebook with a markdown header and one non-empty code cell per marker
pub fn notebook_with_markers(markers: &[ExecutionMarker]) -> Notebook {
    let mut cells = vec![Cell::markdown("# Fixture")];
    cells.extend(
        markers
            .iter()
            .enumerate()
            .map(|(i, marker)| code_cell(&format!("x{i} = {i}"), *marker)),
    );
    Notebook::new().with_cells(cells)
}

pub fn write_fixture(dir: &Path, name: &str, notebook: &Notebook) -> PathBuf {
    let path = dir.join(name);
    write_notebook(&path, notebook).unwrap();
    path
}

pub fn write_markers(dir: &Path, name: &str, markers: &[ExecutionMarker]) -> PathBuf {
    write_fixture(dir, name, &notebook_with_markers(markers))
}

/// Total number of stored outputs across all code cells of a file
pub fn output_count(path: &Path) -> usize {
    read_notebook(path)
        .unwrap()
        .cells
        .iter()
        .map(|cell| match cell {
            Cell::Code(code) => code.outputs.len(),
            Cell::Markdown(_) | Cell::Raw(_) => 0,
        })
        .sum()
}

pub fn temp_dir() -> TempDir {
    tempfile::tempdir().unwrap()
}
