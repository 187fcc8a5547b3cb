//! Round-trip tests against notebooks in the layout Jupyter writes

use nborder_notebook::{from_str, read_notebook, to_string, write_notebook, Cell, Source};
use pretty_assertions::assert_eq;
use serde_json::json;

const JUPYTER_NOTEBOOK: &str = r##"{
 "cells": [
  {
   "cell_type": "markdown",
   "id": "0a1b2c3d",
   "metadata": {
    "tags": [
     "intro"
    ]
   },
   "source": [
    "# Analysis\n",
    "Größe der Daten"
   ]
  },
  {
   "cell_type": "code",
   "execution_count": 1,
   "id": "1b2c3d4e",
   "metadata": {
    "collapsed": false
   },
   "outputs": [
    {
     "name": "stdout",
     "output_type": "stream",
     "text": [
      "hello\n"
     ]
    }
   ],
   "source": [
    "print(\"hello\")"
   ]
  },
  {
   "cell_type": "code",
   "execution_count": null,
   "id": "2c3d4e5f",
   "metadata": {},
   "outputs": [],
   "source": []
  },
  {
   "cell_type": "raw",
   "id": "3d4e5f6a",
   "metadata": {},
   "source": "raw text"
  }
 ],
 "metadata": {
  "kernelspec": {
   "display_name": "Python 3",
   "language": "python",
   "name": "python3"
  }
 },
 "nbformat": 4,
 "nbformat_minor": 5
}
"##;

#[test]
fn test_jupyter_layout_roundtrips_byte_for_byte() {
    let notebook = from_str("analysis.ipynb", JUPYTER_NOTEBOOK).unwrap();
    assert_eq!(to_string(&notebook).unwrap(), JUPYTER_NOTEBOOK);
}

#[test]
fn test_model_reflects_document() {
    let notebook = from_str("analysis.ipynb", JUPYTER_NOTEBOOK).unwrap();

    assert_eq!(notebook.cells.len(), 4);
    assert_eq!(notebook.code_cells().count(), 2);
    assert_eq!(notebook.execution_sequence(), vec![Some(1)]);
    assert_eq!(
        notebook.cells[0].source(),
        &Source::Lines(vec!["# Analysis\n".to_string(), "Größe der Daten".to_string()])
    );
    assert_eq!(notebook.cells[3].source(), &Source::Text("raw text".to_string()));
    assert_eq!(notebook.cells[0].extra()["metadata"], json!({"tags": ["intro"]}));
    assert_eq!(notebook.metadata["kernelspec"]["name"], "python3");
}

#[test]
fn test_unknown_top_level_fields_preserved() {
    let content = r#"{"cells": [], "metadata": {}, "nbformat": 4, "nbformat_minor": 4, "x-custom": [1, 2]}"#;
    let notebook = from_str("custom.ipynb", content).unwrap();
    let written: serde_json::Value = serde_json::from_str(&to_string(&notebook).unwrap()).unwrap();

    assert_eq!(written["x-custom"], json!([1, 2]));
    assert_eq!(written["nbformat_minor"], 4);
}

#[test]
fn test_write_then_read_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("notebook.ipynb");

    let notebook = nborder_notebook::Notebook::new().with_cells(vec![
        Cell::markdown("# Title"),
        Cell::code("x = 1", Some(1)),
    ]);
    write_notebook(&path, &notebook).unwrap();

    let read_back = read_notebook(&path).unwrap();
    assert_eq!(read_back, notebook);

    // Only the target remains, the temp file was renamed
    let entries = std::fs::read_dir(dir.path()).unwrap().count();
    assert_eq!(entries, 1);
}

#[test]
fn test_write_replaces_existing_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("notebook.ipynb");
    std::fs::write(&path, JUPYTER_NOTEBOOK).unwrap();

    let notebook = nborder_notebook::Notebook::new();
    write_notebook(&path, &notebook).unwrap();

    assert_eq!(read_notebook(&path).unwrap(), notebook);
}

#[test]
fn test_read_missing_file_is_io_error() {
    let dir = tempfile::tempdir().unwrap();
    let err = read_notebook(dir.path().join("missing.ipynb")).unwrap_err();
    assert!(matches!(err, nborder_notebook::NotebookError::Io { .. }));
}

#[cfg(unix)]
#[test]
fn test_write_through_symlink_replaces_target() {
    let dir = tempfile::tempdir().unwrap();
    let real = dir.path().join("real.ipynb");
    let link = dir.path().join("link.ipynb");
    std::fs::write(&real, JUPYTER_NOTEBOOK).unwrap();
    std::os::unix::fs::symlink(&real, &link).unwrap();

    let notebook = nborder_notebook::Notebook::new().with_cells(vec![Cell::code("y = 2", None)]);
    write_notebook(&link, &notebook).unwrap();

    assert!(std::fs::symlink_metadata(&link).unwrap().file_type().is_symlink());
    assert_eq!(read_notebook(&real).unwrap(), notebook);
    assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 2);
}

#[test]
fn test_failed_replace_leaves_target_and_no_temp_file() {
    let dir = tempfile::tempdir().unwrap();
    let target = dir.path().join("occupied.ipynb");
    std::fs::create_dir(&target).unwrap();
    std::fs::write(target.join("keep.txt"), "keep").unwrap();

    let err = write_notebook(&target, &nborder_notebook::Notebook::new()).unwrap_err();

    assert!(matches!(err, nborder_notebook::NotebookError::Persist { .. }));
    assert!(target.is_dir());
    assert_eq!(std::fs::read_to_string(target.join("keep.txt")).unwrap(), "keep");
    let names: Vec<_> = std::fs::read_dir(dir.path())
        .unwrap()
        .map(|entry| entry.unwrap().file_name())
        .collect();
    assert_eq!(names, vec![std::ffi::OsString::from("occupied.ipynb")]);
}
