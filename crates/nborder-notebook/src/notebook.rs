//! Notebook document model

use crate::cell::{Cell, ExecutionMarker};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Oldest nbformat major version with a top-level `cells` list
pub const MIN_NBFORMAT: u32 = 4;

/// Jupyter notebook (nbformat 4)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Notebook {
    /// Cells in document order
    pub cells: Vec<Cell>,
    /// Notebook-level metadata (kernelspec, language_info, ...)
    #[serde(default)]
    pub metadata: Map<String, Value>,
    /// Major format version
    pub nbformat: u32,
    /// Minor format version
    pub nbformat_minor: u32,
    /// Unknown top-level fields
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Notebook {
    /// Create empty nbformat 4.5 notebook
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self {
            cells: Vec::new(),
            metadata: Map::new(),
            nbformat: MIN_NBFORMAT,
            nbformat_minor: 5,
            extra: Map::new(),
        }
    }

    /// With cells
    #[inline]
    #[must_use]
    pub fn with_cells(mut self, cells: Vec<Cell>) -> Self {
        self.cells = cells;
        self
    }

    /// Code cells in document order
    pub fn code_cells(&self) -> impl Iterator<Item = &Cell> {
        self.cells.iter().filter(|cell| matches!(cell, Cell::Code(_)))
    }

    /// Execution markers of all non-empty code cells, in document order
    ///
    /// Empty cells are dropped before the marker is read, so an unexecuted
    /// placeholder cell never counts against the notebook.
    #[must_use]
    pub fn execution_sequence(&self) -> Vec<ExecutionMarker> {
        self.code_cells()
            .filter(|cell| !cell.source().is_empty())
            .map(Cell::execution_count)
            .collect()
    }
}

impl Default for Notebook {
    fn default() -> Self {
        Self::new()
    }
}
