//! Notebook cells
//!
//! Cells are a tagged variant keyed by the JSON `cell_type` field. Only code
//! cells carry an execution marker and outputs; every other field is kept in
//! an open map so a rewrite does not lose metadata the model does not know.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::borrow::Cow;

/// Execution marker recorded for a code cell
///
/// `Some(n)` when the cell was the n-th run in the kernel session, `None`
/// when it was never run.
pub type ExecutionMarker = Option<u32>;

/// Legacy execution prompt field from pre-4 notebooks
pub const PROMPT_NUMBER: &str = "prompt_number";

/// Cell source text
///
/// nbformat allows either a single string or a list of lines that
/// concatenate to the full text. The form read is the form written back.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Source {
    /// Whole source as one string
    Text(String),
    /// Source split into lines (each keeps its trailing newline)
    Lines(Vec<String>),
}

impl Source {
    /// Full source text
    #[must_use]
    pub fn text(&self) -> Cow<'_, str> {
        match self {
            Self::Text(text) => Cow::Borrowed(text),
            Self::Lines(lines) => Cow::Owned(lines.concat()),
        }
    }

    /// Whether the source is the empty string
    ///
    /// Whitespace-only source is not empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        match self {
            Self::Text(text) => text.is_empty(),
            Self::Lines(lines) => lines.iter().all(String::is_empty),
        }
    }
}

impl Default for Source {
    fn default() -> Self {
        Self::Text(String::new())
    }
}

impl From<&str> for Source {
    fn from(text: &str) -> Self {
        Self::Text(text.to_string())
    }
}

/// Code cell
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct CodeCell {
    /// Cell source
    #[serde(default)]
    pub source: Source,
    /// Execution marker (`null` in JSON when never run)
    #[serde(default)]
    pub execution_count: ExecutionMarker,
    /// Stored outputs, kept opaque
    #[serde(default)]
    pub outputs: Vec<Value>,
    /// Remaining fields (`id`, `metadata`, legacy keys)
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl CodeCell {
    /// Create code cell with source and execution marker
    #[must_use]
    pub fn new(source: impl Into<Source>, execution_count: ExecutionMarker) -> Self {
        Self {
            source: source.into(),
            execution_count,
            ..Self::default()
        }
    }
}

/// Markdown or raw cell
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct TextCell {
    /// Cell source
    #[serde(default)]
    pub source: Source,
    /// Remaining fields (`id`, `metadata`, `attachments`, legacy keys)
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl TextCell {
    /// Create text cell with source
    #[must_use]
    pub fn new(source: impl Into<Source>) -> Self {
        Self {
            source: source.into(),
            extra: Map::new(),
        }
    }
}

/// Notebook cell
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "cell_type", rename_all = "lowercase")]
pub enum Cell {
    /// Executable code cell
    Code(CodeCell),
    /// Markdown prose
    Markdown(TextCell),
    /// Raw, unrendered content
    Raw(TextCell),
}

impl Cell {
    /// Create code cell
    #[must_use]
    pub fn code(source: impl Into<Source>, execution_count: ExecutionMarker) -> Self {
        Self::Code(CodeCell::new(source, execution_count))
    }

    /// Create markdown cell
    #[must_use]
    pub fn markdown(source: impl Into<Source>) -> Self {
        Self::Markdown(TextCell::new(source))
    }

    /// Create raw cell
    #[must_use]
    pub fn raw(source: impl Into<Source>) -> Self {
        Self::Raw(TextCell::new(source))
    }

    /// `cell_type` as written in the notebook
    #[must_use]
    pub fn cell_type(&self) -> &'static str {
        match self {
            Self::Code(_) => "code",
            Self::Markdown(_) => "markdown",
            Self::Raw(_) => "raw",
        }
    }

    /// Cell source
    #[must_use]
    pub fn source(&self) -> &Source {
        match self {
            Self::Code(cell) => &cell.source,
            Self::Markdown(cell) | Self::Raw(cell) => &cell.source,
        }
    }

    /// Fields outside the typed model
    #[must_use]
    pub fn extra(&self) -> &Map<String, Value> {
        match self {
            Self::Code(cell) => &cell.extra,
            Self::Markdown(cell) | Self::Raw(cell) => &cell.extra,
        }
    }

    /// Mutable access to fields outside the typed model
    pub fn extra_mut(&mut self) -> &mut Map<String, Value> {
        match self {
            Self::Code(cell) => &mut cell.extra,
            Self::Markdown(cell) | Self::Raw(cell) => &mut cell.extra,
        }
    }

    /// Execution marker, `None` for non-code cells
    #[must_use]
    pub fn execution_count(&self) -> ExecutionMarker {
        match self {
            Self::Code(cell) => cell.execution_count,
            Self::Markdown(_) | Self::Raw(_) => None,
        }
    }
}
