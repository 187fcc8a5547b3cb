//! nborder Notebook Model
//!
//! The boundary between notebook files on disk and the typed model the
//! checker works on.
//!
//! # Core Operations
//!
//! - **Ingress**: Parse `.ipynb` JSON into a [`Notebook`]
//! - **Extract**: Pull the execution sequence out of non-empty code cells
//! - **Egress**: Write the notebook back in Jupyter's own layout, atomically
//!
//! # Example
//!
//! ```rust,ignore
//! use nborder_notebook::{read_notebook, write_notebook};
//!
//! let notebook = read_notebook("analysis.ipynb")?;
//! let markers = notebook.execution_sequence();
//! write_notebook("analysis.ipynb", &notebook)?;
//! ```

#![warn(missing_docs)]
#![warn(unreachable_pub)]

pub mod cell;
pub mod error;
pub mod io;
pub mod notebook;

pub use cell::{Cell, CodeCell, ExecutionMarker, Source, TextCell, PROMPT_NUMBER};
pub use error::{NotebookError, NotebookResult};
pub use io::{from_str, read_notebook, to_string, to_vec, write_notebook};
pub use notebook::{Notebook, MIN_NBFORMAT};

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
