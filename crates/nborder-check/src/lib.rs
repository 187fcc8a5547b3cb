//! nborder Execution Order Checker
//!
//! Verifies that the code cells of Jupyter notebooks were run once each, top
//! to bottom, and optionally strips outputs from notebooks that were not.
//! Meant as a pre-commit or CI gate: the binary exits non-zero when any
//! notebook fails.
//!
//! # Checks
//!
//! - **All-executed**: every non-empty code cell has an execution count
//! - **In-order**: the counts that are set read 1, 2, ..., N
//! - **Top-to-bottom**: both of the above
//!
//! A notebook in which no cell has run passes every check.
//!
//! # Example
//!
//! ```rust,ignore
//! use nborder_check::{check_execution_order, CheckOptions};
//!
//! assert!(check_execution_order(&[Some(1), Some(2)], CheckOptions::default()));
//! assert!(!check_execution_order(&[Some(2), Some(1)], CheckOptions::default()));
//! ```

#![warn(missing_docs)]
#![warn(unreachable_pub)]

pub mod batch;
pub mod cli;
pub mod error;
pub mod logging;
pub mod options;
pub mod strip;
pub mod validator;

pub use batch::{check_all_notebooks, BatchReport, BatchRunner, RunnerConfig, StripFailure};
pub use error::{BatchError, BatchResult};
pub use options::{CheckOptions, OrderPolicy, UnknownPolicy};
pub use strip::{strip_cells, strip_output, strip_output_file, FileStripper, OutputStripper};
pub use validator::{
    all_executed, check_execution_order, check_execution_order_with, evaluate, in_order,
    CheckKind, CheckOutcome,
};

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
