//! Batch runner
//!
//! Loads each notebook, checks it, and reports the failures in the order the
//! paths were given. With `jobs > 1` the load-and-check phase runs on a
//! bounded worker pool; reporting and stripping always run afterwards, one
//! notebook at a time, so a file is only rewritten once its own check is done.

use crate::error::{BatchError, BatchResult};
use crate::options::{CheckOptions, OrderPolicy};
use crate::strip::{FileStripper, OutputStripper};
use crate::validator::evaluate;
use indexmap::IndexMap;
use nborder_notebook::{read_notebook, NotebookError};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use std::io::Write;
use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Batch runner configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RunnerConfig {
    /// Sub-checks every notebook has to pass
    pub options: CheckOptions,
    /// Order policy for the in-order check
    pub policy: OrderPolicy,
    /// Strip outputs from failing notebooks
    pub strip_on_fail: bool,
    /// Notebooks checked concurrently (1 = sequential)
    pub jobs: usize,
}

impl RunnerConfig {
    /// Create default configuration
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// With check options
    #[inline]
    #[must_use]
    pub fn with_options(mut self, options: CheckOptions) -> Self {
        self.options = options;
        self
    }

    /// With order policy
    #[inline]
    #[must_use]
    pub fn with_policy(mut self, policy: OrderPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// With strip-on-fail
    #[inline]
    #[must_use]
    pub fn with_strip_on_fail(mut self, strip_on_fail: bool) -> Self {
        self.strip_on_fail = strip_on_fail;
        self
    }

    /// With worker count (at least 1)
    #[inline]
    #[must_use]
    pub fn with_jobs(mut self, jobs: usize) -> Self {
        self.jobs = jobs.max(1);
        self
    }
}

impl Default for RunnerConfig {
    fn default() -> Self {
        Self {
            options: CheckOptions::default(),
            policy: OrderPolicy::Strict,
            strip_on_fail: false,
            jobs: 1,
        }
    }
}

/// Strip attempt that failed
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StripFailure {
    /// Notebook that could not be rewritten
    pub path: PathBuf,
    /// Error message
    pub message: String,
}

/// Outcome of a batch run
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BatchReport {
    /// Verdict per notebook, in the order given
    pub results: IndexMap<PathBuf, bool>,
    /// Failing notebooks whose outputs were stripped
    pub stripped: Vec<PathBuf>,
    /// Failing notebooks whose stripping failed
    pub strip_failures: Vec<StripFailure>,
}

impl BatchReport {
    /// Whether every notebook passed
    #[inline]
    #[must_use]
    pub fn passed(&self) -> bool {
        self.results.values().all(|passed| *passed)
    }

    /// Failing notebooks, in the order given
    pub fn failed(&self) -> impl Iterator<Item = &Path> {
        self.results
            .iter()
            .filter(|(_, passed)| !**passed)
            .map(|(path, _)| path.as_path())
    }
}

/// Checks a set of notebooks and reports failures
#[derive(Clone)]
pub struct BatchRunner {
    config: RunnerConfig,
    stripper: Arc<dyn OutputStripper>,
}

impl fmt::Debug for BatchRunner {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BatchRunner")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl Default for BatchRunner {
    fn default() -> Self {
        Self::new(RunnerConfig::default())
    }
}

impl BatchRunner {
    /// Create runner with configuration
    #[inline]
    #[must_use]
    pub fn new(config: RunnerConfig) -> Self {
        Self {
            config,
            stripper: Arc::new(FileStripper),
        }
    }

    /// With a custom stripper for failing notebooks
    #[inline]
    #[must_use]
    pub fn with_stripper(mut self, stripper: impl OutputStripper + 'static) -> Self {
        self.stripper = Arc::new(stripper);
        self
    }

    /// Runner configuration
    #[inline]
    #[must_use]
    pub fn config(&self) -> &RunnerConfig {
        &self.config
    }

    /// Check a single notebook file
    ///
    /// # Errors
    /// Read or parse failure of the notebook
    pub fn check_notebook(&self, path: &Path) -> Result<bool, NotebookError> {
        let notebook = read_notebook(path)?;
        let sequence = notebook.execution_sequence();
        let outcome = evaluate(&sequence, self.config.options, self.config.policy);

        tracing::debug!(
            path = %path.display(),
            markers = ?sequence,
            outcome = %outcome,
            "checked notebook"
        );
        Ok(outcome.passed())
    }

    /// Check every path, write one line per failing notebook to `out`
    ///
    /// # Errors
    /// - `BatchError::Notebook` on the first notebook that cannot be loaded
    /// - `BatchError::Output` if `out` cannot be written
    /// - `BatchError::ThreadPool` if the worker pool cannot be built
    pub fn run<P, W>(&self, paths: &[P], out: &mut W) -> BatchResult<BatchReport>
    where
        P: AsRef<Path> + Sync,
        W: Write,
    {
        tracing::info!(
            notebooks = paths.len(),
            policy = %self.config.policy,
            jobs = self.config.jobs,
            "checking notebooks"
        );

        let mut report = BatchReport::default();
        for (path, passed) in self.check_paths(paths)? {
            report.results.insert(path, passed);
        }

        let failed: Vec<PathBuf> = report.failed().map(Path::to_path_buf).collect();
        for path in failed {
            writeln!(out, "Notebook {} not executed top to bottom!", path.display())?;
            if !self.config.strip_on_fail {
                continue;
            }

            writeln!(out, "  Stripping all output")?;
            match self.stripper.strip(&path) {
                Ok(_) => report.stripped.push(path),
                Err(e) => {
                    tracing::error!(path = %path.display(), error = %e, "failed to strip output");
                    report.strip_failures.push(StripFailure {
                        path,
                        message: e.to_string(),
                    });
                }
            }
        }

        tracing::info!(
            checked = report.results.len(),
            failed = report.failed().count(),
            "check complete"
        );
        Ok(report)
    }

    fn check_paths<P>(&self, paths: &[P]) -> BatchResult<Vec<(PathBuf, bool)>>
    where
        P: AsRef<Path> + Sync,
    {
        let check = |path: &P| -> Result<(PathBuf, bool), NotebookError> {
            let path = path.as_ref();
            Ok((path.to_path_buf(), self.check_notebook(path)?))
        };

        if self.config.jobs <= 1 || paths.len() <= 1 {
            return paths
                .iter()
                .map(check)
                .collect::<Result<_, _>>()
                .map_err(BatchError::from);
        }

        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(self.config.jobs)
            .build()
            .map_err(|e| BatchError::ThreadPool(e.to_string()))?;

        // Indexed collect keeps the input order
        pool.install(|| paths.par_iter().map(check).collect::<Result<Vec<_>, _>>())
            .map_err(BatchError::from)
    }
}

/// Check notebooks with default options, reporting failures on stdout
///
/// Returns `Ok(true)` iff every notebook passed.
///
/// # Errors
/// Any notebook that cannot be read or parsed aborts the run.
pub fn check_all_notebooks<P>(paths: &[P], strip_on_fail: bool) -> BatchResult<bool>
where
    P: AsRef<Path> + Sync,
{
    let runner = BatchRunner::new(RunnerConfig::new().with_strip_on_fail(strip_on_fail));
    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    let report = runner.run(paths, &mut out)?;
    Ok(report.passed())
}
