//! Check configuration

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Which sub-checks a notebook has to pass
///
/// Every flag defaults to `true`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(default)]
pub struct CheckOptions {
    /// No code cell may be left unexecuted
    pub check_all_executed: bool,
    /// Every code cell executed, in order (all-executed and in-order together)
    pub check_top_to_bottom: bool,
    /// Executed cells follow the order policy
    pub check_in_order: bool,
}

impl CheckOptions {
    /// Create options with every check enabled
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Options with every check disabled
    #[inline]
    #[must_use]
    pub fn none() -> Self {
        Self {
            check_all_executed: false,
            check_top_to_bottom: false,
            check_in_order: false,
        }
    }

    /// With all-executed check
    #[inline]
    #[must_use]
    pub fn with_all_executed(mut self, enabled: bool) -> Self {
        self.check_all_executed = enabled;
        self
    }

    /// With top-to-bottom check
    #[inline]
    #[must_use]
    pub fn with_top_to_bottom(mut self, enabled: bool) -> Self {
        self.check_top_to_bottom = enabled;
        self
    }

    /// With in-order check
    #[inline]
    #[must_use]
    pub fn with_in_order(mut self, enabled: bool) -> Self {
        self.check_in_order = enabled;
        self
    }
}

impl Default for CheckOptions {
    fn default() -> Self {
        Self {
            check_all_executed: true,
            check_top_to_bottom: true,
            check_in_order: true,
        }
    }
}

/// What "in order" means for the executed cells
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrderPolicy {
    /// Markers are exactly 1, 2, ..., N: no gaps, no repeats
    #[default]
    Strict,
    /// Markers are non-decreasing; gaps from re-runs are tolerated
    Sorted,
}

impl OrderPolicy {
    /// Name used on the command line
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Strict => "strict",
            Self::Sorted => "sorted",
        }
    }
}

impl fmt::Display for OrderPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Unknown order policy name
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown order policy '{0}' (expected 'strict' or 'sorted')")]
pub struct UnknownPolicy(pub String);

impl FromStr for OrderPolicy {
    type Err = UnknownPolicy;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "strict" => Ok(Self::Strict),
            "sorted" => Ok(Self::Sorted),
            other => Err(UnknownPolicy(other.to_string())),
        }
    }
}
