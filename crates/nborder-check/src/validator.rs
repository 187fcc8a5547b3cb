//! Execution order validation
//!
//! Pure checks over the execution markers of a notebook's non-empty code
//! cells. A notebook in which no cell has ever run passes: it has not been
//! executed out of order, it has not been executed at all.

use crate::options::{CheckOptions, OrderPolicy};
use nborder_notebook::ExecutionMarker;
use std::fmt;

/// Individual sub-check
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CheckKind {
    /// Every cell has a marker
    AllExecuted,
    /// Set markers follow the order policy
    InOrder,
    /// All-executed and in-order together
    TopToBottom,
}

impl fmt::Display for CheckKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::AllExecuted => "all-executed",
            Self::InOrder => "in-order",
            Self::TopToBottom => "top-to-bottom",
        })
    }
}

/// Verdict with the requested sub-checks that failed
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CheckOutcome {
    /// No cell had a marker; the notebook passed without being checked
    pub never_executed: bool,
    /// Requested sub-checks that failed, in evaluation order
    pub failed: Vec<CheckKind>,
}

impl CheckOutcome {
    /// Whether every requested sub-check passed
    #[inline]
    #[must_use]
    pub fn passed(&self) -> bool {
        self.failed.is_empty()
    }
}

impl fmt::Display for CheckOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.never_executed {
            return f.write_str("pass (never executed)");
        }
        if self.passed() {
            return f.write_str("pass");
        }
        f.write_str("fail:")?;
        for kind in &self.failed {
            write!(f, " {kind}")?;
        }
        Ok(())
    }
}

/// Check a sequence with the strict `1..N` order policy
#[inline]
#[must_use]
pub fn check_execution_order(sequence: &[ExecutionMarker], options: CheckOptions) -> bool {
    check_execution_order_with(sequence, options, OrderPolicy::Strict)
}

/// Check a sequence with an explicit order policy
#[inline]
#[must_use]
pub fn check_execution_order_with(
    sequence: &[ExecutionMarker],
    options: CheckOptions,
    policy: OrderPolicy,
) -> bool {
    evaluate(sequence, options, policy).passed()
}

/// Evaluate the requested sub-checks and report which ones failed
#[must_use]
pub fn evaluate(
    sequence: &[ExecutionMarker],
    options: CheckOptions,
    policy: OrderPolicy,
) -> CheckOutcome {
    if sequence.iter().all(Option::is_none) {
        return CheckOutcome {
            never_executed: true,
            failed: Vec::new(),
        };
    }

    let executed = all_executed(sequence);
    let ordered = in_order(sequence, policy);

    let mut failed = Vec::new();
    if options.check_in_order && !ordered {
        failed.push(CheckKind::InOrder);
    }
    if options.check_all_executed && !executed {
        failed.push(CheckKind::AllExecuted);
    }
    if options.check_top_to_bottom && !(executed && ordered) {
        failed.push(CheckKind::TopToBottom);
    }

    CheckOutcome {
        never_executed: false,
        failed,
    }
}

/// No marker is unset
#[inline]
#[must_use]
pub fn all_executed(sequence: &[ExecutionMarker]) -> bool {
    sequence.iter().all(Option::is_some)
}

/// Set markers, with unset ones dropped, satisfy the policy
#[must_use]
pub fn in_order(sequence: &[ExecutionMarker], policy: OrderPolicy) -> bool {
    let mut markers = sequence.iter().flatten().copied();
    match policy {
        OrderPolicy::Strict => markers.zip(1u32..).all(|(marker, expected)| marker == expected),
        OrderPolicy::Sorted => {
            let mut previous = 0;
            markers.all(|marker| {
                let ok = marker >= previous;
                previous = marker;
                ok
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn all() -> CheckOptions {
        CheckOptions::default()
    }

    #[test]
    fn never_executed_passes_regardless_of_flags() {
        for options in [all(), CheckOptions::none(), CheckOptions::none().with_all_executed(true)] {
            assert!(check_execution_order(&[None, None, None], options));
        }
        assert!(evaluate(&[None, None], all(), OrderPolicy::Strict).never_executed);
    }

    #[test]
    fn empty_sequence_passes() {
        assert!(check_execution_order(&[], all()));
    }

    #[test]
    fn sequential_passes_everything() {
        let seq = [Some(1), Some(2), Some(3)];
        assert!(all_executed(&seq));
        assert!(in_order(&seq, OrderPolicy::Strict));
        assert!(check_execution_order(&seq, all()));
    }

    #[test]
    fn swapped_fails_in_order_only() {
        let seq = [Some(2), Some(1), Some(3)];
        assert!(all_executed(&seq));
        assert!(!in_order(&seq, OrderPolicy::Strict));

        let outcome = evaluate(&seq, all(), OrderPolicy::Strict);
        assert_eq!(outcome.failed, vec![CheckKind::InOrder, CheckKind::TopToBottom]);
    }

    #[test]
    fn interleaved_unset_fails_all_executed_only() {
        let seq = [Some(1), None, Some(2)];
        assert!(!all_executed(&seq));
        assert!(in_order(&seq, OrderPolicy::Strict));

        let outcome = evaluate(&seq, all(), OrderPolicy::Strict);
        assert_eq!(outcome.failed, vec![CheckKind::AllExecuted, CheckKind::TopToBottom]);

        let only_order = CheckOptions::none().with_in_order(true);
        assert!(check_execution_order(&seq, only_order));
    }

    #[test]
    fn out_of_order_tail_fails() {
        assert!(!in_order(&[Some(1), Some(3), Some(2)], OrderPolicy::Strict));
    }

    #[test]
    fn strict_rejects_gaps_and_repeats() {
        assert!(!in_order(&[Some(1), Some(3)], OrderPolicy::Strict));
        assert!(!in_order(&[Some(1), Some(1)], OrderPolicy::Strict));
        assert!(!in_order(&[Some(2), Some(3)], OrderPolicy::Strict));
    }

    #[test]
    fn sorted_tolerates_gaps() {
        let seq = [Some(1), Some(3), Some(5)];
        assert!(in_order(&seq, OrderPolicy::Sorted));
        assert!(!in_order(&seq, OrderPolicy::Strict));
        assert!(check_execution_order_with(&seq, all(), OrderPolicy::Sorted));
        assert!(!check_execution_order_with(&[Some(4), Some(2)], all(), OrderPolicy::Sorted));
    }

    #[test]
    fn top_to_bottom_alone() {
        let options = CheckOptions::none().with_top_to_bottom(true);
        assert!(!check_execution_order(&[Some(1), None], options));
        assert!(!check_execution_order(&[Some(2), Some(1)], options));
        assert!(check_execution_order(&[Some(1), Some(2)], options));
    }

    #[test]
    fn no_flags_always_pass() {
        assert!(check_execution_order(&[Some(3), None, Some(1)], CheckOptions::none()));
    }

    #[test]
    fn outcome_display() {
        let outcome = evaluate(&[Some(2), Some(1)], all(), OrderPolicy::Strict);
        assert_eq!(outcome.to_string(), "fail: in-order top-to-bottom");
        assert_eq!(CheckOutcome::default().to_string(), "pass");
    }
}
