//! Result aggregation and reporting.
//!
//! A [`CheckReport`] is an ordered, append-only log of check outcomes. Entries
//! are appended in evaluation order as pending results and finalized through
//! the [`CheckHandle`] returned by [`CheckReport::append`].

use crate::CheckName;
use serde::Serialize;

/// Outcome of one evaluated (or pending) check.
///
/// `message` is empty when `passed` is true and carries a human-readable
/// explanation when `passed` is false.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CheckResult {
    pub name: CheckName,
    pub passed: bool,
    pub message: String,
}

impl CheckResult {
    fn pending(name: CheckName) -> Self {
        CheckResult {
            name,
            passed: false,
            message: String::new(),
        }
    }

    /// True until the entry has been finalized with a verdict.
    pub fn is_pending(&self) -> bool {
        !self.passed && self.message.is_empty()
    }
}

/// Identifies one appended entry in a [`CheckReport`].
///
/// Not `Clone`: finalizing consumes the handle, so each entry gets exactly one
/// verdict.
#[derive(Debug, PartialEq, Eq)]
#[must_use = "an appended check stays pending until its handle is finalized"]
pub struct CheckHandle {
    index: usize,
    name: CheckName,
}

impl CheckHandle {
    /// The check this handle was appended for.
    pub fn name(&self) -> CheckName {
        self.name
    }
}

/// Result summary statistics
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct CheckSummary {
    pub passed: u32,
    pub failed: u32,
    pub total: u32,
}

/// Ordered report of check outcomes for one topic.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CheckReport {
    results: Vec<CheckResult>,
}

impl CheckReport {
    /// Create a new empty report
    pub fn new() -> Self {
        CheckReport {
            results: Vec::new(),
        }
    }

    /// Append a pending result for `name` to the end of the report.
    pub fn append(&mut self, name: CheckName) -> CheckHandle {
        self.results.push(CheckResult::pending(name));
        CheckHandle {
            index: self.results.len() - 1,
            name,
        }
    }

    /// Record the verdict for the entry identified by `handle`.
    ///
    /// A passing verdict always clears the message. A failing verdict with an
    /// empty message is given a generic one so that failed entries are never
    /// indistinguishable from pending ones.
    pub fn finalize(&mut self, handle: CheckHandle, passed: bool, message: impl Into<String>) {
        debug_assert!(
            self.results.get(handle.index).map(|r| r.name) == Some(handle.name),
            "check handle from another report"
        );

        if let Some(entry) = self.results.get_mut(handle.index) {
            entry.passed = passed;
            entry.message = if passed {
                String::new()
            } else {
                let message = message.into();
                if message.is_empty() {
                    format!("{} check failed", entry.name)
                } else {
                    message
                }
            };
        }
    }

    /// Finalize `handle` as passed.
    pub fn pass(&mut self, handle: CheckHandle) {
        self.finalize(handle, true, "");
    }

    /// Finalize `handle` as failed with `message`.
    pub fn fail(&mut self, handle: CheckHandle, message: impl Into<String>) {
        self.finalize(handle, false, message);
    }

    /// All results in evaluation order.
    pub fn results(&self) -> &[CheckResult] {
        &self.results
    }

    pub fn len(&self) -> usize {
        self.results.len()
    }

    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
    }

    /// Look up the result for a specific check, if it was evaluated.
    pub fn get(&self, name: CheckName) -> Option<&CheckResult> {
        self.results.iter().find(|r| r.name == name)
    }

    /// Names of the evaluated checks, in order.
    pub fn names(&self) -> Vec<CheckName> {
        self.results.iter().map(|r| r.name).collect()
    }

    /// True when every entry in the report passed.
    ///
    /// An empty report counts as passing; callers that need at least one
    /// evaluated check should also test [`CheckReport::is_empty`].
    pub fn all_passed(&self) -> bool {
        self.results.iter().all(|r| r.passed)
    }

    /// Get only failed checks
    pub fn failures(&self) -> Vec<&CheckResult> {
        self.results.iter().filter(|r| !r.passed).collect()
    }

    /// Calculate summary statistics
    pub fn summary(&self) -> CheckSummary {
        let mut summary = CheckSummary::default();

        for result in &self.results {
            summary.total += 1;
            if result.passed {
                summary.passed += 1;
            } else {
                summary.failed += 1;
            }
        }

        summary
    }
}

impl IntoIterator for CheckReport {
    type Item = CheckResult;
    type IntoIter = std::vec::IntoIter<CheckResult>;

    fn into_iter(self) -> Self::IntoIter {
        self.results.into_iter()
    }
}

impl<'a> IntoIterator for &'a CheckReport {
    type Item = &'a CheckResult;
    type IntoIter = std::slice::Iter<'a, CheckResult>;

    fn into_iter(self) -> Self::IntoIter {
        self.results.iter()
    }
}
