//! Run summaries for maintenance operations.

/// Outcome counts for one operation run.
///
/// Operations do not abort on per-record failures, so a run that finishes
/// may still contain failed records; callers read the counts instead of an
/// error.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunSummary {
    /// Records written (created or updated).
    pub written: usize,
    /// Records intentionally skipped (duplicates, unusable fields).
    pub skipped: usize,
    /// Records that failed and were logged.
    pub failed: usize,
}

impl RunSummary {
    /// Total number of records the run looked at.
    pub fn total(&self) -> usize {
        self.written + self.skipped + self.failed
    }
}
