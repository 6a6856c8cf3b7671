use serde::{Deserialize, Serialize};

use super::ProcessId;

/// CPU occupancy by one process over `[start, end)`.
///
/// Invariant: `end >= start`. Parsers never emit an interval that breaks it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Interval {
    pub pid: ProcessId,
    pub start: f64,
    pub end: f64,
}

impl Interval {
    /// Build an interval, rejecting non-finite bounds, `end < start`, and
    /// sentinel pids.
    pub fn checked(pid: ProcessId, start: f64, end: f64) -> Option<Self> {
        if !start.is_finite() || !end.is_finite() || end < start || pid.is_sentinel() {
            return None;
        }
        Some(Self { pid, start, end })
    }

    pub fn length(&self) -> f64 {
        (self.end - self.start).max(0.0)
    }
}

/// Stable sort by start time. Equal starts keep their input order.
pub fn sort_by_start(intervals: &mut [Interval]) {
    intervals.sort_by(|a, b| a.start.total_cmp(&b.start));
}

/// Largest end value, or `None` for an empty list.
pub fn max_end(intervals: &[Interval]) -> Option<f64> {
    intervals.iter().map(|i| i.end).reduce(f64::max)
}
