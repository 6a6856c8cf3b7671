use tracing::{debug, warn};

use crate::model::interval::max_end;
use crate::model::series::{BUSY, IDLE};
use crate::model::{Interval, UtilizationPoint, UtilizationSeries};

/// Upper bound on buckets so a bogus `total_time` cannot exhaust memory.
const MAX_BUCKETS: usize = 1 << 20;

/// Number of one-unit buckets a series covers.
///
/// A positive finite `total_time` decides; otherwise the latest interval end
/// does. No intervals and no total time means no buckets.
pub fn series_length(intervals: &[Interval], total_time: Option<f64>) -> usize {
    let span = match total_time.filter(|t| t.is_finite() && *t > 0.0) {
        Some(t) => t,
        None => max_end(intervals).unwrap_or(0.0),
    };
    if span <= 0.0 {
        return 0;
    }
    let len = span.ceil() as usize;
    if len > MAX_BUCKETS {
        warn!(len, max = MAX_BUCKETS, "utilization series truncated");
        return MAX_BUCKETS;
    }
    len
}

/// Build a dense 0/100 busy series with one bucket per time unit.
///
/// A bucket is busy when any interval covers part of it. Intervals are
/// assumed sentinel-free, which the parsers guarantee.
pub fn build_utilization(intervals: &[Interval], total_time: Option<f64>) -> UtilizationSeries {
    let len = series_length(intervals, total_time);
    let mut busy = vec![false; len];
    let bound = len as f64;

    for interval in intervals {
        let start = interval.start.clamp(0.0, bound).floor() as usize;
        let end = (interval.end.clamp(0.0, bound).ceil() as usize).min(len);
        if let Some(slots) = busy.get_mut(start..end) {
            slots.fill(true);
        }
    }

    let series = UtilizationSeries::new(
        busy.iter()
            .enumerate()
            .map(|(t, &b)| UtilizationPoint::new(t as f64, Some(if b { BUSY } else { IDLE })))
            .collect(),
    );
    let summary = series.summary();
    debug!(
        len = summary.len,
        busy = summary.busy_count,
        pct = summary.busy_pct,
        "built utilization series"
    );
    series
}
