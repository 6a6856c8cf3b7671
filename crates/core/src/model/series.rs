use serde::{Deserialize, Serialize};

/// CPU busy value of a fully occupied bucket.
pub const BUSY: f64 = 100.0;
/// CPU busy value of an idle bucket.
pub const IDLE: f64 = 0.0;

/// One sample of a utilization series.
///
/// `cpu` is `None` when the bucket was not sampled, which is different
/// from an idle bucket (`Some(0.0)`).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct UtilizationPoint {
    pub time: f64,
    pub cpu: Option<f64>,
}

impl UtilizationPoint {
    pub fn new(time: f64, cpu: Option<f64>) -> Self {
        Self { time, cpu }
    }
}

/// An ordered utilization series for one run.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UtilizationSeries {
    pub points: Vec<UtilizationPoint>,
}

impl UtilizationSeries {
    pub fn new(points: Vec<UtilizationPoint>) -> Self {
        Self { points }
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Known cpu values, skipping unsampled points.
    pub fn values(&self) -> impl Iterator<Item = f64> + '_ {
        self.points.iter().filter_map(|p| p.cpu)
    }

    pub fn summary(&self) -> SeriesSummary {
        let len = self.points.len();
        let busy_count = self.values().filter(|&v| v > IDLE).count();
        let busy_pct = if len == 0 {
            0
        } else {
            (busy_count as f64 / len as f64 * 100.0).round() as u32
        };
        SeriesSummary {
            len,
            busy_count,
            busy_pct,
        }
    }
}

/// Bucket counts describing a series, shown next to single-run charts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeriesSummary {
    pub len: usize,
    pub busy_count: usize,
    /// Busy buckets as a rounded percentage of all buckets.
    pub busy_pct: u32,
}

/// One row of a baseline-vs-compare overlay.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MergedPoint {
    pub time: f64,
    pub base: Option<f64>,
    pub compare: Option<f64>,
}
