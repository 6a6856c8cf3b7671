use serde::Serialize;
use serde_json::Value;
use tracing::debug;

use crate::metrics::{QuantumMap, build_utilization, context_switches, resolve_quanta};
use crate::model::{Interval, ProcessId, UtilizationSeries};
use crate::parsers::{DetectionPolicy, SimulationResult, normalize_series, normalize_timeline_with};

/// Where a run's intervals came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TimelineSource {
    MemoryTimeline,
    Trace,
    None,
}

/// Where a run's utilization series came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SeriesSource {
    Precomputed,
    Built,
}

/// Everything derived from a single simulation result.
#[derive(Debug, Clone, Serialize)]
pub struct RunAnalysis {
    pub intervals: Vec<Interval>,
    pub timeline_source: TimelineSource,
    pub series: UtilizationSeries,
    pub series_source: SeriesSource,
    pub quanta: QuantumMap,
    /// Process ids from the workload input, sentinels removed.
    pub processes: Vec<ProcessId>,
    pub context_switches: u64,
    pub total_time: Option<f64>,
}

fn non_empty_array(value: &Value) -> bool {
    value.as_array().is_some_and(|a| !a.is_empty())
}

/// Derive intervals, series, quanta and switch count from one result.
pub fn analyze_run(result: &SimulationResult, policy: DetectionPolicy) -> RunAnalysis {
    let (timeline_source, intervals) = if non_empty_array(&result.memory_timeline) {
        (
            TimelineSource::MemoryTimeline,
            normalize_timeline_with(&result.memory_timeline, policy),
        )
    } else if non_empty_array(&result.trace) {
        (
            TimelineSource::Trace,
            normalize_timeline_with(&result.trace, policy),
        )
    } else {
        (TimelineSource::None, Vec::new())
    };

    let total_time = result.total_time();
    let (series_source, series) = if non_empty_array(&result.cpu_series) {
        (SeriesSource::Precomputed, normalize_series(&result.cpu_series))
    } else {
        (SeriesSource::Built, build_utilization(&intervals, total_time))
    };

    let processes = result.input_processes();
    let quanta = resolve_quanta(&intervals, &processes, result.explicit_quanta());
    let context_switches = result
        .reported_context_switches()
        .unwrap_or_else(|| context_switches(&intervals));

    debug!(
        ?timeline_source,
        ?series_source,
        intervals = intervals.len(),
        points = series.len(),
        context_switches,
        "analyzed run"
    );

    RunAnalysis {
        intervals,
        timeline_source,
        series,
        series_source,
        quanta,
        processes,
        context_switches,
        total_time,
    }
}
