use serde::{Deserialize, Serialize};
use tracing::debug;

use super::run::{RunAnalysis, analyze_run};
use super::summary::{RunSummary, summarize};
use crate::layout::{GanttConfig, GanttLayout, assign_lanes, layout_gantt};
use crate::metrics::{format_quanta, merge_series};
use crate::model::{MergedPoint, ProcessId};
use crate::parsers::{DetectionPolicy, SimulationResult};

/// Knobs for a baseline-vs-compare view.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CompareOptions {
    /// Lane order. Empty means derive it from the results.
    pub process_order: Vec<ProcessId>,
    pub detection: DetectionPolicy,
    pub gantt: GanttConfig,
}

/// Captions shown above each Gantt panel.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct QuantaCaptions {
    pub baseline: String,
    pub compare: String,
}

/// A complete side-by-side view of two runs of the same workload.
#[derive(Debug, Clone, Serialize)]
pub struct Comparison {
    pub baseline: RunAnalysis,
    pub compare: RunAnalysis,
    pub merged_series: Vec<MergedPoint>,
    pub gantt: GanttLayout,
    pub captions: QuantaCaptions,
    pub summary: RunSummary,
}

/// Lane order: explicit option, else the baseline's workload, else the
/// compare run's workload. `None` lets the layout infer it.
fn process_order<'a>(
    options: &'a CompareOptions,
    baseline: &'a RunAnalysis,
    compare: &'a RunAnalysis,
) -> Option<&'a [ProcessId]> {
    [
        options.process_order.as_slice(),
        baseline.processes.as_slice(),
        compare.processes.as_slice(),
    ]
    .into_iter()
    .find(|order| !order.is_empty())
}

pub fn compare_runs(
    baseline: &SimulationResult,
    compare: &SimulationResult,
    options: &CompareOptions,
) -> Comparison {
    let base_run = analyze_run(baseline, options.detection);
    let cmp_run = analyze_run(compare, options.detection);

    let lanes = assign_lanes(
        process_order(options, &base_run, &cmp_run),
        &base_run.intervals,
        &cmp_run.intervals,
    );
    let merged_series = merge_series(&base_run.series, &cmp_run.series);
    let captions = QuantaCaptions {
        baseline: format_quanta(&base_run.quanta, lanes.pids()),
        compare: format_quanta(&cmp_run.quanta, lanes.pids()),
    };
    let summary = summarize(lanes.pids(), (baseline, &base_run), (compare, &cmp_run));
    let gantt = layout_gantt(&base_run.intervals, &cmp_run.intervals, lanes, &options.gantt);

    debug!(
        lanes = gantt.lanes.len(),
        merged = merged_series.len(),
        "built comparison"
    );

    Comparison {
        baseline: base_run,
        compare: cmp_run,
        merged_series,
        gantt,
        captions,
        summary,
    }
}
