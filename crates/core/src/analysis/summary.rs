use serde::Serialize;

use super::run::RunAnalysis;
use crate::model::ProcessId;
use crate::parsers::SimulationResult;

/// Nominal memory slot per process, in MB, for the utilization estimate.
const MEMORY_SLOT_MB: f64 = 320.0;

/// One row of the per-process table. Timing values are only what the
/// results report; nothing is synthesized.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProcessRow {
    pub pid: ProcessId,
    pub memory_estimate: Option<f64>,
    /// Quantum used by the compare run.
    pub quantum: u64,
    pub baseline_wait: Option<f64>,
    pub baseline_turnaround: Option<f64>,
    pub compare_wait: Option<f64>,
    pub compare_turnaround: Option<f64>,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct RunMetrics {
    pub avg_wait: f64,
    pub avg_turnaround: f64,
    pub cpu_utilization: f64,
    pub context_switches: u64,
}

impl RunMetrics {
    pub fn from_run(result: &SimulationResult, run: &RunAnalysis) -> Self {
        Self {
            avg_wait: result.average_wait().unwrap_or(0.0),
            avg_turnaround: result.average_turnaround().unwrap_or(0.0),
            cpu_utilization: result
                .reported_cpu_utilization()
                .unwrap_or_else(|| f64::from(run.series.summary().busy_pct)),
            context_switches: run.context_switches,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RunSummary {
    pub rows: Vec<ProcessRow>,
    pub baseline: RunMetrics,
    pub compare: RunMetrics,
    /// Rough memory pressure in percent; see [`memory_utilization`].
    pub memory_utilization: u32,
}

/// Sum of memory estimates over a nominal 320 MB slot per process.
pub fn memory_utilization(total_memory: f64, processes: usize) -> u32 {
    let capacity = (processes as f64 * MEMORY_SLOT_MB).max(1.0);
    (total_memory / capacity * 100.0).round().max(0.0) as u32
}

/// Build the comparison table in lane order.
///
/// Memory estimates come from the compare run, falling back to the
/// baseline when the compare run reports none.
pub fn summarize(
    lanes: &[ProcessId],
    baseline: (&SimulationResult, &RunAnalysis),
    compare: (&SimulationResult, &RunAnalysis),
) -> RunSummary {
    let (base_result, base_run) = baseline;
    let (cmp_result, cmp_run) = compare;

    let memory_source = if cmp_result.memory_estimates.is_object() {
        cmp_result
    } else {
        base_result
    };

    let rows = lanes
        .iter()
        .map(|pid| ProcessRow {
            pid: pid.clone(),
            memory_estimate: memory_source.memory_estimate(pid),
            quantum: cmp_run.quanta.get(pid).copied().unwrap_or(1),
            baseline_wait: base_result.waiting_time(pid),
            baseline_turnaround: base_result.turnaround_time(pid),
            compare_wait: cmp_result.waiting_time(pid),
            compare_turnaround: cmp_result.turnaround_time(pid),
        })
        .collect();

    RunSummary {
        rows,
        baseline: RunMetrics::from_run(base_result, base_run),
        compare: RunMetrics::from_run(cmp_result, cmp_run),
        memory_utilization: memory_utilization(
            memory_source.total_memory_estimate(),
            lanes.len(),
        ),
    }
}
