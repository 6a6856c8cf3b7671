use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::coerce::finite;
use crate::model::ProcessId;

/// One simulation result as returned by the simulation service.
///
/// Every field is optional and loosely typed; accessors coerce on read so a
/// partially broken document still yields whatever is usable.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationResult {
    pub total_time: Value,
    /// Precomputed utilization series, preferred over building one.
    pub cpu_series: Value,
    /// Interval timeline in any supported shape.
    pub memory_timeline: Value,
    /// Raw `{time, pid, event}` trace.
    pub trace: Value,
    /// Explicit per-process quanta reported by the scheduler.
    pub inferred_quanta: Value,
    /// The workload that produced this result (`input.processes`).
    pub input: Value,
    pub cpu_utilization: Value,
    pub context_switches: Value,
    pub waiting_times: Value,
    pub turnaround_times: Value,
    pub avg_wait: Value,
    pub avg_waiting: Value,
    pub avg_tat: Value,
    pub avg_turnaround: Value,
    pub memory_estimates: Value,
}

impl SimulationResult {
    /// Total simulated time, when it is a positive finite number.
    pub fn total_time(&self) -> Option<f64> {
        finite(&self.total_time).filter(|t| *t > 0.0)
    }

    /// Process ids listed in the workload input, in input order.
    ///
    /// Entries may be plain ids or `{pid, ...}` objects. Sentinel and empty
    /// ids are skipped.
    pub fn input_processes(&self) -> Vec<ProcessId> {
        let Some(list) = self.input.get("processes").and_then(Value::as_array) else {
            return Vec::new();
        };
        list.iter()
            .filter_map(|p| match p {
                Value::Object(obj) => obj.get("pid").and_then(ProcessId::scheduled),
                other => ProcessId::scheduled(other),
            })
            .collect()
    }

    /// The reported quantum map, if it is a non-empty object.
    pub fn explicit_quanta(&self) -> Option<&Map<String, Value>> {
        self.inferred_quanta.as_object().filter(|m| !m.is_empty())
    }

    pub fn reported_cpu_utilization(&self) -> Option<f64> {
        finite(&self.cpu_utilization)
    }

    pub fn reported_context_switches(&self) -> Option<u64> {
        finite(&self.context_switches)
            .filter(|v| *v >= 0.0)
            .map(|v| v.round() as u64)
    }

    pub fn waiting_time(&self, pid: &str) -> Option<f64> {
        per_process(&self.waiting_times, pid)
    }

    pub fn turnaround_time(&self, pid: &str) -> Option<f64> {
        per_process(&self.turnaround_times, pid)
    }

    pub fn memory_estimate(&self, pid: &str) -> Option<f64> {
        per_process(&self.memory_estimates, pid)
    }

    /// Reported average waiting time, else the mean of per-process values.
    pub fn average_wait(&self) -> Option<f64> {
        finite(&self.avg_wait)
            .or_else(|| finite(&self.avg_waiting))
            .or_else(|| mean_of(&self.waiting_times))
    }

    /// Reported average turnaround time, else the mean of per-process values.
    pub fn average_turnaround(&self) -> Option<f64> {
        finite(&self.avg_tat)
            .or_else(|| finite(&self.avg_turnaround))
            .or_else(|| mean_of(&self.turnaround_times))
    }

    /// Sum of all finite memory estimates.
    pub fn total_memory_estimate(&self) -> f64 {
        self.memory_estimates
            .as_object()
            .map(|m| m.values().filter_map(finite).sum())
            .unwrap_or(0.0)
    }
}

fn per_process(map: &Value, pid: &str) -> Option<f64> {
    map.get(pid).and_then(finite)
}

fn mean_of(map: &Value) -> Option<f64> {
    let values: Vec<f64> = map.as_object()?.values().filter_map(finite).collect();
    if values.is_empty() {
        return None;
    }
    Some(values.iter().sum::<f64>() / values.len() as f64)
}
