//! Per-process scheduling quanta, either reported or inferred from bursts.
//!
//! Inference takes the GCD of every burst length observed for a process:
//! a round-robin scheduler hands out whole multiples of the quantum, so the
//! GCD recovers it when at least one burst was not cut short. The value is
//! descriptive only and feeds captions and tables.

use std::collections::BTreeMap;

use serde_json::{Map, Value};

use crate::model::{Interval, ProcessId};
use crate::parsers::coerce::finite;

pub type QuantumMap = BTreeMap<ProcessId, u64>;

const DEFAULT_QUANTUM: u64 = 1;

/// Resolve the quantum map for one run.
///
/// An explicit map wins and is used verbatim; otherwise quanta are inferred
/// from `intervals`. Every id in `known` gets an entry either way.
pub fn resolve_quanta(
    intervals: &[Interval],
    known: &[ProcessId],
    explicit: Option<&Map<String, Value>>,
) -> QuantumMap {
    match explicit.filter(|m| !m.is_empty()) {
        Some(map) => explicit_quanta(map, known),
        None => infer_quanta(intervals, known),
    }
}

/// Coerce a reported quantum map to positive integers, defaulting to 1 for
/// known ids it does not mention. Sentinel keys are dropped.
pub fn explicit_quanta(explicit: &Map<String, Value>, known: &[ProcessId]) -> QuantumMap {
    let mut out: QuantumMap = explicit
        .iter()
        .map(|(pid, v)| (ProcessId::new(pid), coerce_quantum(v)))
        .filter(|(pid, _)| !pid.is_sentinel())
        .collect();
    for pid in known.iter().filter(|p| !p.is_sentinel()) {
        out.entry(pid.clone()).or_insert(DEFAULT_QUANTUM);
    }
    out
}

/// Infer quanta as the GCD of each process's burst lengths.
pub fn infer_quanta(intervals: &[Interval], known: &[ProcessId]) -> QuantumMap {
    let mut out = QuantumMap::new();
    for interval in intervals {
        let len = burst_length(interval);
        out.entry(interval.pid.clone())
            .and_modify(|q| *q = gcd(*q, len))
            .or_insert(len);
    }
    for pid in known.iter().filter(|p| !p.is_sentinel()) {
        out.entry(pid.clone()).or_insert(DEFAULT_QUANTUM);
    }
    out
}

/// Burst length floored to whole time units, at least 1.
fn burst_length(interval: &Interval) -> u64 {
    (interval.length().floor() as u64).max(1)
}

fn coerce_quantum(value: &Value) -> u64 {
    finite(value)
        .map(f64::round)
        .filter(|v| *v >= 1.0)
        .map_or(DEFAULT_QUANTUM, |v| v as u64)
}

/// Greatest common divisor. Zero operands count as 1 so a degenerate
/// burst never collapses the result to 0.
pub fn gcd(a: u64, b: u64) -> u64 {
    let (mut a, mut b) = (a.max(1), b.max(1));
    while b != 0 {
        (a, b) = (b, a % b);
    }
    a
}

/// Caption text such as `A:2  •  B:3`, in the given order.
pub fn format_quanta(quanta: &QuantumMap, order: &[ProcessId]) -> String {
    order
        .iter()
        .map(|pid| {
            let q = quanta.get(pid).copied().unwrap_or(DEFAULT_QUANTUM);
            format!("{pid}:{q}")
        })
        .collect::<Vec<_>>()
        .join("  •  ")
}
