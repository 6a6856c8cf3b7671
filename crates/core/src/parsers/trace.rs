use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::coerce::finite;
use crate::model::{Interval, ProcessId};

/// The event name that marks a process as holding the CPU.
pub const RUNNING: &str = "running";

/// A point-in-time scheduler observation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawEvent {
    /// `None` when the producer sent no usable timestamp.
    pub time: Option<f64>,
    pub pid: Option<ProcessId>,
    pub running: bool,
}

impl RawEvent {
    pub fn running(time: f64, pid: &str) -> Self {
        Self {
            time: Some(time),
            pid: Some(ProcessId::new(pid)),
            running: true,
        }
    }

    pub fn stopped(time: f64) -> Self {
        Self {
            time: Some(time),
            pid: None,
            running: false,
        }
    }

    /// Read a `{time, pid, event}` object. Non-objects are skipped.
    pub fn from_value(value: &Value) -> Option<Self> {
        let obj = value.as_object()?;
        Some(Self {
            time: obj.get("time").and_then(finite),
            pid: obj.get("pid").and_then(ProcessId::from_value),
            running: obj.get("event").and_then(Value::as_str) == Some(RUNNING),
        })
    }
}

pub fn events_from_values(items: &[Value]) -> Vec<RawEvent> {
    items.iter().filter_map(RawEvent::from_value).collect()
}

/// The run being accumulated while scanning a trace.
struct OpenRun {
    pid: Option<ProcessId>,
    start: f64,
}

impl OpenRun {
    fn close(self, end: f64, out: &mut Vec<Interval>) {
        // Sentinel runs and runs that end before they start are not emitted.
        if let Some(pid) = self.pid
            && let Some(interval) = Interval::checked(pid, self.start, end)
        {
            out.push(interval);
        }
    }
}

/// Stitch a trace into closed execution intervals.
///
/// Events are scanned in the order given; timestamps are not re-sorted. A
/// `running` event for a new pid closes the open run at its own time and
/// opens the next one. Any other event closes the open run. A run still open
/// at the end of the trace closes one unit past the last observed time.
pub fn reconstruct_segments(events: &[RawEvent]) -> Vec<Interval> {
    let mut out = Vec::new();
    let mut current: Option<OpenRun> = None;
    let mut last_seen = 0.0_f64;

    for event in events {
        let at = event.time.unwrap_or(last_seen);
        if let Some(t) = event.time {
            last_seen = t;
        }

        if !event.running {
            if let Some(run) = current.take() {
                run.close(at, &mut out);
            }
            continue;
        }

        if current.as_ref().is_some_and(|run| run.pid == event.pid) {
            continue;
        }
        if let Some(run) = current.take() {
            run.close(at, &mut out);
        }
        current = Some(OpenRun {
            pid: event.pid.clone(),
            start: at,
        });
    }

    if let Some(run) = current {
        run.close(last_seen + 1.0, &mut out);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn spans(out: &[Interval]) -> Vec<(&str, f64, f64)> {
        out.iter().map(|i| (i.pid.as_str(), i.start, i.end)).collect()
    }

    #[test]
    fn switch_then_idle() {
        let v = json!([
            {"time": 0, "pid": "A", "event": "running"},
            {"time": 2, "pid": "B", "event": "running"},
            {"time": 5, "pid": null, "event": "idle"}
        ]);
        let events = events_from_values(v.as_array().map(Vec::as_slice).unwrap_or(&[]));
        let out = reconstruct_segments(&events);
        assert_eq!(spans(&out), vec![("A", 0.0, 2.0), ("B", 2.0, 5.0)]);
    }

    #[test]
    fn per_tick_events_collapse_into_one_run() {
        let events = vec![
            RawEvent::running(0.0, "A"),
            RawEvent::running(1.0, "A"),
            RawEvent::running(2.0, "A"),
            RawEvent::running(3.0, "B"),
        ];
        let out = reconstruct_segments(&events);
        // The final run closes one unit past the last timestamp.
        assert_eq!(spans(&out), vec![("A", 0.0, 3.0), ("B", 3.0, 4.0)]);
    }

    #[test]
    fn idle_gap_splits_same_pid() {
        let events = vec![
            RawEvent::running(0.0, "A"),
            RawEvent::stopped(2.0),
            RawEvent::running(3.0, "A"),
        ];
        let out = reconstruct_segments(&events);
        assert_eq!(spans(&out), vec![("A", 0.0, 2.0), ("A", 3.0, 4.0)]);
    }

    #[test]
    fn sentinel_runs_are_dropped() {
        let events = vec![
            RawEvent::running(0.0, "IDLE"),
            RawEvent::running(2.0, "A"),
            RawEvent::running(4.0, "0"),
            RawEvent::stopped(6.0),
        ];
        let out = reconstruct_segments(&events);
        assert_eq!(spans(&out), vec![("A", 2.0, 4.0)]);
    }

    #[test]
    fn missing_time_uses_last_observed() {
        let events = vec![
            RawEvent::running(1.0, "A"),
            RawEvent {
                time: None,
                pid: None,
                running: false,
            },
        ];
        let out = reconstruct_segments(&events);
        // Closed at the last observed time: a zero-length run survives.
        assert_eq!(spans(&out), vec![("A", 1.0, 1.0)]);
    }

    #[test]
    fn out_of_order_runs_that_go_backwards_are_dropped() {
        let events = vec![RawEvent::running(5.0, "A"), RawEvent::running(2.0, "B")];
        let out = reconstruct_segments(&events);
        assert_eq!(spans(&out), vec![("B", 2.0, 3.0)]);
    }

    #[test]
    fn non_string_event_is_not_running() {
        let ev = RawEvent::from_value(&json!({"time": 1, "pid": "A", "event": 1}));
        assert_eq!(ev.map(|e| e.running), Some(false));
    }

    #[test]
    fn empty_trace() {
        assert!(reconstruct_segments(&[]).is_empty());
    }
}
