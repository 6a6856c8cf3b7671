//! Property-based tests for timeline normalization and derived metrics.

use proptest::prelude::*;
use serde_json::{Value, json};

use sched_lens_core::metrics::{build_utilization, infer_quanta, merge_series};
use sched_lens_core::model::{Interval, ProcessId};
use sched_lens_core::parsers::{DetectionPolicy, normalize_timeline, normalize_timeline_with};

const PIDS: [&str; 8] = ["A", "B", "C", "idle", "IDLE", "Idle", "0", "-1"];

fn tuple_timeline() -> impl Strategy<Value = Vec<(&'static str, u32, u32)>> {
    prop::collection::vec((prop::sample::select(PIDS.to_vec()), 0u32..60, 0u32..60), 0..40)
}

fn to_json(rows: &[(&str, u32, u32)]) -> Value {
    Value::Array(rows.iter().map(|(p, a, b)| json!([p, a, b])).collect())
}

fn trace_json(rows: &[(u32, &str, bool)]) -> Value {
    Value::Array(
        rows.iter()
            .map(|(t, p, running)| {
                json!({"time": t, "pid": p, "event": if *running { "running" } else { "idle" }})
            })
            .collect(),
    )
}

fn valid_intervals() -> impl Strategy<Value = Vec<Interval>> {
    prop::collection::vec(
        (prop::sample::select(PIDS[..3].to_vec()), 0.0f64..100.0, 0.0f64..20.0),
        1..30,
    )
    .prop_map(|rows| {
        rows.into_iter()
            .map(|(pid, start, len)| Interval {
                pid: ProcessId::new(pid),
                start,
                end: start + len,
            })
            .collect()
    })
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    #[test]
    fn prop_sentinels_never_survive(rows in tuple_timeline()) {
        let out = normalize_timeline(&to_json(&rows));
        for interval in &out {
            prop_assert!(!interval.pid.is_sentinel(), "sentinel leaked: {}", interval.pid);
            prop_assert!(interval.end >= interval.start);
        }
    }

    #[test]
    fn prop_trace_sentinels_never_survive(
        rows in prop::collection::vec((0u32..50, prop::sample::select(PIDS.to_vec()), any::<bool>()), 0..40)
    ) {
        let out = normalize_timeline(&trace_json(&rows));
        prop_assert!(out.iter().all(|i| !i.pid.is_sentinel() && i.end >= i.start));
    }

    #[test]
    fn prop_normalization_is_deterministic(rows in tuple_timeline()) {
        let input = to_json(&rows);
        prop_assert_eq!(normalize_timeline(&input), normalize_timeline(&input));
        prop_assert_eq!(
            normalize_timeline_with(&input, DetectionPolicy::PerElement),
            normalize_timeline(&input)
        );
    }

    #[test]
    fn prop_canonical_form_is_a_fixed_point(rows in tuple_timeline()) {
        let first = normalize_timeline(&to_json(&rows));
        let canonical = serde_json::to_value(&first).unwrap_or(Value::Null);
        prop_assert_eq!(normalize_timeline(&canonical), first);
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    #[test]
    fn prop_series_length_is_ceil_of_max_end(intervals in valid_intervals()) {
        let max_end = intervals.iter().map(|i| i.end).fold(0.0f64, f64::max);
        let series = build_utilization(&intervals, None);
        prop_assert_eq!(series.len(), max_end.ceil() as usize);
        prop_assert!(series.values().all(|v| v == 0.0 || v == 100.0));
    }

    #[test]
    fn prop_every_bucket_under_an_interval_is_busy(intervals in valid_intervals()) {
        let series = build_utilization(&intervals, None);
        for interval in intervals.iter().filter(|i| i.end > i.start) {
            let bucket = interval.start.floor() as usize;
            prop_assert_eq!(series.points[bucket].cpu, Some(100.0));
        }
    }

    #[test]
    fn prop_quanta_are_positive(intervals in valid_intervals()) {
        let quanta = infer_quanta(&intervals, &[]);
        prop_assert!(quanta.values().all(|q| *q >= 1));
        for interval in &intervals {
            prop_assert!(quanta.contains_key(interval.pid.as_str()));
        }
    }

    #[test]
    fn prop_merged_times_ascend(a in valid_intervals(), b in valid_intervals()) {
        let sa = build_utilization(&a, None);
        let sb = build_utilization(&b, None);
        let merged = merge_series(&sa, &sb);
        prop_assert_eq!(merged.len(), sa.len().max(sb.len()));
        prop_assert!(merged.windows(2).all(|w| w[0].time < w[1].time));
    }
}
