use serde_json::Value;

use super::coerce::number;
use crate::model::{Interval, ProcessId};

/// Read `[pid, start, end|duration]` tuples.
///
/// The third slot is an end time unless it is `<= start`, in which case it
/// is a duration. Malformed tuples and sentinel pids are dropped.
pub fn parse_tuples(items: &[Value]) -> Vec<Interval> {
    items.iter().filter_map(tuple_interval).collect()
}

pub(crate) fn tuple_interval(value: &Value) -> Option<Interval> {
    let arr = value.as_array()?;
    let [pid, a, b, ..] = arr.as_slice() else {
        return None;
    };
    let pid = ProcessId::scheduled(pid)?;
    let start = number(a)?;
    let third = number(b)?;
    let end = if third <= start { start + third } else { third };
    Interval::checked(pid, start, end)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn parse(v: Value) -> Vec<Interval> {
        parse_tuples(v.as_array().map(Vec::as_slice).unwrap_or(&[]))
    }

    #[test]
    fn end_or_duration() {
        let out = parse(json!([["P1", 5, 3], ["P1", 5, 10]]));
        assert_eq!(out.len(), 2);
        assert_eq!((out[0].start, out[0].end), (5.0, 8.0));
        assert_eq!((out[1].start, out[1].end), (5.0, 10.0));
    }

    #[test]
    fn zero_start_zero_third_is_zero_length() {
        let out = parse(json!([["A", 0, 0]]));
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].length(), 0.0);
    }

    #[test]
    fn drops_malformed_and_sentinels() {
        let out = parse(json!([
            ["idle", 0, 2],
            ["IDLE", 0, 2],
            [0, 0, 2],
            ["-1", 0, 2],
            ["A", "x", 2],
            ["A", 0],
            ["A", 3, -5],
            "not a tuple",
            [null, 0, 2],
            ["B", "1", "4"]
        ]));
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].pid, "B");
        assert_eq!((out[0].start, out[0].end), (1.0, 4.0));
    }

    #[test]
    fn numeric_pid_becomes_text() {
        let out = parse(json!([[7, 0, 2]]));
        assert_eq!(out[0].pid, "7");
    }
}
