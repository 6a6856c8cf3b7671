use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// The encodings a timeline may arrive in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TimelineShape {
    /// `[pid, start, end|duration]` tuples.
    TupleList,
    /// `{pid, start, end}` or `{pid, s, e}` objects.
    ObjectListRange,
    /// `{pid, start, duration}` objects.
    ObjectListDuration,
    /// `{time, pid, event}` scheduler observations.
    EventTrace,
    Empty,
}

/// How much of the input is inspected to pick a reader.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DetectionPolicy {
    /// The first element decides for the whole list. Upstream producers
    /// rely on this, so it stays the default.
    #[default]
    FirstElement,
    /// Every element is read according to its own shape. Event traces are
    /// still detected over the whole list.
    PerElement,
}

/// Classify a timeline-like value.
///
/// Only the first element is inspected, except for event traces, which
/// require every element to look like an event. Never fails: anything that
/// is not a non-empty array is [`TimelineShape::Empty`].
pub fn detect_shape(value: &Value) -> TimelineShape {
    let Some(items) = value.as_array() else {
        return TimelineShape::Empty;
    };
    let Some(first) = items.first() else {
        return TimelineShape::Empty;
    };

    match first {
        Value::Array(_) => TimelineShape::TupleList,
        Value::Object(obj) => {
            if items.iter().all(is_trace_event) {
                TimelineShape::EventTrace
            } else {
                object_shape(obj)
            }
        }
        _ => TimelineShape::Empty,
    }
}

/// Shape of a single element, used by [`DetectionPolicy::PerElement`].
pub fn element_shape(value: &Value) -> TimelineShape {
    match value {
        Value::Array(_) => TimelineShape::TupleList,
        Value::Object(obj) => object_shape(obj),
        _ => TimelineShape::Empty,
    }
}

fn object_shape(obj: &Map<String, Value>) -> TimelineShape {
    let has = |k: &str| obj.contains_key(k);
    if (has("start") && has("end")) || (has("s") && has("e")) {
        TimelineShape::ObjectListRange
    } else if has("start") && has("duration") {
        TimelineShape::ObjectListDuration
    } else {
        // Unknown objects are filtered element by element later.
        TimelineShape::ObjectListRange
    }
}

fn is_trace_event(value: &Value) -> bool {
    value.as_object().is_some_and(|o| {
        o.contains_key("time") && o.contains_key("pid") && o.contains_key("event")
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn non_arrays_and_empty_are_empty() {
        assert_eq!(detect_shape(&json!(null)), TimelineShape::Empty);
        assert_eq!(detect_shape(&json!({"pid": "A"})), TimelineShape::Empty);
        assert_eq!(detect_shape(&json!("A,0,2")), TimelineShape::Empty);
        assert_eq!(detect_shape(&json!([])), TimelineShape::Empty);
        assert_eq!(detect_shape(&json!([1, 2, 3])), TimelineShape::Empty);
        assert_eq!(detect_shape(&json!([null, ["A", 0, 1]])), TimelineShape::Empty);
    }

    #[test]
    fn first_array_makes_tuple_list() {
        let v = json!([["A", 0, 2], {"pid": "B", "start": 2, "end": 4}]);
        assert_eq!(detect_shape(&v), TimelineShape::TupleList);
    }

    #[test]
    fn object_variants() {
        assert_eq!(
            detect_shape(&json!([{"pid": "A", "start": 0, "end": 2}])),
            TimelineShape::ObjectListRange
        );
        assert_eq!(
            detect_shape(&json!([{"pid": "A", "s": 0, "e": 2}])),
            TimelineShape::ObjectListRange
        );
        assert_eq!(
            detect_shape(&json!([{"pid": "A", "start": 0, "duration": 2}])),
            TimelineShape::ObjectListDuration
        );
        assert_eq!(
            detect_shape(&json!([{"pid": "A", "begin": 0}])),
            TimelineShape::ObjectListRange
        );
    }

    #[test]
    fn trace_requires_every_element() {
        let trace = json!([
            {"time": 0, "pid": "A", "event": "running"},
            {"time": 1, "pid": null, "event": "idle"}
        ]);
        assert_eq!(detect_shape(&trace), TimelineShape::EventTrace);

        let mixed = json!([
            {"time": 0, "pid": "A", "event": "running"},
            {"pid": "A", "start": 1, "end": 2}
        ]);
        assert_eq!(detect_shape(&mixed), TimelineShape::ObjectListRange);
    }

    #[test]
    fn element_shape_per_item() {
        assert_eq!(element_shape(&json!(["A", 0, 1])), TimelineShape::TupleList);
        assert_eq!(
            element_shape(&json!({"pid": "A", "start": 0, "duration": 1})),
            TimelineShape::ObjectListDuration
        );
        assert_eq!(element_shape(&json!(7)), TimelineShape::Empty);
    }

    #[test]
    fn shape_tags_serialize_screaming() {
        let json = serde_json::to_string(&TimelineShape::EventTrace).unwrap_or_default();
        assert_eq!(json, "\"EVENT_TRACE\"");
        let policy: DetectionPolicy =
            serde_json::from_str("\"per_element\"").unwrap_or_default();
        assert_eq!(policy, DetectionPolicy::PerElement);
    }
}
