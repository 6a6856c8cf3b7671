use serde_json::{Map, Value};

use super::coerce::number;
use crate::model::{Interval, ProcessId};

/// Which object layout a list was detected as. Decides the order in which
/// field pairs are tried.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ObjectLayout {
    Range,
    Duration,
}

/// A pair of fields that encodes an interval.
#[derive(Debug, Clone, Copy)]
enum Fields {
    StartEnd,
    ShortStartEnd,
    StartDuration,
}

impl Fields {
    fn keys(self) -> (&'static str, &'static str) {
        match self {
            Self::StartEnd => ("start", "end"),
            Self::ShortStartEnd => ("s", "e"),
            Self::StartDuration => ("start", "duration"),
        }
    }

    fn present(self, obj: &Map<String, Value>) -> bool {
        let (a, b) = self.keys();
        obj.contains_key(a) && obj.contains_key(b)
    }

    fn bounds(self, obj: &Map<String, Value>) -> Option<(f64, f64)> {
        let (a, b) = self.keys();
        let first = number(obj.get(a)?)?;
        let second = number(obj.get(b)?)?;
        match self {
            Self::StartDuration => Some((first, first + second)),
            Self::StartEnd | Self::ShortStartEnd => Some((first, second)),
        }
    }
}

impl ObjectLayout {
    fn readers(self) -> [Fields; 3] {
        match self {
            Self::Range => [Fields::StartEnd, Fields::ShortStartEnd, Fields::StartDuration],
            Self::Duration => [Fields::StartDuration, Fields::StartEnd, Fields::ShortStartEnd],
        }
    }
}

/// Read `{pid, start, end}` / `{pid, s, e}` / `{pid, start, duration}` objects.
///
/// The first field pair present on an element wins; if its values are not
/// numeric the element is dropped rather than retried with another pair.
pub fn parse_objects(items: &[Value], layout: ObjectLayout) -> Vec<Interval> {
    items
        .iter()
        .filter_map(|v| object_interval(v, layout))
        .collect()
}

pub(crate) fn object_interval(value: &Value, layout: ObjectLayout) -> Option<Interval> {
    let obj = value.as_object()?;
    let pid = ProcessId::scheduled(obj.get("pid")?)?;
    let fields = layout.readers().into_iter().find(|f| f.present(obj))?;
    let (start, end) = fields.bounds(obj)?;
    Interval::checked(pid, start, end)
}
