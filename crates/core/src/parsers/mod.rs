pub mod coerce;
pub mod objects;
pub mod result;
pub mod series;
pub mod shape;
pub mod trace;
pub mod tuples;

pub use result::SimulationResult;
pub use series::normalize_series;
pub use shape::{DetectionPolicy, TimelineShape, detect_shape};
pub use trace::{RawEvent, reconstruct_segments};

use serde_json::Value;
use thiserror::Error;
use tracing::debug;

use crate::model::{Interval, UtilizationSeries};
use objects::ObjectLayout;

#[derive(Debug, Error)]
pub enum ParseError {
    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("simulation result must be a JSON object")]
    NotAnObject,
}

/// Normalize any supported timeline encoding into canonical intervals,
/// using first-element shape detection.
///
/// Output keeps input order; callers that need time order sort it.
pub fn normalize_timeline(value: &Value) -> Vec<Interval> {
    normalize_timeline_with(value, DetectionPolicy::FirstElement)
}

/// [`normalize_timeline`] with an explicit detection policy.
pub fn normalize_timeline_with(value: &Value, policy: DetectionPolicy) -> Vec<Interval> {
    let items = value.as_array().map(Vec::as_slice).unwrap_or(&[]);
    let shape = detect_shape(value);

    let intervals = match (shape, policy) {
        (TimelineShape::EventTrace, _) => {
            let events = trace::events_from_values(items);
            let out = reconstruct_segments(&events);
            debug!(events = events.len(), intervals = out.len(), "reconstructed trace");
            return out;
        }
        (_, DetectionPolicy::PerElement) => items.iter().filter_map(read_element).collect(),
        (TimelineShape::Empty, _) => Vec::new(),
        (TimelineShape::TupleList, _) => tuples::parse_tuples(items),
        (TimelineShape::ObjectListRange, _) => objects::parse_objects(items, ObjectLayout::Range),
        (TimelineShape::ObjectListDuration, _) => {
            objects::parse_objects(items, ObjectLayout::Duration)
        }
    };

    let dropped = items.len() - intervals.len();
    debug!(?shape, ?policy, kept = intervals.len(), dropped, "normalized timeline");
    intervals
}

fn read_element(value: &Value) -> Option<Interval> {
    match shape::element_shape(value) {
        TimelineShape::TupleList => tuples::tuple_interval(value),
        TimelineShape::ObjectListDuration => {
            objects::object_interval(value, ObjectLayout::Duration)
        }
        TimelineShape::ObjectListRange => objects::object_interval(value, ObjectLayout::Range),
        TimelineShape::EventTrace | TimelineShape::Empty => None,
    }
}

/// Parse a timeline from JSON bytes. Valid JSON that is not a timeline
/// yields no intervals; only invalid JSON is an error.
pub fn parse_timeline(data: &[u8]) -> Result<Vec<Interval>, ParseError> {
    let value: Value = serde_json::from_slice(data)?;
    Ok(normalize_timeline(&value))
}

/// Parse a precomputed utilization series from JSON bytes.
pub fn parse_series(data: &[u8]) -> Result<UtilizationSeries, ParseError> {
    let value: Value = serde_json::from_slice(data)?;
    Ok(normalize_series(&value))
}

/// Parse a simulation result document.
pub fn parse_result(data: &[u8]) -> Result<SimulationResult, ParseError> {
    let value: Value = serde_json::from_slice(data)?;
    if !value.is_object() {
        return Err(ParseError::NotAnObject);
    }
    Ok(serde_json::from_value(value)?)
}
