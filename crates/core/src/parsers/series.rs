use serde_json::Value;
use tracing::{debug, warn};

use super::coerce::{field, finite};
use crate::model::series::{BUSY, IDLE};
use crate::model::{UtilizationPoint, UtilizationSeries};

const TIME_KEYS: [&str; 3] = ["time", "t", "x"];
const VALUE_KEYS: [&str; 4] = ["cpu", "value", "y", "v"];

/// Observed maxima at or below this are read as 0..1 fractions.
const FRACTION_CEILING: f64 = 1.01;

/// Normalize a backend-provided utilization series.
///
/// Accepts bare numbers (index = time), `[time, cpu]` pairs and
/// `{time, cpu}` objects (with `t`/`x` and `value`/`y`/`v` aliases).
/// Points are sorted by time, fractional series are rescaled to percent,
/// and every value is clamped into `0..=100`.
pub fn normalize_series(value: &Value) -> UtilizationSeries {
    let Some(items) = value.as_array() else {
        return UtilizationSeries::default();
    };

    let mut points: Vec<UtilizationPoint> = items
        .iter()
        .enumerate()
        .filter_map(|(idx, item)| read_point(idx, item))
        .collect();
    points.sort_by(|a, b| a.time.total_cmp(&b.time));

    let max = points.iter().filter_map(|p| p.cpu).reduce(f64::max);
    let scale = match max {
        Some(m) if m > 0.0 && m <= FRACTION_CEILING => {
            debug!(max = m, "scaling fractional utilization series to percent");
            100.0
        }
        _ => 1.0,
    };
    for p in &mut points {
        p.cpu = p.cpu.map(|v| (v * scale).clamp(IDLE, BUSY));
    }

    let series = UtilizationSeries::new(points);
    let all_busy = {
        let mut known = series.values().peekable();
        known.peek().is_some() && known.all(|v| v == BUSY)
    };
    if all_busy {
        warn!(
            points = series.len(),
            "every utilization sample is 100%, upstream series may be wrong"
        );
    }
    series
}

fn read_point(idx: usize, item: &Value) -> Option<UtilizationPoint> {
    let index_time = idx as f64;
    match item {
        Value::Null => None,
        Value::Array(pair) => {
            let time = pair.first().and_then(finite)?;
            let cpu = pair.get(1).and_then(finite);
            Some(UtilizationPoint::new(time, cpu))
        }
        Value::Object(obj) => {
            let time = match field(obj, &TIME_KEYS) {
                Some(t) => finite(t)?,
                None => index_time,
            };
            let cpu = field(obj, &VALUE_KEYS).and_then(finite);
            Some(UtilizationPoint::new(time, cpu))
        }
        scalar => Some(UtilizationPoint::new(index_time, finite(scalar))),
    }
}
