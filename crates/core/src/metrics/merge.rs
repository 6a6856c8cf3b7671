use std::collections::BTreeMap;

use crate::model::{MergedPoint, UtilizationSeries};

/// Time as an orderable map key, ordered like `f64::total_cmp` with `-0.0`
/// folded into `0.0`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
struct TimeKey(i64);

impl TimeKey {
    fn new(time: f64) -> Self {
        let t = if time == 0.0 { 0.0 } else { time };
        let bits = t.to_bits() as i64;
        Self(bits ^ (((bits >> 63) as u64) >> 1) as i64)
    }
}

fn keyed(series: &UtilizationSeries) -> BTreeMap<TimeKey, (f64, Option<f64>)> {
    series
        .points
        .iter()
        .filter(|p| p.time.is_finite())
        .map(|p| (TimeKey::new(p.time), (p.time, p.cpu)))
        .collect()
}

/// Overlay two series on the union of their sample times, ascending.
///
/// A side without a sample at some time reports `None` there. When one
/// side repeats a time, its last sample wins.
pub fn merge_series(base: &UtilizationSeries, compare: &UtilizationSeries) -> Vec<MergedPoint> {
    let base = keyed(base);
    let compare = keyed(compare);

    let mut times: Vec<(TimeKey, f64)> = base
        .iter()
        .chain(compare.iter())
        .map(|(k, (t, _))| (*k, if *t == 0.0 { 0.0 } else { *t }))
        .collect();
    times.sort_by_key(|(k, _)| *k);
    times.dedup_by_key(|(k, _)| *k);

    times
        .into_iter()
        .map(|(key, time)| MergedPoint {
            time,
            base: base.get(&key).and_then(|(_, v)| *v),
            compare: compare.get(&key).and_then(|(_, v)| *v),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::UtilizationPoint;

    fn series(points: &[(f64, Option<f64>)]) -> UtilizationSeries {
        UtilizationSeries::new(
            points
                .iter()
                .map(|&(t, v)| UtilizationPoint::new(t, v))
                .collect(),
        )
    }

    fn rows(merged: &[MergedPoint]) -> Vec<(f64, Option<f64>, Option<f64>)> {
        merged.iter().map(|m| (m.time, m.base, m.compare)).collect()
    }

    #[test]
    fn union_of_times_with_gaps() {
        let base = series(&[(0.0, Some(0.0)), (1.0, Some(100.0)), (2.0, Some(100.0))]);
        let cmp = series(&[(1.0, Some(100.0)), (2.0, Some(0.0)), (3.0, Some(100.0))]);
        let merged = merge_series(&base, &cmp);
        assert_eq!(
            rows(&merged),
            vec![
                (0.0, Some(0.0), None),
                (1.0, Some(100.0), Some(100.0)),
                (2.0, Some(100.0), Some(0.0)),
                (3.0, None, Some(100.0)),
            ]
        );
    }

    #[test]
    fn last_duplicate_wins_and_negative_zero_is_zero() {
        let base = series(&[(-0.0, Some(10.0)), (0.0, Some(20.0))]);
        let cmp = series(&[(0.0, Some(30.0))]);
        let merged = merge_series(&base, &cmp);
        assert_eq!(rows(&merged), vec![(0.0, Some(20.0), Some(30.0))]);
        assert!(merged[0].time.is_sign_positive());
    }

    #[test]
    fn negative_and_fractional_times_sort() {
        let base = series(&[(2.5, Some(1.0)), (-1.0, Some(2.0))]);
        let cmp = series(&[(0.5, None)]);
        let times: Vec<_> = merge_series(&base, &cmp).iter().map(|m| m.time).collect();
        assert_eq!(times, vec![-1.0, 0.5, 2.5]);
    }

    #[test]
    fn empty_inputs() {
        let empty = UtilizationSeries::default();
        assert!(merge_series(&empty, &empty).is_empty());
    }
}
