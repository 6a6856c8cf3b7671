use crate::model::Interval;
use crate::model::interval::sort_by_start;

/// Count context switches in a timeline.
///
/// A switch is a change of pid between two back-to-back intervals. Idle
/// time between intervals breaks the chain, so a process starting after a
/// gap is not counted as a switch.
pub fn context_switches(intervals: &[Interval]) -> u64 {
    let mut sorted = intervals.to_vec();
    sort_by_start(&mut sorted);

    sorted
        .windows(2)
        .filter(|pair| {
            let [prev, next] = pair else { return false };
            next.start <= prev.end && next.pid != prev.pid
        })
        .count() as u64
}

#[cfg(test)]
mod tests {
    use super::*;

    fn iv(pid: &str, start: f64, end: f64) -> Interval {
        Interval {
            pid: pid.into(),
            start,
            end,
        }
    }

    #[test]
    fn counts_back_to_back_changes() {
        let t = vec![iv("A", 0.0, 2.0), iv("B", 2.0, 4.0), iv("A", 4.0, 6.0)];
        assert_eq!(context_switches(&t), 2);
    }

    #[test]
    fn same_pid_runs_do_not_switch() {
        let t = vec![iv("A", 0.0, 2.0), iv("A", 2.0, 4.0)];
        assert_eq!(context_switches(&t), 0);
    }

    #[test]
    fn idle_gap_resets_chain() {
        let t = vec![iv("A", 0.0, 2.0), iv("B", 3.0, 4.0), iv("C", 4.0, 5.0)];
        assert_eq!(context_switches(&t), 1);
    }

    #[test]
    fn input_order_does_not_matter() {
        let t = vec![iv("B", 2.0, 4.0), iv("A", 0.0, 2.0)];
        assert_eq!(context_switches(&t), 1);
        assert_eq!(context_switches(&[]), 0);
    }
}
