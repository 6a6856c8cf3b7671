use std::collections::HashMap;

use serde::Serialize;

use crate::model::{Interval, ProcessId};

/// Row index per process, shared by every panel of a comparison.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct LaneAssignment {
    order: Vec<ProcessId>,
    #[serde(skip)]
    index: HashMap<ProcessId, usize>,
}

impl LaneAssignment {
    /// Build from an ordered id list. Sentinels are skipped and repeated
    /// ids keep their first position.
    pub fn from_order<'a>(pids: impl IntoIterator<Item = &'a ProcessId>) -> Self {
        let mut lanes = Self::default();
        for pid in pids {
            lanes.push(pid);
        }
        lanes
    }

    fn push(&mut self, pid: &ProcessId) {
        if pid.is_sentinel() || self.index.contains_key(pid) {
            return;
        }
        self.index.insert(pid.clone(), self.order.len());
        self.order.push(pid.clone());
    }

    pub fn lane_of(&self, pid: &str) -> Option<usize> {
        self.index.get(pid).copied()
    }

    pub fn pids(&self) -> &[ProcessId] {
        &self.order
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }
}

/// Lanes from an explicit order when one is given and non-empty, else in
/// first-seen order across the baseline then the compare timeline.
pub fn assign_lanes(
    explicit: Option<&[ProcessId]>,
    baseline: &[Interval],
    compare: &[Interval],
) -> LaneAssignment {
    match explicit.filter(|order| !order.is_empty()) {
        Some(order) => LaneAssignment::from_order(order),
        None => LaneAssignment::from_order(baseline.iter().chain(compare).map(|i| &i.pid)),
    }
}
