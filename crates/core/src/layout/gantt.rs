use serde::{Deserialize, Serialize};
use sched_lens_protocol::{Point, Rect};
use tracing::debug;

use super::lanes::LaneAssignment;
use super::palette::hue_for_pid;
use crate::model::Interval;
use crate::model::interval::sort_by_start;

/// Space between the panel's top padding and the first lane, holding the
/// tick labels.
const AXIS_GUTTER: f64 = 14.0;

/// Upper bound on axis ticks; longer timelines get a wider tick stride.
pub const MAX_TICKS: usize = 512;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Padding {
    pub left: f64,
    pub right: f64,
    pub top: f64,
    pub bottom: f64,
    /// Vertical gap between the baseline and compare panels.
    pub between: f64,
}

impl Default for Padding {
    fn default() -> Self {
        Self {
            left: 140.0,
            right: 36.0,
            top: 12.0,
            bottom: 28.0,
            between: 36.0,
        }
    }
}

/// Geometry knobs for the dual Gantt chart.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GanttConfig {
    pub px_per_time: f64,
    /// Extra time units of empty space after the latest end.
    pub tail_margin: f64,
    pub lane_height: f64,
    pub padding: Padding,
    pub min_chart_width: f64,
    /// Short segments are widened to this so they stay visible.
    pub min_segment_width: f64,
    /// Labels sit at the segment center, but never further right than this.
    pub label_max_offset: f64,
    /// Gap between a segment and its lane edges.
    pub segment_inset: f64,
}

impl GanttConfig {
    /// Copy with lengths clamped to be non-negative. NaN becomes 0.
    fn sanitized(&self) -> Self {
        let non_negative = |v: f64| v.max(0.0);
        Self {
            px_per_time: non_negative(self.px_per_time),
            tail_margin: non_negative(self.tail_margin),
            lane_height: non_negative(self.lane_height),
            min_segment_width: non_negative(self.min_segment_width),
            label_max_offset: non_negative(self.label_max_offset),
            segment_inset: non_negative(self.segment_inset),
            ..*self
        }
    }
}

impl Default for GanttConfig {
    fn default() -> Self {
        Self {
            px_per_time: 28.0,
            tail_margin: 2.5,
            lane_height: 50.0,
            padding: Padding::default(),
            min_chart_width: 1200.0,
            min_segment_width: 8.0,
            label_max_offset: 72.0,
            segment_inset: 6.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Panel {
    Baseline,
    Compare,
}

impl Panel {
    pub fn hue_offset(self) -> u16 {
        match self {
            Self::Baseline => 6,
            Self::Compare => 150,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Baseline => "baseline",
            Self::Compare => "compare",
        }
    }
}

/// A positioned segment. Coordinates are relative to the plot origin
/// ([`GanttLayout::plot_origin`]).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RenderSegment {
    pub pid: String,
    pub start: f64,
    pub end: f64,
    pub length: f64,
    pub lane: usize,
    pub x: f64,
    pub width: f64,
    pub y: f64,
    pub height: f64,
    pub label_x: f64,
    pub hue: u16,
    pub tooltip: String,
}

impl RenderSegment {
    pub fn rect(&self) -> Rect {
        Rect::new(self.x, self.y, self.width, self.height)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TimeTick {
    pub time: f64,
    pub x: f64,
}

/// Layout of both panels of a comparison, sharing one lane assignment and
/// one time scale.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GanttLayout {
    pub lanes: LaneAssignment,
    pub max_time: f64,
    /// Full panel width including padding.
    pub width: f64,
    pub inner_width: f64,
    /// Height of one panel.
    pub panel_height: f64,
    pub lane_height: f64,
    pub plot_origin: Point,
    pub ticks: Vec<TimeTick>,
    pub baseline: Vec<RenderSegment>,
    pub compare: Vec<RenderSegment>,
}

impl GanttLayout {
    pub fn segments(&self, panel: Panel) -> &[RenderSegment] {
        match panel {
            Panel::Baseline => &self.baseline,
            Panel::Compare => &self.compare,
        }
    }

    /// The segment under `point` (plot coordinates). Segments are drawn in
    /// order, so the last one containing the point is the visible one.
    pub fn hit_test(&self, panel: Panel, point: Point) -> Option<&RenderSegment> {
        self.segments(panel)
            .iter()
            .rev()
            .find(|seg| seg.rect().contains(point))
    }
}

/// Tooltip text for one segment, e.g. `P1 — 0 → 2 (len=2)`.
pub fn tooltip(pid: &str, start: f64, end: f64, length: f64) -> String {
    format!("{pid} — {start} → {end} (len={length})")
}

/// Lay out baseline and compare timelines on a shared time scale.
///
/// Intervals are sorted by start before layout. Intervals whose pid has no
/// lane are dropped.
pub fn layout_gantt(
    baseline: &[Interval],
    compare: &[Interval],
    lanes: LaneAssignment,
    config: &GanttConfig,
) -> GanttLayout {
    let config = &config.sanitized();
    let max_time = baseline
        .iter()
        .chain(compare)
        .map(|i| i.end)
        .fold(1.0_f64, f64::max);
    let span = max_time + config.tail_margin;
    let pad = config.padding;
    let width = config
        .min_chart_width
        .max(span * config.px_per_time + pad.left + pad.right);
    let inner_width = width - pad.left - pad.right;
    let panel_height = pad.top + lanes.len() as f64 * config.lane_height + pad.bottom;

    let scale = Scale {
        span,
        inner_width,
        config,
    };
    let ticks = time_ticks(max_time)
        .map(|time| TimeTick {
            time,
            x: scale.x(time),
        })
        .collect();

    let baseline = scale.place(baseline, &lanes, Panel::Baseline);
    let compare = scale.place(compare, &lanes, Panel::Compare);
    debug!(
        lanes = lanes.len(),
        max_time,
        width,
        baseline = baseline.len(),
        compare = compare.len(),
        "laid out gantt"
    );

    GanttLayout {
        max_time,
        width,
        inner_width,
        panel_height,
        lane_height: config.lane_height,
        plot_origin: Point::new(pad.left, pad.top + AXIS_GUTTER),
        ticks,
        baseline,
        compare,
        lanes,
    }
}

/// Integer tick times from 0 through `floor(max_time) + 1`, strided so at
/// most `MAX_TICKS + 1` are produced.
fn time_ticks(max_time: f64) -> impl Iterator<Item = f64> {
    let last = max_time.floor() + 1.0;
    let step = (last / MAX_TICKS as f64).ceil().max(1.0);
    let count = (last / step).floor() as usize + 1;
    if step > 1.0 {
        debug!(step, count, "striding gantt ticks");
    }
    (0..count).map(move |k| k as f64 * step)
}

struct Scale<'a> {
    span: f64,
    inner_width: f64,
    config: &'a GanttConfig,
}

impl Scale<'_> {
    fn x(&self, time: f64) -> f64 {
        time / self.span * self.inner_width
    }

    fn place(
        &self,
        intervals: &[Interval],
        lanes: &LaneAssignment,
        panel: Panel,
    ) -> Vec<RenderSegment> {
        let mut sorted = intervals.to_vec();
        sort_by_start(&mut sorted);

        let cfg = self.config;
        sorted
            .iter()
            .filter_map(|interval| {
                let lane = lanes.lane_of(&interval.pid)?;
                let length = interval.length();
                let x = self.x(interval.start);
                let width = cfg.min_segment_width.max(self.x(length));
                Some(RenderSegment {
                    pid: interval.pid.to_string(),
                    start: interval.start,
                    end: interval.end,
                    length,
                    lane,
                    x,
                    width,
                    y: lane as f64 * cfg.lane_height + cfg.segment_inset,
                    height: (cfg.lane_height - 2.0 * cfg.segment_inset).max(0.0),
                    label_x: x + (width / 2.0).min(cfg.label_max_offset),
                    hue: hue_for_pid(&interval.pid, panel.hue_offset()),
                    tooltip: tooltip(&interval.pid, interval.start, interval.end, length),
                })
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::assign_lanes;
    use crate::model::ProcessId;

    fn iv(pid: &str, start: f64, end: f64) -> Interval {
        Interval {
            pid: pid.into(),
            start,
            end,
        }
    }

    fn layout(base: &[Interval], cmp: &[Interval]) -> GanttLayout {
        let lanes = assign_lanes(None, base, cmp);
        layout_gantt(base, cmp, lanes, &GanttConfig::default())
    }

    #[test]
    fn small_charts_use_minimum_width() {
        let l = layout(&[iv("A", 0.0, 2.0)], &[]);
        assert_eq!(l.max_time, 2.0);
        assert_eq!(l.width, 1200.0);
        assert_eq!(l.inner_width, 1200.0 - 176.0);
        assert_eq!(l.panel_height, 12.0 + 50.0 + 28.0);
    }

    #[test]
    fn long_charts_grow() {
        let l = layout(&[iv("A", 0.0, 100.0)], &[]);
        assert_eq!(l.width, 102.5 * 28.0 + 176.0);
        assert_eq!(l.inner_width, 102.5 * 28.0);
        let seg = &l.baseline[0];
        assert_eq!(seg.x, 0.0);
        assert!((seg.width - 100.0 * 28.0).abs() < 1e-9);
    }

    #[test]
    fn segment_geometry() {
        let l = layout(&[iv("A", 0.0, 2.0), iv("B", 2.0, 2.0)], &[]);
        let denom = 2.0 + 2.5;
        let a = &l.baseline[0];
        assert!((a.width - 2.0 / denom * l.inner_width).abs() < 1e-9);
        assert_eq!(a.label_x, a.x + 72.0);
        assert_eq!((a.y, a.height), (6.0, 38.0));
        let b = &l.baseline[1];
        assert_eq!(b.width, 8.0);
        assert_eq!(b.label_x, b.x + 4.0);
        assert_eq!(b.lane, 1);
        assert_eq!(b.y, 56.0);
    }

    #[test]
    fn max_time_floors_at_one() {
        let l = layout(&[iv("A", 0.0, 0.5)], &[]);
        assert_eq!(l.max_time, 1.0);
        let ticks: Vec<_> = l.ticks.iter().map(|t| t.time).collect();
        assert_eq!(ticks, vec![0.0, 1.0, 2.0]);
        assert!(layout(&[], &[]).baseline.is_empty());
    }

    #[test]
    fn ticks_cover_max_time_plus_one() {
        let l = layout(&[iv("A", 0.0, 7.2)], &[]);
        assert_eq!(l.ticks.len(), 9);
        assert_eq!(l.ticks[0].x, 0.0);
    }

    #[test]
    fn shared_pid_keeps_lane_in_both_panels() {
        let base = vec![iv("A", 0.0, 2.0), iv("B", 2.0, 4.0)];
        let cmp = vec![iv("C", 0.0, 1.0), iv("B", 1.0, 3.0)];
        let l = layout(&base, &cmp);
        let lane = |segs: &[RenderSegment], pid: &str| {
            segs.iter().find(|s| s.pid == pid).map(|s| s.lane)
        };
        assert_eq!(lane(&l.baseline, "B"), Some(1));
        assert_eq!(lane(&l.compare, "B"), Some(1));
        assert_eq!(lane(&l.compare, "C"), Some(2));
    }

    #[test]
    fn sorted_by_start_and_unknown_lanes_dropped() {
        let base = vec![iv("B", 4.0, 5.0), iv("A", 0.0, 2.0), iv("Z", 1.0, 2.0)];
        let order: Vec<ProcessId> = vec!["A".into(), "B".into()];
        let lanes = assign_lanes(Some(order.as_slice()), &base, &[]);
        let l = layout_gantt(&base, &[], lanes, &GanttConfig::default());
        let pids: Vec<_> = l.baseline.iter().map(|s| s.pid.as_str()).collect();
        assert_eq!(pids, vec!["A", "B"]);
    }

    #[test]
    fn tooltip_and_hue() {
        let l = layout(&[iv("P1", 0.0, 2.0)], &[iv("P1", 0.5, 3.0)]);
        assert_eq!(l.baseline[0].tooltip, "P1 — 0 → 2 (len=2)");
        assert_eq!(l.compare[0].tooltip, "P1 — 0.5 → 3 (len=2.5)");
        assert_eq!(l.baseline[0].hue, hue_for_pid("P1", 6));
        assert_eq!(l.compare[0].hue, hue_for_pid("P1", 150));
    }

    #[test]
    fn hit_test_prefers_last_drawn() {
        let base = vec![iv("A", 0.0, 4.0), iv("A", 1.0, 2.0)];
        let l = layout(&base, &[]);
        let inside_both = Point::new(l.baseline[1].x + 1.0, 20.0);
        let hit = l.hit_test(Panel::Baseline, inside_both);
        assert_eq!(hit.map(|s| s.start), Some(1.0));
        assert!(l.hit_test(Panel::Baseline, Point::new(-5.0, 20.0)).is_none());
        assert!(l.hit_test(Panel::Compare, inside_both).is_none());
    }

    #[test]
    fn huge_end_strides_ticks() {
        let l = layout(&[iv("A", 0.0, 2e19)], &[]);
        assert!(l.ticks.len() <= MAX_TICKS + 1);
        assert_eq!(l.ticks[0].time, 0.0);
        assert!(l.ticks.iter().all(|t| t.x.is_finite()));
        assert!(l.ticks.windows(2).all(|w| w[0].time < w[1].time));
    }

    #[test]
    fn long_timeline_tick_count_is_bounded() {
        let l = layout(&[iv("A", 0.0, 5e6)], &[]);
        assert!(l.ticks.len() <= MAX_TICKS + 1);
        let last = l.ticks.last().map_or(0.0, |t| t.time);
        assert!(last <= 5e6 + 1.0);
        assert!(last > 5e6 - 5e6 / MAX_TICKS as f64 * 2.0);
    }

    #[test]
    fn negative_config_lengths_are_clamped() {
        let cfg: GanttConfig = serde_json::from_str(
            r#"{"tail_margin": -1.0, "px_per_time": -5, "lane_height": -10, "min_segment_width": -3}"#,
        )
        .unwrap_or_default();
        let base = [iv("A", 0.0, 1.0)];
        let lanes = assign_lanes(None, &base, &[]);
        let l = layout_gantt(&base, &[], lanes, &cfg);
        let seg = &l.baseline[0];
        assert!(seg.x.is_finite() && seg.width.is_finite());
        assert!(l.ticks.iter().all(|t| t.x.is_finite()));
        assert_eq!(l.lane_height, 0.0);
        assert_eq!(seg.height, 0.0);
        // span is max_time alone once the tail margin clamps to zero
        assert!((seg.width - l.inner_width).abs() < 1e-9);
    }

    #[test]
    fn config_deserializes_with_defaults() {
        let cfg: GanttConfig =
            serde_json::from_str(r#"{"lane_height": 40, "padding": {"left": 100}}"#)
                .unwrap_or_default();
        assert_eq!(cfg.lane_height, 40.0);
        assert_eq!(cfg.padding.left, 100.0);
        assert_eq!(cfg.padding.right, 36.0);
        assert_eq!(cfg.px_per_time, 28.0);
    }
}
