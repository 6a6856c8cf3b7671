use sched_lens_protocol::{Point, Rect, RenderCommand, TextAlign, ThemeToken, Viewport};

use crate::model::series::BUSY;
use crate::model::{MergedPoint, UtilizationSeries};

const LABEL_PADDING: f64 = 4.0;
const FONT_SIZE: f64 = 10.0;

/// Maps series time and cpu percent onto the viewport.
struct Plot {
    t0: f64,
    x_scale: f64,
    height: f64,
}

impl Plot {
    /// Each sample holds for one time unit, so the axis runs one unit past
    /// the last sample.
    fn new(viewport: &Viewport, first: f64, last: f64) -> Option<Self> {
        let duration = last + 1.0 - first;
        if duration <= 0.0 || viewport.width <= 0.0 || viewport.height <= 0.0 {
            return None;
        }
        Some(Self {
            t0: first,
            x_scale: viewport.width / duration,
            height: viewport.height,
        })
    }

    fn x(&self, time: f64) -> f64 {
        (time - self.t0) * self.x_scale
    }

    fn y(&self, cpu: f64) -> f64 {
        self.height - cpu.clamp(0.0, BUSY) / BUSY * self.height
    }
}

/// Render a single run's utilization as a filled step chart.
///
/// Unknown samples leave a gap.
pub fn render_utilization(series: &UtilizationSeries, viewport: &Viewport) -> Vec<RenderCommand> {
    let points = &series.points;
    let (Some(first), Some(last)) = (points.first(), points.last()) else {
        return Vec::new();
    };
    let Some(plot) = Plot::new(viewport, first.time, last.time) else {
        return Vec::new();
    };

    let mut commands = Vec::with_capacity(points.len() * 2 + 4);
    commands.push(RenderCommand::BeginGroup {
        id: "utilization".to_string(),
        label: Some("CPU utilization".to_string()),
    });
    commands.push(RenderCommand::DrawRect {
        rect: Rect::new(0.0, 0.0, viewport.width, viewport.height),
        color: ThemeToken::LaneBackground,
        border_color: Some(ThemeToken::LaneBorder),
        radius: 0.0,
        label: None,
        segment_id: None,
    });

    for (i, point) in points.iter().enumerate() {
        let Some(cpu) = point.cpu else { continue };
        let next = points.get(i + 1).map_or(point.time + 1.0, |p| p.time);
        let x = plot.x(point.time);
        let w = plot.x(next) - x;
        let y = plot.y(cpu);
        if w < 0.1 {
            continue;
        }
        commands.push(RenderCommand::DrawRect {
            rect: Rect::new(x, y, w, viewport.height - y),
            color: ThemeToken::UtilizationFill,
            border_color: None,
            radius: 0.0,
            label: None,
            segment_id: None,
        });
        commands.push(RenderCommand::DrawLine {
            from: Point::new(x, y),
            to: Point::new(x + w, y),
            color: ThemeToken::UtilizationLine,
            width: 1.0,
        });
    }

    let summary = series.summary();
    commands.push(RenderCommand::DrawText {
        position: Point::new(viewport.width - LABEL_PADDING, FONT_SIZE + LABEL_PADDING),
        text: format!("{}% busy", summary.busy_pct),
        color: ThemeToken::TextMuted,
        font_size: FONT_SIZE,
        align: TextAlign::Right,
    });

    commands.push(RenderCommand::EndGroup);
    commands
}

/// Render a baseline-vs-compare overlay as two step lines.
///
/// A `None` on either side breaks that side's line.
pub fn render_comparison(merged: &[MergedPoint], viewport: &Viewport) -> Vec<RenderCommand> {
    let (Some(first), Some(last)) = (merged.first(), merged.last()) else {
        return Vec::new();
    };
    let Some(plot) = Plot::new(viewport, first.time, last.time) else {
        return Vec::new();
    };

    let mut commands = Vec::with_capacity(merged.len() * 4 + 2);
    commands.push(RenderCommand::BeginGroup {
        id: "utilization-compare".to_string(),
        label: Some("CPU utilization (baseline vs compare)".to_string()),
    });
    step_line(&mut commands, &plot, merged, |m| m.base, ThemeToken::BaselineLine);
    step_line(&mut commands, &plot, merged, |m| m.compare, ThemeToken::CompareLine);
    commands.push(RenderCommand::EndGroup);
    commands
}

fn step_line(
    commands: &mut Vec<RenderCommand>,
    plot: &Plot,
    merged: &[MergedPoint],
    value: impl Fn(&MergedPoint) -> Option<f64>,
    color: ThemeToken,
) {
    // Previous known sample, used for the vertical riser.
    let mut prev: Option<f64> = None;
    for (i, point) in merged.iter().enumerate() {
        let Some(cpu) = value(point) else {
            prev = None;
            continue;
        };
        let x = plot.x(point.time);
        let next = merged.get(i + 1).map_or(point.time + 1.0, |p| p.time);
        let y = plot.y(cpu);
        if let Some(prev_y) = prev.filter(|py| *py != y) {
            commands.push(RenderCommand::DrawLine {
                from: Point::new(x, prev_y),
                to: Point::new(x, y),
                color,
                width: 2.0,
            });
        }
        commands.push(RenderCommand::DrawLine {
            from: Point::new(x, y),
            to: Point::new(plot.x(next), y),
            color,
            width: 2.0,
        });
        prev = Some(y);
    }
}
