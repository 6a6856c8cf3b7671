use sched_lens_protocol::{Point, Rect, RenderCommand, TextAlign, ThemeToken};

use crate::layout::{GanttLayout, Panel};

const LANE_RADIUS: f64 = 10.0;
const SEGMENT_RADIUS: f64 = 12.0;
const LANE_LABEL_GAP: f64 = 18.0;
const LANE_LABEL_FONT: f64 = 13.0;
const TICK_FONT: f64 = 11.0;
const TICK_LABEL_RISE: f64 = 10.0;
const GRID_OVERHANG: f64 = 12.0;
const SEGMENT_FONT: f64 = 12.0;

/// Render one panel of a dual Gantt layout in panel coordinates.
///
/// Segment rects carry their index in [`GanttLayout::segments`] as
/// `segment_id` so hover can map back through [`GanttLayout::hit_test`].
pub fn render_gantt_panel(layout: &GanttLayout, panel: Panel) -> Vec<RenderCommand> {
    let origin = layout.plot_origin;
    let segments = layout.segments(panel);
    let lanes = layout.lanes.pids();
    let grid_bottom = origin.y + lanes.len() as f64 * layout.lane_height + GRID_OVERHANG;

    let mut commands =
        Vec::with_capacity(lanes.len() * 2 + layout.ticks.len() * 2 + segments.len() + 2);

    commands.push(RenderCommand::BeginGroup {
        id: format!("gantt-{}", panel.as_str()),
        label: Some(panel.as_str().to_string()),
    });

    for tick in &layout.ticks {
        let x = origin.x + tick.x;
        commands.push(RenderCommand::DrawLine {
            from: Point::new(x, origin.y),
            to: Point::new(x, grid_bottom),
            color: ThemeToken::GridLine,
            width: 1.0,
        });
        commands.push(RenderCommand::DrawText {
            position: Point::new(x, origin.y - TICK_LABEL_RISE),
            text: tick.time.to_string(),
            color: ThemeToken::AxisText,
            font_size: TICK_FONT,
            align: TextAlign::Center,
        });
    }

    for (idx, pid) in lanes.iter().enumerate() {
        let y = origin.y + idx as f64 * layout.lane_height;
        commands.push(RenderCommand::DrawRect {
            rect: Rect::new(origin.x, y - 6.0, layout.inner_width, layout.lane_height),
            color: ThemeToken::LaneBackground,
            border_color: None,
            radius: LANE_RADIUS,
            label: None,
            segment_id: None,
        });
        commands.push(RenderCommand::DrawText {
            position: Point::new(origin.x - LANE_LABEL_GAP, y + layout.lane_height / 2.0),
            text: pid.to_string(),
            color: ThemeToken::LaneLabel,
            font_size: LANE_LABEL_FONT,
            align: TextAlign::Right,
        });
    }

    for (idx, seg) in segments.iter().enumerate() {
        commands.push(RenderCommand::DrawRect {
            rect: Rect::new(origin.x + seg.x, origin.y + seg.y, seg.width, seg.height),
            color: ThemeToken::ProcessHue(seg.hue),
            border_color: Some(ThemeToken::SegmentBorder),
            radius: SEGMENT_RADIUS,
            label: Some(seg.tooltip.clone()),
            segment_id: Some(idx as u64),
        });
        commands.push(RenderCommand::DrawText {
            position: Point::new(
                origin.x + seg.label_x,
                origin.y + seg.y + seg.height / 2.0 + 6.0,
            ),
            text: seg.pid.clone(),
            color: ThemeToken::SegmentText,
            font_size: SEGMENT_FONT,
            align: TextAlign::Center,
        });
    }

    commands.push(RenderCommand::EndGroup);
    commands
}
