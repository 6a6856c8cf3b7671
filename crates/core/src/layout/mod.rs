pub mod gantt;
pub mod lanes;
pub mod palette;

pub use gantt::{GanttConfig, GanttLayout, Padding, Panel, RenderSegment, TimeTick, layout_gantt};
pub use lanes::{LaneAssignment, assign_lanes};
pub use palette::hue_for_pid;
