use serde::{Deserialize, Serialize};

/// Semantic color tokens resolved by the renderer's active theme.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ThemeToken {
    /// Fill for a process segment. The renderer derives a light/dark
    /// gradient pair from the hue (degrees, `0..360`).
    ProcessHue(u16),
    SegmentBorder,
    SegmentText,

    LaneBackground,
    LaneBorder,
    LaneLabel,

    GridLine,
    AxisText,

    // Utilization charts
    UtilizationFill,
    UtilizationLine,
    BaselineLine,
    CompareLine,

    TextMuted,
}

impl ThemeToken {
    /// Whether this token carries its own hue rather than a theme slot.
    pub fn is_process_hue(&self) -> bool {
        matches!(self, Self::ProcessHue(_))
    }
}
