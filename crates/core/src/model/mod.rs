pub mod interval;
pub mod pid;
pub mod series;

pub use interval::Interval;
pub use pid::ProcessId;
pub use series::{MergedPoint, SeriesSummary, UtilizationPoint, UtilizationSeries};
