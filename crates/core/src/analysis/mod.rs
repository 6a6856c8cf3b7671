pub mod compare;
pub mod run;
pub mod summary;

pub use compare::{CompareOptions, Comparison, QuantaCaptions, compare_runs};
pub use run::{RunAnalysis, SeriesSource, TimelineSource, analyze_run};
pub use summary::{ProcessRow, RunMetrics, RunSummary, memory_utilization, summarize};
