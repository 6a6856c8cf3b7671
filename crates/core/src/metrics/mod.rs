pub mod merge;
pub mod quantum;
pub mod switches;
pub mod utilization;

pub use merge::merge_series;
pub use quantum::{QuantumMap, format_quanta, infer_quanta, resolve_quanta};
pub use switches::context_switches;
pub use utilization::{build_utilization, series_length};
